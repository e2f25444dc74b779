// SPDX-License-Identifier: MIT

//!
//! Arc length lookup
//!

use crate::Point;
use serde::Serialize;
use std::fmt::Debug;

/// A point on a curve together with the distance travelled to reach it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSample {
    pub point: Point,
    pub length: f64,
}

/// Cumulative arc lengths of points sampled along a curve.
///
/// Lengths are strictly increasing (samples that don't move the curve are
/// dropped), so "where is the point `d` along the curve" is a binary search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArcLengthTable {
    samples: Vec<ArcSample>,
}

impl ArcLengthTable {
    /// Build the table from points in curve order
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut samples: Vec<ArcSample> = Vec::new();
        for point in points {
            match samples.last() {
                Some(previous) => {
                    let step = previous.point.distance(point);
                    if step > 0.0 {
                        samples.push(ArcSample {
                            point,
                            length: previous.length + step,
                        });
                    }
                }
                None => samples.push(ArcSample { point, length: 0.0 }),
            }
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[ArcSample] {
        &self.samples
    }

    pub fn total_length(&self) -> f64 {
        self.samples.last().map_or(0.0, |sample| sample.length)
    }

    /// The point `distance` along the curve (clamped to the curve), linearly
    /// interpolated between the two samples either side of it
    pub fn point_at_distance(&self, distance: f64) -> Point {
        let distance = if distance.is_nan() {
            0.0
        } else {
            distance.clamp(0.0, self.total_length())
        };
        let index = self.samples.partition_point(|sample| sample.length < distance);
        let Some(after) = self.samples.get(index) else {
            return self.samples.last().map_or_else(Point::default, |sample| sample.point);
        };
        if index == 0 || after.length <= distance {
            return after.point;
        }
        let before = self.samples[index - 1];
        let fraction = (distance - before.length) / (after.length - before.length);
        before.point.lerp(after.point, fraction)
    }
}
