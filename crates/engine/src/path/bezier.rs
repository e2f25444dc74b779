// SPDX-License-Identifier: MIT

//!
//! Cubic Bézier paths through waypoints
//!

use crate::path::svg_number;
use crate::{ArcLengthTable, PathConfig, Point};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt::Debug;

/// One cubic Bézier segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicSegment {
    pub start: Point,
    pub control_1: Point,
    pub control_2: Point,
    pub end: Point,
}

impl CubicSegment {
    /// The point at curve parameter `t` (`0` is `start`, `1` is `end`).
    /// Equal steps in `t` are generally not equal steps in distance.
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control_1 * (3.0 * u * u * t)
            + self.control_2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// Segments joining consecutive waypoints, with control points taken from
/// the Catmull-Rom tangents of the neighbouring waypoints (the end
/// waypoints stand in for their missing neighbours)
pub fn catmull_rom_segments(waypoints: &[Point]) -> Vec<CubicSegment> {
    if waypoints.len() < 2 {
        return Vec::new();
    }
    (0..waypoints.len() - 1)
        .map(|i| {
            let p0 = waypoints[i.saturating_sub(1)];
            let p1 = waypoints[i];
            let p2 = waypoints[i + 1];
            let p3 = waypoints.get(i + 2).copied().unwrap_or(p2);
            CubicSegment {
                start: p1,
                control_1: p1 + (p2 - p0) * (1.0 / 6.0),
                control_2: p2 - (p3 - p1) * (1.0 / 6.0),
                end: p2,
            }
        })
        .collect()
}

/// A smooth path through waypoints, queried by distance travelled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointPath {
    segments: Vec<CubicSegment>,
    table: ArcLengthTable,
}

impl WaypointPath {
    /// Build a path through `waypoints`, sampling each segment
    /// `steps_per_segment` times for the arc length table.  At least two
    /// waypoints are needed.
    pub fn through(waypoints: &[Point], steps_per_segment: usize) -> Option<Self> {
        let segments = catmull_rom_segments(waypoints);
        let first = segments.first()?.start;
        let steps = steps_per_segment.max(1);
        let samples = segments.iter().flat_map(|segment| {
            (1..=steps).map(move |step| segment.point_at(step as f64 / steps as f64))
        });
        let table = ArcLengthTable::from_points(std::iter::once(first).chain(samples));
        debug!(
            "path through {} waypoints is {} long",
            waypoints.len(),
            table.total_length()
        );
        Some(WaypointPath { segments, table })
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    pub fn arc_length_table(&self) -> &ArcLengthTable {
        &self.table
    }

    pub fn total_length(&self) -> f64 {
        self.table.total_length()
    }

    pub fn point_at_distance(&self, distance: f64) -> Point {
        self.table.point_at_distance(distance)
    }

    /// The point reached after travelling fraction `t` of the whole length
    pub fn point_at_time(&self, t: f64) -> Point {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.point_at_distance(t * self.total_length())
    }

    /// SVG path data with one `C` command per segment
    pub fn svg_path_data(&self) -> String {
        let mut data = String::new();
        let Some(first) = self.segments.first() else {
            return data;
        };
        data.push_str(&format!("M {} {}", svg_number(first.start.x), svg_number(first.start.y)));
        for segment in &self.segments {
            data.push_str(&format!(
                " C {} {} {} {} {} {}",
                svg_number(segment.control_1.x),
                svg_number(segment.control_1.y),
                svg_number(segment.control_2.x),
                svg_number(segment.control_2.y),
                svg_number(segment.end.x),
                svg_number(segment.end.y)
            ));
        }
        data
    }
}

/// Evenly spaced waypoints for a river `width` pixels wide.  The two ends
/// sit on the vertical centre; the rest wander up to `amplitude` from it.
pub fn river_waypoints(width: f64, config: &PathConfig) -> Vec<Point> {
    if !(width.is_finite() && width > 0.0) {
        return Vec::new();
    }
    let count = config.waypoint_count.max(2);
    let last = count - 1;
    let centre_y = config.height / 2.0;
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..count)
        .map(|i| {
            let x = width * i as f64 / last as f64;
            let y = if i == 0 || i == last {
                centre_y
            } else {
                centre_y + config.amplitude * rng.gen_range(-1.0..1.0)
            };
            Point::new(x, y)
        })
        .collect()
}
