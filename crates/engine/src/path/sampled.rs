// SPDX-License-Identifier: MIT

//!
//! Sampled sine-wave paths
//!

use crate::path::svg_number;
use crate::{PathConfig, Point};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::{PI, TAU};
use std::fmt::Debug;

/// One sample of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,

    /// Normalised time, `0` at the start and `1` at the end
    pub t: f64,

    /// Arc length from the start of the path to this point
    pub length: f64,
}

impl PathPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One of the sine waves summed to make a path's vertical movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wave {
    /// Cycles along the whole path
    pub frequency: f64,
    pub phase: f64,
    pub weight: f64,
}

impl Wave {
    /// The same seed always gives the same waves
    pub fn seeded(seed: u64, count: usize) -> Vec<Wave> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                let harmonic = (i + 1) as f64;
                Wave {
                    frequency: harmonic * rng.gen_range(0.75..1.25),
                    phase: rng.gen_range(0.0..TAU),
                    weight: 1.0 / harmonic,
                }
            })
            .collect()
    }
}

/// A time-monotonic path: `x` increases with `t` while `y` oscillates.
///
/// Points are stored in increasing `t` (and therefore increasing `x` and
/// non-decreasing arc length) so that lookups can binary search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPath {
    points: Vec<PathPoint>,
    total_length: f64,
    width: f64,
}

/// Generate a path `width` pixels wide.
///
/// `y` is the sum of seeded sine waves scaled by an envelope of `sin(t * PI)`,
/// so the path starts and ends at the vertical centre.  Returns `None` if
/// there is no width to fill.
pub fn generate_path(width: f64, config: &PathConfig) -> Option<GeneratedPath> {
    if !(width.is_finite() && width > 0.0) {
        return None;
    }
    let samples = config.samples.max(1);
    let waves = Wave::seeded(config.seed, config.wave_count);
    let total_weight: f64 = waves.iter().map(|wave| wave.weight).sum();
    let centre_y = config.height / 2.0;

    let mut points: Vec<PathPoint> = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let t = i as f64 / samples as f64;
        let noise = if total_weight > 0.0 {
            waves
                .iter()
                .map(|wave| wave.weight * (TAU * wave.frequency * t + wave.phase).sin())
                .sum::<f64>()
                / total_weight
        } else {
            0.0
        };
        let envelope = (t * PI).sin();
        let x = t * width;
        let y = centre_y + config.amplitude * envelope * noise;
        let length = match points.last() {
            Some(previous) => previous.length + previous.point().distance(Point::new(x, y)),
            None => 0.0,
        };
        points.push(PathPoint { x, y, t, length });
    }

    let total_length = points.last().map_or(0.0, |point| point.length);
    debug!("generated path {width}px wide, {} points, {total_length} long", points.len());
    Some(GeneratedPath {
        points,
        total_length,
        width,
    })
}

impl GeneratedPath {
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// The point reached at normalised time `t` (clamped to `[0, 1]`),
    /// interpolated linearly between the two samples either side of it
    pub fn point_at_time(&self, t: f64) -> Point {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let index = self.points.partition_point(|point| point.t < t);
        let Some(after) = self.points.get(index) else {
            return self.points.last().map_or_else(Point::default, PathPoint::point);
        };
        if index == 0 || after.t <= t {
            return after.point();
        }
        let before = self.points[index - 1];
        let fraction = (t - before.t) / (after.t - before.t);
        before.point().lerp(after.point(), fraction)
    }

    /// The normalised time at pixel `x`.  `x` is linear in time so this is a
    /// ratio rather than a search.
    pub fn time_at_x(&self, x: f64) -> f64 {
        (x / self.width).clamp(0.0, 1.0)
    }

    /// SVG path data: quadratic curves through the midpoints between samples,
    /// using each sample as a control point
    pub fn svg_path_data(&self) -> String {
        let mut data = String::new();
        let Some(first) = self.points.first() else {
            return data;
        };
        data.push_str(&format!("M {} {}", svg_number(first.x), svg_number(first.y)));
        if self.points.len() > 2 {
            for pair in self.points[1..self.points.len() - 1].windows(2) {
                let control = pair[0].point();
                let end = control.midpoint(pair[1].point());
                data.push_str(&format!(
                    " Q {} {} {} {}",
                    svg_number(control.x),
                    svg_number(control.y),
                    svg_number(end.x),
                    svg_number(end.y)
                ));
            }
        }
        if let Some(last) = self.points.last().filter(|_| self.points.len() > 1) {
            data.push_str(&format!(" L {} {}", svg_number(last.x), svg_number(last.y)));
        }
        data
    }
}
