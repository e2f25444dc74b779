// SPDX-License-Identifier: MIT

//!
//! Axis ticks
//!

use crate::{TimeScale, ceiling_to_step, floor_to_step};
use serde::Serialize;
use std::fmt::Debug;
use timescape_core::{CalendarDate, each_year_of_interval};

/// Year steps considered for ticks, before repeating at larger magnitudes
const NICE_STEPS: [i32; 3] = [1, 2, 5];

/// Information needed to draw one tick of the time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub year: i32,
    pub x: f64,
    pub label: String,
}

/// Label a year, e.g. `1066` or `44 BCE`
pub fn year_label(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", -i64::from(year))
    } else {
        format!("{year}")
    }
}

/// The smallest "nice" step (1, 2, 5, 10, 20, 50, ...) that keeps ticks at
/// least `min_spacing_px` apart
pub fn tick_step(pixels_per_year: f64, min_spacing_px: f64) -> i32 {
    let mut magnitude: i32 = 1;
    loop {
        for step in NICE_STEPS {
            let step = step.saturating_mul(magnitude);
            if f64::from(step) * pixels_per_year >= min_spacing_px || step == i32::MAX {
                return step;
            }
        }
        magnitude = magnitude.saturating_mul(10);
    }
}

/// Ticks for every whole year on the canvas that is a multiple of the chosen
/// step
pub fn axis_ticks(scale: &TimeScale, min_spacing_px: f64) -> Vec<AxisTick> {
    if scale.is_empty() {
        return Vec::new();
    }
    let step = tick_step(scale.pixels_per_year(), min_spacing_px);

    // Whole years fully on the canvas
    let first = CalendarDate::from_decimal_year(scale.min_year().ceil());
    let last = CalendarDate::from_decimal_year(scale.max_year().floor());
    let first_tick = ceiling_to_step(first.year().value(), step);
    let last_tick = floor_to_step(last.year().value(), step);
    let (Ok(first_tick), Ok(last_tick)) = (
        CalendarDate::from_ymd(first_tick.into(), 1, 1),
        CalendarDate::from_ymd(last_tick.into(), 1, 1),
    ) else {
        return Vec::new();
    };

    each_year_of_interval(&first_tick, &last_tick)
        .step_by(step as usize)
        .map(|year| AxisTick {
            year,
            x: scale.position_of_year(f64::from(year)),
            label: year_label(year),
        })
        .collect()
}
