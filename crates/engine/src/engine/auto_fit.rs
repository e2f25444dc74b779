// SPDX-License-Identifier: MIT

//!
//! Auto-fit zoom
//!
//! Picks a starting zoom that either shows the whole dataset (when it is
//! sparse enough to fit) or zooms into a representative slice of it (when it
//! is dense), and works out how far in it makes sense to let users zoom.
//!

use crate::{LayoutConfig, safe_div};
use log::debug;
use serde::Serialize;
use std::fmt::Debug;

/// Data at or below this density is shown in full
pub const SPARSE_DENSITY_RATIO: f64 = 1.5;

/// Padding either side of the displayed span, as a fraction of that span
pub const DISPLAY_PADDING_FRACTION: f64 = 0.1;

/// The narrowest span auto-fit will ever show (one day)
pub const MIN_DISPLAY_SPAN_YEARS: f64 = 1.0 / 365.0;

/// One hour in years
pub const HOUR_IN_YEARS: f64 = 1.0 / (365.25 * 24.0);

/// One second in years
pub const SECOND_IN_YEARS: f64 = HOUR_IN_YEARS / 3600.0;

/// The result of [`compute_auto_fit_zoom`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutoFit {
    /// The starting zoom
    pub pixels_per_year: f64,

    /// Events per unit of display capacity
    pub density_ratio: f64,

    /// Whether the data was too dense to show in full
    pub is_dense: bool,

    /// The span of data shown (years, padding excluded)
    pub display_span_years: f64,

    /// Padding shown either side of the data (years)
    pub padding_years: f64,
}

/// Roughly how many cards the viewport can show at once
pub fn display_capacity(viewport_width: f64, config: &LayoutConfig) -> usize {
    let columns = safe_div(viewport_width.max(0.0), config.min_separation()).floor() as usize;
    (columns * config.stack_capacity).max(1)
}

/// Work out the starting zoom for `event_count` events spread over
/// `data_span_years`, shown in a viewport `viewport_width` pixels wide.
///
/// Sparse data (a density ratio of at most 1.5) is shown in full.  Dense data
/// is shown as a slice `data_span_years / density_ratio` wide.  Either way 10%
/// of the displayed span is added as padding on each side, and the result is
/// clamped to `[zoom_min, zoom_max]`.
pub fn compute_auto_fit_zoom(
    event_count: usize,
    data_span_years: f64,
    viewport_width: f64,
    config: &LayoutConfig,
) -> AutoFit {
    let capacity = display_capacity(viewport_width, config);
    let density_ratio = event_count as f64 / capacity as f64;
    let is_dense = density_ratio > SPARSE_DENSITY_RATIO;

    let data_span_years = if data_span_years.is_finite() {
        data_span_years.max(MIN_DISPLAY_SPAN_YEARS)
    } else {
        MIN_DISPLAY_SPAN_YEARS
    };
    let display_span_years = if is_dense {
        (data_span_years / density_ratio).max(MIN_DISPLAY_SPAN_YEARS)
    } else {
        data_span_years
    };
    let padding_years = display_span_years * DISPLAY_PADDING_FRACTION;

    let effective_viewport_width = viewport_width.max(1.0);
    let pixels_per_year = safe_div(
        effective_viewport_width,
        display_span_years + 2.0 * padding_years,
    )
    .clamp(config.zoom_min, config.zoom_max);

    let fit = AutoFit {
        pixels_per_year,
        density_ratio,
        is_dense,
        display_span_years,
        padding_years,
    };
    debug!("auto-fit {event_count} events over {data_span_years} years: {fit:?}");
    fit
}

/// The smallest positive gap between two of the (sorted, de-duplicated)
/// years, if there is one
pub fn min_year_gap(years: &[f64]) -> Option<f64> {
    let mut years: Vec<f64> = years.iter().copied().filter(|year| year.is_finite()).collect();
    years.sort_by(f64::total_cmp);
    years.dedup();
    years
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > 0.0)
        .min_by(f64::total_cmp)
}

/// How far in it's worth zooming: until the two closest events would just
/// touch at card width.
///
/// When every event shares one timestamp there is no gap, so an hour is used
/// instead; gaps are never treated as less than a second.  Without events
/// the configured `zoom_max` is returned.  The result is never below
/// `zoom_min`.
pub fn data_aware_zoom_max(years: &[f64], config: &LayoutConfig) -> f64 {
    if years.iter().all(|year| !year.is_finite()) {
        return config.zoom_max;
    }
    let min_gap = min_year_gap(years)
        .unwrap_or(HOUR_IN_YEARS)
        .max(SECOND_IN_YEARS);
    (config.min_separation() / min_gap).max(config.zoom_min)
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig {
            card_width: 100.0,
            gap: 10.0,
            stack_capacity: 2,
            zoom_min: 0.001,
            zoom_max: 1e9,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn capacity() {
        assert_eq!(display_capacity(1100.0, &config()), 20);
        assert_eq!(display_capacity(1150.0, &config()), 20);
        assert_eq!(display_capacity(0.0, &config()), 1);
    }

    #[test]
    fn sparse_data_is_shown_in_full() {
        // 5 events, capacity 20
        let fit = compute_auto_fit_zoom(5, 100.0, 1100.0, &config());
        assert_eq!(fit.density_ratio, 0.25);
        assert!(!fit.is_dense);
        assert_eq!(fit.display_span_years, 100.0);
        assert_eq!(fit.padding_years, 10.0);
        assert_eq!(fit.pixels_per_year, 1100.0 / 120.0);
    }

    #[test]
    fn dense_data_zooms_into_a_slice() {
        // 80 events, capacity 20
        let fit = compute_auto_fit_zoom(80, 100.0, 1100.0, &config());
        assert_eq!(fit.density_ratio, 4.0);
        assert!(fit.is_dense);
        assert_eq!(fit.display_span_years, 25.0);
        assert_eq!(fit.padding_years, 2.5);
        assert_eq!(fit.pixels_per_year, 1100.0 / 30.0);
    }

    #[test]
    fn boundary_density_is_sparse() {
        let fit = compute_auto_fit_zoom(30, 100.0, 1100.0, &config());
        assert_eq!(fit.density_ratio, 1.5);
        assert!(!fit.is_dense);
    }

    #[test]
    fn single_timestamp_is_finite() {
        let fit = compute_auto_fit_zoom(1, 0.0, 1100.0, &config());
        assert!(fit.pixels_per_year.is_finite());
        assert_eq!(fit.display_span_years, MIN_DISPLAY_SPAN_YEARS);

        let fit = compute_auto_fit_zoom(0, f64::NAN, 0.0, &config());
        assert!(fit.pixels_per_year.is_finite());
        assert!(fit.pixels_per_year >= config().zoom_min);
    }

    #[test]
    fn zoom_is_clamped() {
        let config = LayoutConfig {
            zoom_max: 5.0,
            ..config()
        };
        let fit = compute_auto_fit_zoom(2, 1.0, 1100.0, &config);
        assert_eq!(fit.pixels_per_year, 5.0);
    }

    #[test]
    fn min_gap() {
        assert_eq!(min_year_gap(&[2000.0, 2010.0, 2003.0, 2010.0]), Some(3.0));
        assert_eq!(min_year_gap(&[2000.0, 2000.0]), None);
        assert_eq!(min_year_gap(&[]), None);
    }

    #[test]
    fn zoom_ceiling() {
        // Closest events 2 years apart: 110px / 2 years
        assert_eq!(data_aware_zoom_max(&[1900.0, 1950.0, 1952.0], &config()), 55.0);
    }

    #[test]
    fn zoom_ceiling_for_one_timestamp() {
        let max = data_aware_zoom_max(&[1900.0, 1900.0, 1900.0], &config());
        assert_eq!(max, 110.0 / HOUR_IN_YEARS);
        assert!(max.is_finite());
    }

    #[test]
    fn zoom_ceiling_for_tiny_gaps() {
        let max = data_aware_zoom_max(&[1900.0, 1900.0 + 1e-12], &config());
        assert!(max.is_finite());
        assert!(max <= 110.0 / SECOND_IN_YEARS);
    }

    #[test]
    fn zoom_ceiling_without_events() {
        assert_eq!(data_aware_zoom_max(&[], &config()), config().zoom_max);
    }
}
