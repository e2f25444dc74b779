// SPDX-License-Identifier: MIT

//!
//! The time scale (date to pixel mapping)
//!

use crate::{EPSILON, LayoutConfig, PositionedEvent};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use timescape_core::{CalendarDate, Event};

/// Padding kept either side of the events so that none touch the canvas edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePadding {
    pub before_years: f64,
    pub after_years: f64,
}

impl Default for ScalePadding {
    fn default() -> Self {
        ScalePadding {
            before_years: 50.0,
            after_years: 20.0,
        }
    }
}

impl From<&LayoutConfig> for ScalePadding {
    fn from(config: &LayoutConfig) -> Self {
        ScalePadding {
            before_years: config.padding_before_years,
            after_years: config.padding_after_years,
        }
    }
}

/// Maps dates to horizontal pixel positions for a fixed zoom.
///
/// A `TimeScale` holds no incremental state: change the events, the zoom, or
/// the padding and a new one is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScale {
    /// The zoom level
    pixels_per_year: f64,

    padding: ScalePadding,

    /// The earliest event start and the latest event end (ignores padding).
    /// `None` when there are no events.
    data_range: Option<(CalendarDate, CalendarDate)>,

    /// The decimal year at x = 0 (includes padding)
    min_year: f64,

    /// The number of years covered, padding included
    total_years: f64,
}

impl TimeScale {
    /// Build the scale for the given events and zoom.  `padding` defaults to
    /// 50 years before and 20 years after.
    pub fn new(events: &[Event], pixels_per_year: f64, padding: Option<ScalePadding>) -> Self {
        let padding = padding.unwrap_or_default();
        let pixels_per_year = if pixels_per_year.is_finite() && pixels_per_year > 0.0 {
            pixels_per_year
        } else {
            EPSILON
        };

        let data_range = data_range(events);
        let (min_year, total_years) = match data_range {
            Some((first, last)) => {
                let min_year = first.decimal_year() - padding.before_years;
                let max_year = last.decimal_year() + padding.after_years;
                (min_year, (max_year - min_year).max(0.0))
            }
            None => (0.0, 0.0),
        };

        Self {
            pixels_per_year,
            padding,
            data_range,
            min_year,
            total_years,
        }
    }

    /// Build the scale using the padding from a [`LayoutConfig`]
    pub fn from_config(events: &[Event], config: &LayoutConfig, pixels_per_year: f64) -> Self {
        Self::new(events, pixels_per_year, Some(ScalePadding::from(config)))
    }

    pub fn pixels_per_year(&self) -> f64 {
        self.pixels_per_year
    }

    pub fn padding(&self) -> ScalePadding {
        self.padding
    }

    /// Whether there were no events to scale
    pub fn is_empty(&self) -> bool {
        self.data_range.is_none()
    }

    /// The full width of the canvas (padding included)
    pub fn total_width(&self) -> f64 {
        self.total_years * self.pixels_per_year
    }

    /// The number of years across the canvas (padding included)
    pub fn total_years(&self) -> f64 {
        self.total_years
    }

    /// The decimal year at the left edge of the canvas
    pub fn min_year(&self) -> f64 {
        self.min_year
    }

    /// The decimal year at the right edge of the canvas
    pub fn max_year(&self) -> f64 {
        self.min_year + self.total_years
    }

    /// The date at the left edge of the canvas
    pub fn min_date(&self) -> CalendarDate {
        CalendarDate::from_decimal_year(self.min_year())
    }

    /// The date at the right edge of the canvas
    pub fn max_date(&self) -> CalendarDate {
        CalendarDate::from_decimal_year(self.max_year())
    }

    /// The earliest start and latest end of the events
    pub fn data_range(&self) -> Option<(CalendarDate, CalendarDate)> {
        self.data_range
    }

    /// Years between the earliest start and the latest end (0 without events)
    pub fn data_span_years(&self) -> f64 {
        self.data_range
            .map_or(0.0, |(first, last)| last.decimal_year() - first.decimal_year())
    }

    /// Pixel position of a date string (soft parsed).  Always `0` if there
    /// are no events.
    pub fn position(&self, date: &str) -> f64 {
        self.position_of(&CalendarDate::parse(date))
    }

    /// Pixel position of a date
    pub fn position_of(&self, date: &CalendarDate) -> f64 {
        self.position_of_year(date.decimal_year())
    }

    /// Pixel position of a decimal year
    pub fn position_of_year(&self, year: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (year - self.min_year) * self.pixels_per_year
    }

    /// The decimal year at a pixel position (the inverse of
    /// [`TimeScale::position_of_year`])
    pub fn year_at(&self, x: f64) -> f64 {
        self.min_year + x / self.pixels_per_year
    }

    /// Position every event, sorted chronologically.  Ties keep the order in
    /// which the events were given.
    pub fn position_events(&self, events: &[Event]) -> Vec<PositionedEvent> {
        let mut positioned: Vec<PositionedEvent> = events
            .iter()
            .map(|event| {
                let start = event.start();
                PositionedEvent {
                    id: event.id.clone(),
                    x: self.position_of(&start),
                    end_x: event.end().map(|end| self.position_of(&end)),
                    year: start.decimal_year(),
                    end_year: event.end_or_start().decimal_year(),
                    milestone: event.milestone,
                }
            })
            .collect();
        positioned.sort_by(|a, b| a.year.total_cmp(&b.year));
        positioned
    }
}

/// The earliest start and latest end (falling back to start) of the events
fn data_range(events: &[Event]) -> Option<(CalendarDate, CalendarDate)> {
    let first = events.iter().map(Event::start).min()?;
    let last = events.iter().map(Event::end_or_start).max()?;
    Some((first, last.max(first)))
}

#[cfg(test)]
mod test {
    use super::*;
    use timescape_core::date;

    fn events(dates: &[&str]) -> Vec<Event> {
        dates
            .iter()
            .enumerate()
            .map(|(i, date)| Event::new(format!("e{i}"), date.to_string()))
            .collect()
    }

    #[test]
    fn empty() {
        let scale = TimeScale::new(&[], 10.0, None);
        assert!(scale.is_empty());
        assert_eq!(scale.total_width(), 0.0);
        assert_eq!(scale.position("2000-01-01"), 0.0);
        assert_eq!(scale.position("garbage"), 0.0);
        assert!(scale.position_events(&[]).is_empty());
    }

    #[test]
    fn date_literals() {
        let scale = TimeScale::new(&events(&["-0150", "0150"]), 1.0, None);
        assert_eq!(scale.position_of(&date!("-0150-01-01")), 50.0);
        assert_eq!(scale.position_of(&date!("0150")), scale.position("0150"));
    }

    #[test]
    fn default_padding() {
        let scale = TimeScale::new(&events(&["2000", "2010"]), 2.0, None);
        assert_eq!(scale.min_year(), 1950.0);
        assert_eq!(scale.max_year(), 2030.0);
        assert_eq!(scale.total_years(), 80.0);
        assert_eq!(scale.total_width(), 160.0);
        assert_eq!(scale.position("2000"), 100.0);
        assert_eq!(scale.position("1950"), 0.0);
        assert_eq!(scale.data_span_years(), 10.0);
    }

    #[test]
    fn end_dates_extend_the_range() {
        let events = vec![
            Event::new("a", "2000").with_end("2050"),
            Event::new("b", "2010"),
        ];
        let padding = ScalePadding {
            before_years: 0.0,
            after_years: 0.0,
        };
        let scale = TimeScale::new(&events, 1.0, Some(padding));
        assert_eq!(scale.total_width(), 50.0);
        let (first, last) = scale.data_range().unwrap();
        assert_eq!(first.year().value(), 2000);
        assert_eq!(last.year().value(), 2050);
    }

    #[test]
    fn bce_only_data_is_finite() {
        let scale = TimeScale::new(&events(&["-3000-06-15", "-0150-01-01", "-0044-03-15"]), 1.5, None);
        assert!(scale.total_width().is_finite());
        assert!(scale.total_width() > 0.0);
        assert_eq!(scale.min_year(), CalendarDate::parse("-3000-06-15").decimal_year() - 50.0);
        assert!((scale.position("-3000-06-15") - 75.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_era_data() {
        let scale = TimeScale::new(&events(&["-0500", "0000", "0500"]), 1.0, None);
        assert_eq!(scale.total_years(), 1070.0);
        assert_eq!(scale.position("0000"), 550.0);
        assert!(scale.position("-0001-12-31") < scale.position("0000-01-01"));
    }

    #[test]
    fn position_is_strictly_increasing() {
        let scale = TimeScale::new(&events(&["-0100", "2000"]), 0.5, None);
        let mut previous = f64::NEG_INFINITY;
        for year in -120..2010 {
            let x = scale.position(&format!("{year}-07-01"));
            assert!(x > previous);
            previous = x;
        }
    }

    #[test]
    fn zoom_monotonicity() {
        let events = events(&["1900", "1901", "1950"]);
        let mut previous_width = 0.0;
        let mut previous_gap = 0.0;
        for pixels_per_year in [0.1, 1.0, 2.5, 10.0, 100.0] {
            let scale = TimeScale::new(&events, pixels_per_year, None);
            let gap = scale.position("1901") - scale.position("1900");
            assert!(scale.total_width() > previous_width);
            assert!(gap > previous_gap);
            previous_width = scale.total_width();
            previous_gap = gap;
        }
    }

    #[test]
    fn idempotent() {
        let events = events(&["1900", "1850-02-03", "1999"]);
        let a = TimeScale::new(&events, 3.0, None);
        let b = TimeScale::new(&events, 3.0, None);
        assert_eq!(a, b);
        assert_eq!(a.position_events(&events), b.position_events(&events));
    }

    #[test]
    fn inverse() {
        let scale = TimeScale::new(&events(&["-0200", "0300"]), 4.0, None);
        for x in [0.0, 1.0, 333.3, scale.total_width()] {
            assert!((scale.position_of_year(scale.year_at(x)) - x).abs() < 1e-9);
        }
    }

    #[test]
    fn bad_zoom_is_guarded() {
        let scale = TimeScale::new(&events(&["2000"]), 0.0, None);
        assert!(scale.pixels_per_year() > 0.0);
        let scale = TimeScale::new(&events(&["2000"]), f64::NAN, None);
        assert!(scale.total_width().is_finite());
    }

    #[test]
    fn positioned_events_are_chronological() {
        let events = events(&["2000", "1990", "2000", "1995"]);
        let scale = TimeScale::new(&events, 1.0, None);
        let positioned = scale.position_events(&events);
        let ids: Vec<&str> = positioned.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3", "e0", "e2"]);
    }
}
