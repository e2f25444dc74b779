// SPDX-License-Identifier: MIT

//!
//! The minimap (an overview of the whole timeline)
//!
//! The minimap shows a window of years, its *range*, which can be zoomed and
//! panned independently of the main viewport.  An indicator on the minimap
//! shows where the main viewport is.
//!
//! While nobody is touching the minimap it follows the viewport: the range
//! re-centres on the viewport and, when the indicator gets too small or too
//! large, re-ranges so the indicator is back at its target size.  Dragging
//! the minimap (or the indicator) suspends this until the drag ends.
//!
//! Dragging or resizing the indicator is handled by an [`IndicatorGesture`],
//! which works against a snapshot taken when the gesture began.
//!

mod edge_scroll;
mod gesture;

pub use edge_scroll::*;
pub use gesture::*;

use crate::{EPSILON, LiveViewport, MinimapConfig, TimeScale, safe_div};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use timescape_core::CalendarDate;

/// A window of decimal years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: f64,
    pub end: f64,
}

impl YearRange {
    pub fn new(start: f64, end: f64) -> Self {
        if end < start {
            YearRange { start: end, end: start }
        } else {
            YearRange { start, end }
        }
    }

    pub fn centred(centre: f64, width: f64) -> Self {
        let half = width.abs() / 2.0;
        YearRange {
            start: centre - half,
            end: centre + half,
        }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn centre(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn shifted(&self, years: f64) -> Self {
        YearRange {
            start: self.start + years,
            end: self.end + years,
        }
    }

    /// Slide (and if need be shrink) this range until it lies within `outer`
    pub fn clamped_within(&self, outer: &YearRange) -> Self {
        let width = self.width().min(outer.width());
        let start = self.start.min(outer.end - width).max(outer.start);
        YearRange {
            start,
            end: (start + width).min(outer.end),
        }
    }

    /// How far through the range `year` is (0 to 100, or beyond)
    pub fn percent_of(&self, year: f64) -> f64 {
        safe_div(year - self.start, self.width()) * 100.0
    }

    /// The year `percent` of the way through the range
    pub fn year_at_percent(&self, percent: f64) -> f64 {
        self.start + self.width() * percent / 100.0
    }
}

/// Where the viewport indicator is, as percentages of the minimap's range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorBounds {
    pub start_pct: f64,
    pub end_pct: f64,
}

impl IndicatorBounds {
    pub fn width_pct(&self) -> f64 {
        self.end_pct - self.start_pct
    }
}

/// Pointer state while the minimap track itself is dragged
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackDrag {
    pointer_start_x: f64,
    range: YearRange,
}

/// The minimap's state.  It owns its range; the live viewport belongs to the
/// host and is only ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    config: MinimapConfig,

    /// The decimal year at the main canvas' left edge
    origin_year: f64,

    /// Every year the timeline covers
    total: YearRange,

    /// The years the minimap currently shows
    range: YearRange,

    /// Set while the user is dragging the track or the indicator
    is_dragging: bool,

    track_drag: Option<TrackDrag>,
}

/// The range covering a whole scale.  An empty scale still gets a small
/// range so that the minimap always has some width.
fn total_range(scale: &TimeScale, config: &MinimapConfig) -> YearRange {
    let start = scale.min_year();
    if scale.total_years() < EPSILON {
        YearRange::new(start, start + config.min_years_visible.max(EPSILON))
    } else {
        YearRange::new(start, scale.max_year())
    }
}

impl Minimap {
    /// A minimap showing the whole of `scale`
    pub fn new(scale: &TimeScale, config: MinimapConfig) -> Self {
        let total = total_range(scale, &config);
        Minimap {
            config,
            origin_year: scale.min_year(),
            total,
            range: total,
            is_dragging: false,
            track_drag: None,
        }
    }

    /// Follow a change of scale (new events or zoom), keeping as much of the
    /// current range as still fits
    pub fn rescale(&mut self, scale: &TimeScale) {
        self.origin_year = scale.min_year();
        self.total = total_range(scale, &self.config);
        self.range = self.range.clamped_within(&self.total);
        if self.range.width() < EPSILON {
            self.range = self.total;
        }
    }

    pub fn config(&self) -> &MinimapConfig {
        &self.config
    }

    pub fn origin_year(&self) -> f64 {
        self.origin_year
    }

    pub fn total(&self) -> YearRange {
        self.total
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    /// The range as dates, for labelling
    pub fn range_dates(&self) -> (CalendarDate, CalendarDate) {
        (
            CalendarDate::from_decimal_year(self.range.start),
            CalendarDate::from_decimal_year(self.range.end),
        )
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub(crate) fn set_dragging(&mut self, is_dragging: bool) {
        self.is_dragging = is_dragging;
    }

    /// The narrowest and widest the range may be
    fn width_limits(&self) -> (f64, f64) {
        let max = self.total.width();
        (self.config.min_years_visible.min(max), max)
    }

    fn set_range(&mut self, range: YearRange) {
        self.range = range.clamped_within(&self.total);
    }

    /// Where some years would be drawn as an indicator, clamped to the
    /// minimap
    pub fn indicator_for(&self, years: YearRange) -> IndicatorBounds {
        IndicatorBounds {
            start_pct: self.range.percent_of(years.start).clamp(0.0, 100.0),
            end_pct: self.range.percent_of(years.end).clamp(0.0, 100.0),
        }
    }

    /// Where the viewport indicator is drawn
    pub fn indicator(&self, viewport: &LiveViewport) -> IndicatorBounds {
        self.indicator_for(viewport.year_range(self.origin_year))
    }

    /// Follow the live viewport.  Does nothing while dragging.  Returns
    /// whether the range changed.
    pub fn follow_viewport(&mut self, viewport: &LiveViewport) -> bool {
        if self.is_dragging {
            trace!("minimap is being dragged, not following the viewport");
            return false;
        }
        let view = viewport.year_range(self.origin_year);
        let indicator_pct = safe_div(view.width(), self.range.width()) * 100.0;

        let mut width = self.range.width();
        if indicator_pct < self.config.lower_band_pct || indicator_pct > self.config.upper_band_pct {
            let (min, max) = self.width_limits();
            width = (view.width() * 100.0 / self.config.target_pct).max(min).min(max);
            debug!("minimap indicator at {indicator_pct:.1}%, re-ranging to {width} years");
        }

        let previous = self.range;
        self.set_range(YearRange::centred(view.centre(), width));
        self.range != previous
    }

    /// Start dragging the minimap track at `pointer_x` (px)
    pub fn begin_track_drag(&mut self, pointer_x: f64) {
        self.is_dragging = true;
        self.track_drag = Some(TrackDrag {
            pointer_start_x: pointer_x,
            range: self.range,
        });
    }

    /// Pan so that the years under the pointer at the start of the drag stay
    /// under it.  Ignored if no track drag is in progress.
    pub fn drag_track(&mut self, pointer_x: f64, track_width: f64) {
        let Some(drag) = self.track_drag else {
            return;
        };
        let delta_years = safe_div(pointer_x - drag.pointer_start_x, track_width) * drag.range.width();
        self.set_range(drag.range.shifted(-delta_years));
    }

    pub fn end_track_drag(&mut self) {
        if self.track_drag.take().is_some() {
            self.is_dragging = false;
        }
    }

    /// Zoom the range by `notches` wheel notches (positive zooms out) around
    /// the point `anchor_pct` of the way across the minimap
    pub fn wheel_zoom(&mut self, notches: f64, anchor_pct: f64) {
        let anchor_pct = anchor_pct.clamp(0.0, 100.0);
        let (min, max) = self.width_limits();
        let width = (self.range.width() * self.config.wheel_zoom_factor.powf(notches))
            .max(min)
            .min(max);
        let anchor_year = self.range.year_at_percent(anchor_pct);
        let start = anchor_year - width * anchor_pct / 100.0;
        self.set_range(YearRange::new(start, start + width));
        trace!("minimap wheel zoom to {:?}", self.range);
    }

    /// Pan the range, stopping at the ends of the timeline.  Returns how far
    /// it actually moved.
    pub fn pan_by_years(&mut self, years: f64) -> f64 {
        let previous = self.range.start;
        self.set_range(self.range.shifted(years));
        self.range.start - previous
    }
}
