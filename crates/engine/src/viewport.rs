// SPDX-License-Identifier: MIT

//!
//! The host's live viewport, and a zoom-independent description of it
//!

use crate::{EPSILON, TimeScale, ViewportCommand, YearRange, safe_div};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The scroll container's state, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveViewport {
    /// Scroll offset (px) from the left edge of the canvas
    pub viewport_offset: f64,

    /// Visible width (px)
    pub viewport_width: f64,

    pub pixels_per_year: f64,
}

impl LiveViewport {
    /// The years visible, given the decimal year at the canvas' left edge
    pub fn year_range(&self, origin_year: f64) -> YearRange {
        let start = origin_year + safe_div(self.viewport_offset, self.pixels_per_year);
        let end = start + safe_div(self.viewport_width.max(0.0), self.pixels_per_year);
        YearRange::new(start, end)
    }

    /// Apply a command from the engine
    pub fn apply(&mut self, command: ViewportCommand) {
        self.pixels_per_year = command.pixels_per_year;
        self.viewport_offset = command.viewport_offset;
    }
}

/// The visible part of the canvas as fractions of its width (`0` is the left
/// edge, `1` the right).  These survive zoom changes, so hosts can put them
/// in shareable links.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedViewport {
    pub start: f64,
    pub end: f64,
}

impl NormalizedViewport {
    /// Describe `viewport` against `scale`.  With nothing on the canvas the
    /// whole (empty) canvas is visible.
    pub fn from_viewport(viewport: &LiveViewport, scale: &TimeScale) -> Self {
        let total_width = scale.total_width();
        if total_width < EPSILON {
            return NormalizedViewport { start: 0.0, end: 1.0 };
        }
        let start = (viewport.viewport_offset / total_width).clamp(0.0, 1.0);
        let end = ((viewport.viewport_offset + viewport.viewport_width) / total_width).clamp(start, 1.0);
        NormalizedViewport { start, end }
    }

    /// The zoom and offset that show this part of the canvas in a viewport
    /// `viewport_width` pixels wide.  `None` when there is nothing on the
    /// canvas.
    pub fn restore(&self, scale: &TimeScale, viewport_width: f64) -> Option<ViewportCommand> {
        if scale.total_years() < EPSILON {
            return None;
        }
        let start = self.start.clamp(0.0, 1.0);
        let end = self.end.clamp(start, 1.0);
        let span_years = ((end - start) * scale.total_years()).max(EPSILON);
        let pixels_per_year = viewport_width.max(1.0) / span_years;
        Some(ViewportCommand {
            pixels_per_year,
            viewport_offset: start * scale.total_years() * pixels_per_year,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timescape_core::Event;

    fn scale() -> TimeScale {
        // 1000 years across 10,000px
        let events = vec![Event::new("a", "1000"), Event::new("b", "1930")];
        TimeScale::new(&events, 10.0, None)
    }

    #[test]
    fn year_range() {
        let viewport = LiveViewport {
            viewport_offset: 500.0,
            viewport_width: 1_000.0,
            pixels_per_year: 10.0,
        };
        assert_eq!(viewport.year_range(950.0), YearRange::new(1000.0, 1100.0));
    }

    #[test]
    fn normalise() {
        let viewport = LiveViewport {
            viewport_offset: 2_500.0,
            viewport_width: 1_000.0,
            pixels_per_year: 10.0,
        };
        let normalized = NormalizedViewport::from_viewport(&viewport, &scale());
        assert_eq!(normalized, NormalizedViewport { start: 0.25, end: 0.35 });
    }

    #[test]
    fn restore_at_another_width() {
        let normalized = NormalizedViewport { start: 0.25, end: 0.35 };
        let command = normalized.restore(&scale(), 500.0).unwrap();
        // 100 years across 500px
        assert!((command.pixels_per_year - 5.0).abs() < 1e-9);
        assert!((command.viewport_offset - 1_250.0).abs() < 1e-6);

        let mut viewport = LiveViewport {
            viewport_offset: 0.0,
            viewport_width: 500.0,
            pixels_per_year: 1.0,
        };
        viewport.apply(command);
        let scale = TimeScale::new(
            &[Event::new("a", "1000"), Event::new("b", "1930")],
            viewport.pixels_per_year,
            None,
        );
        let again = NormalizedViewport::from_viewport(&viewport, &scale);
        assert!((again.start - 0.25).abs() < 1e-9);
        assert!((again.end - 0.35).abs() < 1e-9);
    }

    #[test]
    fn empty_canvas() {
        let scale = TimeScale::new(&[], 10.0, None);
        let viewport = LiveViewport {
            viewport_offset: 30.0,
            viewport_width: 100.0,
            pixels_per_year: 10.0,
        };
        assert_eq!(
            NormalizedViewport::from_viewport(&viewport, &scale),
            NormalizedViewport { start: 0.0, end: 1.0 }
        );
        assert!(NormalizedViewport { start: 0.0, end: 1.0 }.restore(&scale, 800.0).is_none());
    }
}
