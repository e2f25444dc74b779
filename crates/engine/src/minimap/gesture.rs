// SPDX-License-Identifier: MIT

//!
//! Dragging and resizing the viewport indicator
//!
//! All pointer maths is done against a [`DragSnapshot`] taken when the
//! gesture begins, so nothing that changes the live state mid-gesture can
//! make the indicator jump away from the pointer.  The live viewport is only
//! changed once, by the command returned on release.
//!

use crate::{
    EPSILON, EdgeAutoScroll, IndicatorBounds, LiveViewport, Minimap, TimerCommand,
    ViewportCommand, YearRange, edge_direction, safe_div,
};
use log::{debug, info};
use serde::Serialize;
use std::fmt::Debug;

/// What part of the indicator is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// The whole indicator (pans the viewport)
    Move,

    /// The left edge (zooms the viewport)
    ResizeStart,

    /// The right edge (zooms the viewport)
    ResizeEnd,
}

/// Everything a gesture needs, frozen when it began
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragSnapshot {
    pub kind: DragKind,

    /// Pointer position (px from the left of the track)
    pub pointer_start_x: f64,

    pub viewport: LiveViewport,

    /// The decimal year at the main canvas' left edge
    pub origin_year: f64,

    /// The years the viewport showed
    pub view: YearRange,

    /// The minimap's range
    pub range: YearRange,

    pub indicator: IndicatorBounds,

    /// The track's width (px)
    pub track_width: f64,

    /// How far edge auto-scroll has moved the minimap since the gesture
    /// began (years)
    pub range_shift_years: f64,
}

/// The result of moving the pointer (or of an auto-scroll tick)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureUpdate {
    /// Where to draw the indicator now
    pub indicator: IndicatorBounds,

    /// Timer changes for the host to make
    pub timers: Vec<TimerCommand>,
}

/// The result of letting go
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureRelease {
    /// The change to make to the live viewport
    pub viewport: ViewportCommand,

    /// Set if an auto-scroll timer was still running
    pub timer: Option<TimerCommand>,
}

/// One drag (or resize) of the viewport indicator, from pointer down to
/// pointer up.  The host keeps this for the duration of the gesture and
/// passes it the pointer events.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorGesture {
    /// `None` once the gesture has been released or cancelled
    snapshot: Option<DragSnapshot>,

    /// The years the viewport will show on release
    current: YearRange,

    last_pointer_x: f64,

    edge_scroll: EdgeAutoScroll,
}

impl IndicatorGesture {
    /// Start a gesture with the pointer at `pointer_x` (px from the left of a
    /// track `track_width` px wide).  Auto-follow is suspended until the
    /// gesture ends.
    pub fn begin(
        minimap: &mut Minimap,
        kind: DragKind,
        pointer_x: f64,
        track_width: f64,
        viewport: &LiveViewport,
    ) -> Self {
        minimap.set_dragging(true);
        let view = viewport.year_range(minimap.origin_year());
        let snapshot = DragSnapshot {
            kind,
            pointer_start_x: pointer_x,
            viewport: *viewport,
            origin_year: minimap.origin_year(),
            view,
            range: minimap.range(),
            indicator: minimap.indicator_for(view),
            track_width: track_width.max(1.0),
            range_shift_years: 0.0,
        };
        debug!("indicator gesture began: {snapshot:?}");
        IndicatorGesture {
            snapshot: Some(snapshot),
            current: view,
            last_pointer_x: pointer_x,
            edge_scroll: EdgeAutoScroll::new(minimap.config().edge_scroll_interval_ms),
        }
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&DragSnapshot> {
        self.snapshot.as_ref()
    }

    /// The years the viewport will show on release
    pub fn current(&self) -> YearRange {
        self.current
    }

    /// The years the viewport shows with the pointer at `pointer_x`
    fn years_at(snapshot: &DragSnapshot, minimap: &Minimap, pointer_x: f64) -> YearRange {
        let total = minimap.total();
        let delta_years =
            safe_div(pointer_x - snapshot.pointer_start_x, snapshot.track_width) * snapshot.range.width();
        let min_width = snapshot.range.width() * minimap.config().min_indicator_pct / 100.0;
        let view = snapshot.view;
        match snapshot.kind {
            DragKind::Move => view.shifted(delta_years).clamped_within(&total),
            DragKind::ResizeStart => {
                let start = (view.start + delta_years + snapshot.range_shift_years)
                    .max(total.start)
                    .min(view.end - min_width);
                YearRange { start, end: view.end }
            }
            DragKind::ResizeEnd => {
                let end = (view.end + delta_years + snapshot.range_shift_years)
                    .min(total.end)
                    .max(view.start + min_width);
                YearRange { start: view.start, end }
            }
        }
    }

    /// Follow the pointer.  Returns `None` if the gesture is over.
    pub fn pointer_move(&mut self, minimap: &Minimap, pointer_x: f64) -> Option<GestureUpdate> {
        let snapshot = self.snapshot?;
        self.last_pointer_x = pointer_x;
        self.current = Self::years_at(&snapshot, minimap, pointer_x);

        let timers = match snapshot.kind {
            DragKind::Move => Vec::new(),
            DragKind::ResizeStart | DragKind::ResizeEnd => {
                let pointer_pct = pointer_x / snapshot.track_width * 100.0;
                let direction = edge_direction(pointer_pct, minimap.config().edge_scroll_threshold_pct);
                self.edge_scroll.steer(direction)
            }
        };
        Some(GestureUpdate {
            indicator: minimap.indicator_for(self.current),
            timers,
        })
    }

    /// The auto-scroll timer fired: pan the minimap one step and carry the
    /// dragged edge along with it.  Returns `None` if the gesture is over or
    /// nothing is scrolling.
    pub fn tick(&mut self, minimap: &mut Minimap) -> Option<GestureUpdate> {
        let direction = self.edge_scroll.direction()?;
        let snapshot = self.snapshot.as_mut()?;
        let step = minimap.range().width() * minimap.config().edge_scroll_step_pct / 100.0;
        snapshot.range_shift_years += minimap.pan_by_years(step * direction.sign());
        let snapshot = *snapshot;
        self.current = Self::years_at(&snapshot, minimap, self.last_pointer_x);
        Some(GestureUpdate {
            indicator: minimap.indicator_for(self.current),
            timers: Vec::new(),
        })
    }

    /// Let go.  Returns the change to make to the live viewport, or `None` if
    /// the gesture was already over.
    pub fn release(&mut self, minimap: &mut Minimap) -> Option<GestureRelease> {
        let snapshot = self.snapshot.take()?;
        minimap.set_dragging(false);
        let pixels_per_year = match snapshot.kind {
            DragKind::Move => snapshot.viewport.pixels_per_year,
            DragKind::ResizeStart | DragKind::ResizeEnd => {
                snapshot.viewport.viewport_width.max(1.0) / self.current.width().max(EPSILON)
            }
        };
        let viewport = ViewportCommand {
            pixels_per_year,
            viewport_offset: (self.current.start - snapshot.origin_year) * pixels_per_year,
        };
        info!("indicator gesture released: {viewport:?}");
        Some(GestureRelease {
            viewport,
            timer: self.edge_scroll.stop(),
        })
    }

    /// Abandon the gesture without changing the viewport.  Returns a timer
    /// cancel if auto-scroll was running.
    pub fn cancel(&mut self, minimap: &mut Minimap) -> Option<TimerCommand> {
        if self.snapshot.take().is_some() {
            minimap.set_dragging(false);
            debug!("indicator gesture cancelled");
        }
        self.edge_scroll.stop()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MinimapConfig;
    use crate::minimap::test::{scale, viewport};

    /// A minimap showing 1250 to 1650 (the viewport shows 1400 to 1500)
    fn minimap() -> (Minimap, LiveViewport) {
        let mut minimap = Minimap::new(&scale(), MinimapConfig::default());
        let viewport = viewport(1400.0, 1500.0);
        minimap.follow_viewport(&viewport);
        (minimap, viewport)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn move_commits_once_on_release() {
        let (mut minimap, viewport) = minimap();
        // 400 years across 400px
        let mut gesture = IndicatorGesture::begin(&mut minimap, DragKind::Move, 100.0, 400.0, &viewport);
        assert!(minimap.is_dragging());

        let update = gesture.pointer_move(&minimap, 150.0).unwrap();
        assert!(update.timers.is_empty());
        assert!(close(update.indicator.start_pct, 50.0));
        assert!(close(gesture.current().start, 1450.0));

        let release = gesture.release(&mut minimap).unwrap();
        assert_eq!(release.timer, None);
        assert_eq!(release.viewport.pixels_per_year, 10.0);
        assert!(close(release.viewport.viewport_offset, 5_000.0));
        assert!(!minimap.is_dragging());
    }

    #[test]
    fn torn_down_gestures_ignore_the_pointer() {
        let (mut minimap, viewport) = minimap();
        let mut gesture = IndicatorGesture::begin(&mut minimap, DragKind::Move, 100.0, 400.0, &viewport);
        assert!(gesture.release(&mut minimap).is_some());
        assert!(!gesture.is_active());
        assert!(gesture.pointer_move(&minimap, 300.0).is_none());
        assert!(gesture.tick(&mut minimap).is_none());
        assert!(gesture.release(&mut minimap).is_none());
        assert_eq!(gesture.cancel(&mut minimap), None);
    }

    #[test]
    fn snapshot_is_frozen() {
        let (mut minimap, viewport) = minimap();
        let mut gesture = IndicatorGesture::begin(&mut minimap, DragKind::Move, 100.0, 400.0, &viewport);
        gesture.pointer_move(&minimap, 120.0);
        let before = gesture.current();

        // Auto-follow is suspended, and even a change of range doesn't move
        // the years under the pointer
        assert!(!minimap.follow_viewport(&super::super::test::viewport(1000.0, 1010.0)));
        minimap.wheel_zoom(2.0, 10.0);
        gesture.pointer_move(&minimap, 120.0);
        assert_eq!(gesture.current(), before);
    }

    #[test]
    fn resize_zooms_the_viewport() {
        let (mut minimap, viewport) = minimap();
        // The right edge (1500) is at 250px
        let mut gesture =
            IndicatorGesture::begin(&mut minimap, DragKind::ResizeEnd, 250.0, 400.0, &viewport);
        gesture.pointer_move(&minimap, 350.0);
        assert!(close(gesture.current().end, 1600.0));

        let release = gesture.release(&mut minimap).unwrap();
        // 200 years across 1000px
        assert!(close(release.viewport.pixels_per_year, 5.0));
        assert!(close(release.viewport.viewport_offset, 2_250.0));
    }

    #[test]
    fn resize_keeps_a_minimum_width() {
        let (mut minimap, viewport) = minimap();
        // The left edge (1400) is at 150px
        let mut gesture =
            IndicatorGesture::begin(&mut minimap, DragKind::ResizeStart, 150.0, 400.0, &viewport);
        gesture.pointer_move(&minimap, 390.0);
        // 1% of 400 years
        assert!(close(gesture.current().width(), 4.0));
        assert!(close(gesture.current().end, 1500.0));
    }

    #[test]
    fn edge_auto_scroll() {
        let (mut minimap, viewport) = minimap();
        let mut gesture =
            IndicatorGesture::begin(&mut minimap, DragKind::ResizeEnd, 250.0, 400.0, &viewport);

        // 97.5% of the way across: start scrolling
        let update = gesture.pointer_move(&minimap, 390.0).unwrap();
        assert_eq!(update.timers, vec![TimerCommand::Start { interval_ms: 50 }]);
        assert!(close(gesture.current().end, 1640.0));

        // Still near the edge: no second timer
        let update = gesture.pointer_move(&minimap, 395.0).unwrap();
        assert!(update.timers.is_empty());

        // Each tick pans 2% of the range and carries the edge along
        gesture.tick(&mut minimap).unwrap();
        assert!(close(minimap.range().start, 1258.0));
        assert!(close(gesture.current().end, 1653.0));
        assert!(close(gesture.snapshot().unwrap().range_shift_years, 8.0));

        // Back away from the edge: cancel once
        let update = gesture.pointer_move(&minimap, 200.0).unwrap();
        assert_eq!(update.timers, vec![TimerCommand::Cancel]);
        assert!(close(gesture.current().end, 1458.0));
        assert!(gesture.tick(&mut minimap).is_none());

        let release = gesture.release(&mut minimap).unwrap();
        assert_eq!(release.timer, None);
        assert!(close(release.viewport.pixels_per_year, 1_000.0 / 58.0));
    }

    #[test]
    fn release_cancels_a_running_timer() {
        let (mut minimap, viewport) = minimap();
        let mut gesture =
            IndicatorGesture::begin(&mut minimap, DragKind::ResizeStart, 150.0, 400.0, &viewport);
        let update = gesture.pointer_move(&minimap, 5.0).unwrap();
        assert_eq!(update.timers, vec![TimerCommand::Start { interval_ms: 50 }]);
        let release = gesture.release(&mut minimap).unwrap();
        assert_eq!(release.timer, Some(TimerCommand::Cancel));
        assert_eq!(gesture.cancel(&mut minimap), None);
    }

    #[test]
    fn cancel_leaves_the_viewport_alone() {
        let (mut minimap, viewport) = minimap();
        let mut gesture = IndicatorGesture::begin(&mut minimap, DragKind::Move, 100.0, 400.0, &viewport);
        gesture.pointer_move(&minimap, 300.0);
        assert_eq!(gesture.cancel(&mut minimap), None);
        assert!(!minimap.is_dragging());
        assert!(gesture.release(&mut minimap).is_none());
    }
}
