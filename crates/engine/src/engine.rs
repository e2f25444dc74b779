// SPDX-License-Identifier: MIT

//!
//! The timeline engine
//!

mod auto_fit;
mod commands;
mod helpers;
mod item;
mod point;
mod scale;
mod swimlanes;
mod ticks;
mod track;

pub(crate) use helpers::*;

pub use auto_fit::*;
pub use commands::*;
pub use item::*;
use log::{debug, info, trace};
pub use point::*;
pub use scale::*;
pub use swimlanes::*;
pub use ticks::*;
pub use track::*;

use crate::{
    EngineConfig, GeneratedPath, LayoutConfig, LiveViewport, Minimap, NormalizedViewport,
    WaypointPath, generate_path, river_waypoints,
};
use serde::Serialize;
use timescape_core::Event;

/// Axis ticks are never drawn closer together than this (px)
pub const TICK_MIN_SPACING_PX: f64 = 80.0;

/// Everything needed to draw a timeline at the current zoom (for use outside
/// of the engine)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub scale: TimeScale,
    pub track: TrackLayout,
    pub swimlanes: SwimlaneLayout,
    pub ticks: Vec<AxisTick>,
}

/// Every input a [`TimelineLayout`] depends on
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutKey {
    events_revision: u64,
    pixels_per_year: f64,
    layout: LayoutConfig,
}

/// The `timescape` engine.  This owns the events and the zoom, tracks the
/// host's viewport, and lays everything out on demand.
///
/// Layouts are never patched: when any input changes the next call to
/// [`Engine::layout`] recomputes everything from scratch.
#[derive(Debug, Clone)]
pub struct Engine {
    events: Vec<Event>,

    /// Bumped whenever the events are replaced
    events_revision: u64,

    config: EngineConfig,

    /// The timeline's zoom level
    pixels_per_year: f64,

    /// The host's scroll container, as last reported (or as last commanded)
    viewport: LiveViewport,

    /// The last layout computed, and what it was computed from
    cache: Option<(LayoutKey, TimelineLayout)>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let pixels_per_year = config.layout.pixels_per_year;
        Self {
            events: Vec::new(),
            events_revision: 0,
            config,
            pixels_per_year,
            viewport: LiveViewport {
                viewport_offset: 0.0,
                viewport_width: 0.0,
                pixels_per_year,
            },
            cache: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.set_pixels_per_year(self.pixels_per_year);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Replace all events
    pub fn set_events(&mut self, events: Vec<Event>) {
        debug!("Setting {} events", events.len());
        self.events = events;
        self.events_revision += 1;
    }

    pub fn clear_events(&mut self) {
        self.set_events(Vec::new());
    }

    pub fn pixels_per_year(&self) -> f64 {
        self.pixels_per_year
    }

    /// The furthest it's possible to zoom in: the configured `zoom_max`, or
    /// further if the events are so close together that they need it
    pub fn zoom_ceiling(&self) -> f64 {
        self.data_aware_zoom_max().max(self.config.layout.zoom_max)
    }

    /// See [`data_aware_zoom_max`]
    pub fn data_aware_zoom_max(&self) -> f64 {
        let years: Vec<f64> = self
            .events
            .iter()
            .map(|event| event.start().decimal_year())
            .collect();
        data_aware_zoom_max(&years, &self.config.layout)
    }

    fn clamp_zoom(&self, pixels_per_year: f64) -> f64 {
        if !pixels_per_year.is_finite() {
            return self.pixels_per_year;
        }
        pixels_per_year.clamp(self.config.layout.zoom_min, self.zoom_ceiling())
    }

    /// Set the zoom (use for jumping to zoom level).  Values are clamped
    /// between `zoom_min` and the zoom ceiling.
    pub fn set_pixels_per_year(&mut self, pixels_per_year: f64) {
        self.pixels_per_year = self.clamp_zoom(pixels_per_year);
        self.viewport.pixels_per_year = self.pixels_per_year;
    }

    pub fn viewport(&self) -> LiveViewport {
        self.viewport
    }

    /// Record the host's scroll container state
    pub fn set_viewport(&mut self, viewport: LiveViewport) {
        self.viewport = viewport;
        self.set_pixels_per_year(viewport.pixels_per_year);
    }

    /// Apply a command (e.g. from a minimap gesture) to the viewport
    ///
    /// If the commanded zoom is clamped the offset is rescaled so the
    /// viewport still starts at the commanded year.
    pub fn apply(&mut self, command: ViewportCommand) -> ViewportCommand {
        self.set_pixels_per_year(command.pixels_per_year);
        self.viewport.viewport_offset = if command.pixels_per_year.is_finite()
            && command.pixels_per_year > 0.0
            && self.pixels_per_year != command.pixels_per_year
        {
            let start_year = command.viewport_offset / command.pixels_per_year;
            trace!("Zoom clamped to {} px per year, keeping year {start_year}", self.pixels_per_year);
            start_year * self.pixels_per_year
        } else {
            command.viewport_offset
        };
        self.viewport_command()
    }

    /// The current zoom and offset, for the host to apply
    pub fn viewport_command(&self) -> ViewportCommand {
        ViewportCommand {
            pixels_per_year: self.pixels_per_year,
            viewport_offset: self.viewport.viewport_offset,
        }
    }

    /// The time scale for the current events and zoom
    pub fn scale(&self) -> TimeScale {
        TimeScale::from_config(&self.events, &self.config.layout, self.pixels_per_year)
    }

    /// Pick a starting zoom for a viewport `viewport_width` pixels wide and
    /// scroll to the start of the data
    pub fn auto_fit(&mut self, viewport_width: f64) -> AutoFit {
        let data_span_years = self.scale().data_span_years();
        let fit = compute_auto_fit_zoom(
            self.events.len(),
            data_span_years,
            viewport_width,
            &self.config.layout,
        );
        self.set_pixels_per_year(fit.pixels_per_year);

        // Show the display padding (rather than the scale's padding) before
        // the first event
        let padding_years = self.config.layout.padding_before_years - fit.padding_years;
        self.viewport.viewport_width = viewport_width.max(0.0);
        self.viewport.viewport_offset = (padding_years * self.pixels_per_year).max(0.0);
        info!("Auto-fit to {} px per year", self.pixels_per_year);
        fit
    }

    /// Zoom by `factor` (above 1 zooms in) around `anchor_px`, a position
    /// within the viewport, keeping the year under it where it is
    pub fn zoom_by(&mut self, factor: f64, anchor_px: f64) -> ViewportCommand {
        if !(factor.is_finite() && factor > 0.0) {
            return self.viewport_command();
        }
        let pixels_per_year = self.clamp_zoom(self.pixels_per_year * factor);

        // The factor actually used, after clamping
        let factor = pixels_per_year / self.pixels_per_year;
        self.viewport.viewport_offset = (self.viewport.viewport_offset + anchor_px) * factor - anchor_px;
        self.set_pixels_per_year(pixels_per_year);
        trace!("Zoomed to {} px per year", self.pixels_per_year);
        self.viewport_command()
    }

    fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            events_revision: self.events_revision,
            pixels_per_year: self.pixels_per_year,
            layout: self.config.layout,
        }
    }

    /// Whether [`Engine::layout`] would return the last layout as is
    pub fn is_layout_current(&self) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|(key, _)| *key == self.layout_key())
    }

    /// Lay out the events at the current zoom.  Recomputed only when an input
    /// has changed since the last call.
    pub fn layout(&mut self) -> &TimelineLayout {
        let key = self.layout_key();
        let cache = match self.cache.take() {
            Some((cached, layout)) if cached == key => {
                trace!("Layout unchanged");
                (cached, layout)
            }
            _ => (key, compute_layout(&self.events, &self.config.layout, self.pixels_per_year)),
        };
        &self.cache.insert(cache).1
    }

    /// A minimap for the current scale
    pub fn minimap(&self) -> Minimap {
        Minimap::new(&self.scale(), self.config.minimap)
    }

    /// The sampled path spanning the whole canvas
    pub fn path(&self) -> Option<GeneratedPath> {
        generate_path(self.scale().total_width(), &self.config.path)
    }

    /// The waypoint (river) path spanning the whole canvas
    pub fn river_path(&self) -> Option<WaypointPath> {
        let waypoints = river_waypoints(self.scale().total_width(), &self.config.path);
        WaypointPath::through(&waypoints, self.config.path.bezier_steps_per_segment)
    }

    /// The viewport as fractions of the canvas
    pub fn normalized_viewport(&self) -> NormalizedViewport {
        NormalizedViewport::from_viewport(&self.viewport, &self.scale())
    }

    /// Show the part of the canvas described by `normalized`.  Returns `None`
    /// (and changes nothing) if there is nothing on the canvas.
    pub fn restore_viewport(&mut self, normalized: NormalizedViewport) -> Option<ViewportCommand> {
        let command = normalized.restore(&self.scale(), self.viewport.viewport_width)?;
        Some(self.apply(command))
    }
}

/// Re-run all calculations
fn compute_layout(events: &[Event], config: &LayoutConfig, pixels_per_year: f64) -> TimelineLayout {
    let scale = TimeScale::from_config(events, config, pixels_per_year);
    let positioned = scale.position_events(events);
    let track = layout_track(&positioned, config);
    let swimlanes = layout_swimlanes(&positioned, config);
    let ticks = axis_ticks(&scale, TICK_MIN_SPACING_PX);
    debug!(
        "Laid out {} events: {} track items, {} swimlanes, {} ticks",
        events.len(),
        track.items.len(),
        swimlanes.lane_count,
        ticks.len()
    );
    TimelineLayout {
        scale,
        track,
        swimlanes,
        ticks,
    }
}
