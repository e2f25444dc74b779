// SPDX-License-Identifier: MIT

//!
//! Commands
//!
//! The engine never touches state owned by its host (the scroll container,
//! timers).  It asks for changes with these instead.
//!

use serde::Serialize;
use std::fmt::Debug;

/// Move and/or zoom the host's live viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportCommand {
    pub pixels_per_year: f64,

    /// The scroll offset (px) from the left edge of the canvas
    pub viewport_offset: f64,
}

/// Start or stop the host's repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerCommand {
    /// Call back every `interval_ms` until cancelled
    Start { interval_ms: u64 },
    Cancel,
}
