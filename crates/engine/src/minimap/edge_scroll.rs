// SPDX-License-Identifier: MIT

//!
//! Auto-scrolling the minimap while an indicator edge is held near the end of
//! the track
//!

use crate::TimerCommand;
use serde::Serialize;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Towards earlier years
    Backward,

    /// Towards later years
    Forward,
}

impl ScrollDirection {
    pub fn sign(&self) -> f64 {
        match self {
            ScrollDirection::Backward => -1.0,
            ScrollDirection::Forward => 1.0,
        }
    }
}

/// Which way to scroll (if at all) with the pointer `pointer_pct` of the way
/// across the track
pub fn edge_direction(pointer_pct: f64, threshold_pct: f64) -> Option<ScrollDirection> {
    if pointer_pct <= threshold_pct {
        Some(ScrollDirection::Backward)
    } else if pointer_pct >= 100.0 - threshold_pct {
        Some(ScrollDirection::Forward)
    } else {
        None
    }
}

/// Tracks the host's auto-scroll timer.  There is at most one timer, and it
/// is only ever started and cancelled once per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeAutoScroll {
    interval_ms: u64,

    /// The direction of the running timer (`None` if no timer is running)
    direction: Option<ScrollDirection>,
}

impl EdgeAutoScroll {
    pub fn new(interval_ms: u64) -> Self {
        EdgeAutoScroll {
            interval_ms,
            direction: None,
        }
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.direction.is_some()
    }

    /// Scroll in `direction` (or stop, if `None`).  Asking for the direction
    /// already being scrolled in does nothing.
    pub fn steer(&mut self, direction: Option<ScrollDirection>) -> Vec<TimerCommand> {
        if direction == self.direction {
            return Vec::new();
        }
        let mut commands = Vec::with_capacity(2);
        commands.extend(self.stop());
        if let Some(direction) = direction {
            self.direction = Some(direction);
            commands.push(TimerCommand::Start {
                interval_ms: self.interval_ms,
            });
        }
        commands
    }

    /// Stop scrolling.  Only returns a cancel if a timer was running.
    pub fn stop(&mut self) -> Option<TimerCommand> {
        self.direction.take().map(|_| TimerCommand::Cancel)
    }
}
