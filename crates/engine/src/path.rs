// SPDX-License-Identifier: MIT

//!
//! Paths that time flows along
//!
//! Curved visualisations place events along a path rather than a straight
//! axis.  Two flavours are offered:
//!
//! - [`GeneratedPath`]: a sampled path made of seeded sine waves.  Its `x`
//!   coordinate is linear in time, so lookups are by the time parameter `t`.
//! - [`WaypointPath`]: cubic Bézier segments through waypoints.  Bézier
//!   parameters aren't proportional to distance, so lookups go through an
//!   [`ArcLengthTable`].
//!
//! Both can be turned into SVG path data for drawing.
//!

mod arc_length;
mod bezier;
mod sampled;

pub use arc_length::*;
pub use bezier::*;
pub use sampled::*;

/// Format a coordinate for SVG path data
pub(crate) fn svg_number(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => String::from("0"),
        text => text.to_string(),
    }
}
