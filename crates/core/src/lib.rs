// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Timescape project*
//!
//! This crate defines the basic datatypes used across the Timescape project:
//! the calendar date (with its decimal year linearisation) and the events
//! that are laid out.
//!
//! Dates come in two flavours of construction.  Strict construction
//! ([`CalendarDate::from_ymd`], `str::parse`) rejects bad input with a
//! [`DateError`].  Soft construction ([`CalendarDate::parse`]) never fails,
//! which is what the layout engine uses so that one bad date can't stop a
//! whole timeline being drawn.
//!

mod date;
mod event;

pub use date::*;
pub use event::*;

/// Compile time checked [`CalendarDate`] literals, e.g. `date!("-0044-03-15")`
pub use timescape_macros::date;
