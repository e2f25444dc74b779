// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Timescape project*
//!
//! This crate works out where things go on a timeline.  It doesn't draw
//! anything: frontends hand it events and their viewport, and it hands back
//! positions, lanes, clusters, paths, and commands.
//!
//! The engine is responsible for:
//!
//! - Mapping dates (BCE included) to pixels at a given zoom
//! - Picking a sensible starting zoom for the data
//! - Packing event cards into lanes, stacks, and clusters so none overlap
//! - Generating the curved paths some visualisations lay time along
//! - Keeping a minimap in sync with the viewport, and turning minimap
//!   gestures into viewport changes
//!
//! Everything is synchronous and recomputed from scratch when an input
//! changes.  [`Engine`] bundles the inputs and caches the last layout.
//!
//! ## Usage
//!
//! ```
//! use timescape_core::Event;
//! use timescape_engine::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.set_events(vec![
//!     Event::new("founding", "-0753-04-21"),
//!     Event::new("fall", "0476-09-04"),
//! ]);
//! engine.auto_fit(1_200.0);
//! let layout = engine.layout();
//! assert_eq!(layout.track.items.len(), 2);
//! ```
//!

pub mod config;
pub mod engine;
pub mod minimap;
pub mod path;
pub mod viewport;

pub use config::*;
pub use engine::*;
pub use minimap::*;
pub use path::*;
pub use viewport::*;
