// SPDX-License-Identifier: MIT

//!
//! Layout items
//!

use serde::Serialize;
use std::fmt::Debug;
use timescape_core::EventId;

/// An event that has been placed on the time axis (the input to lane packing)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    pub id: EventId,

    /// Pixel position of the start date
    pub x: f64,

    /// Pixel position of the end date (if the event has one)
    pub end_x: Option<f64>,

    /// Decimal year of the start date
    pub year: f64,

    /// Decimal year of the end date (the start year if there's no end)
    pub end_year: f64,

    pub milestone: bool,
}

/// Which lane an item has been put in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Above the time axis of a two-sided track
    Above,

    /// Below the time axis of a two-sided track
    Below,

    /// A numbered swimlane (0 is the first)
    Index(usize),
}

/// A single event card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventItem {
    pub id: EventId,
    pub x: f64,
    pub lane: Lane,

    /// Distance from the time axis (0 is closest)
    pub stack_index: usize,
}

/// A group of events too dense to draw individually
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterItem {
    pub id: EventId,
    pub x: f64,
    pub lane: Lane,
    pub member_ids: Vec<EventId>,
    pub start_year: f64,
    pub end_year: f64,
}

/// Information needed to draw one item of a layout (for use outside of the
/// engine)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutItem {
    Event(EventItem),
    Cluster(ClusterItem),
}

impl LayoutItem {
    pub fn id(&self) -> &EventId {
        match self {
            LayoutItem::Event(item) => &item.id,
            LayoutItem::Cluster(item) => &item.id,
        }
    }

    pub fn x(&self) -> f64 {
        match self {
            LayoutItem::Event(item) => item.x,
            LayoutItem::Cluster(item) => item.x,
        }
    }

    pub fn lane(&self) -> Lane {
        match self {
            LayoutItem::Event(item) => item.lane,
            LayoutItem::Cluster(item) => item.lane,
        }
    }

    /// Clusters always sit next to the axis
    pub fn stack_index(&self) -> usize {
        match self {
            LayoutItem::Event(item) => item.stack_index,
            LayoutItem::Cluster(_) => 0,
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, LayoutItem::Cluster(_))
    }
}
