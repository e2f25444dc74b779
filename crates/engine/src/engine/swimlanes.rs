// SPDX-License-Identifier: MIT

//!
//! Swimlanes: greedy interval packing into numbered lanes
//!

use crate::{EventItem, Lane, LayoutConfig, LayoutItem, PositionedEvent, round_f64_to_nearest_0_1};
use serde::Serialize;
use std::fmt::Debug;

/// The result of packing events into swimlanes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwimlaneLayout {
    pub items: Vec<LayoutItem>,
    pub lane_count: usize,
}

/// The horizontal extent an event occupies on its lane: its card, or its
/// date range if that is wider
fn occupied_max_x(event: &PositionedEvent, config: &LayoutConfig) -> f64 {
    let card_max_x = event.x + config.card_width;
    event.end_x.map_or(card_max_x, |end_x| end_x.max(card_max_x))
}

/// Put each event into the first lane whose previous occupant (plus the gap)
/// has ended before the event starts, opening a new lane if there is none.
///
/// Events are packed in chronological order (ties keep their given order),
/// which gives the fewest lanes such that no two items in a lane overlap.
pub fn layout_swimlanes(events: &[PositionedEvent], config: &LayoutConfig) -> SwimlaneLayout {
    let mut order: Vec<&PositionedEvent> = events.iter().collect();
    order.sort_by(|a, b| a.x.total_cmp(&b.x));

    // The x value each lane is occupied up to (gap included)
    let mut lane_ends: Vec<f64> = Vec::new();
    let mut items = Vec::with_capacity(order.len());
    for event in order {
        let event_min = round_f64_to_nearest_0_1(event.x);
        let lane_end = occupied_max_x(event, config) + config.gap;

        // If the event starts after whatever is in the lane it can go there
        let free_lane = lane_ends
            .iter()
            .position(|end| round_f64_to_nearest_0_1(*end) < event_min);
        let lane = match free_lane {
            Some(lane) => {
                lane_ends[lane] = lane_end;
                lane
            }
            None => {
                lane_ends.push(lane_end);
                lane_ends.len() - 1
            }
        };

        items.push(LayoutItem::Event(EventItem {
            id: event.id.clone(),
            x: event.x,
            lane: Lane::Index(lane),
            stack_index: 0,
        }));
    }

    SwimlaneLayout {
        items,
        lane_count: lane_ends.len(),
    }
}
