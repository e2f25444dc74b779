// SPDX-License-Identifier: MIT

//!
//! Two-sided track layout (cards above and below a central time axis)
//!

use crate::{ClusterItem, EventItem, Lane, LayoutConfig, LayoutItem, PositionedEvent};
use log::trace;
use serde::Serialize;
use std::fmt::Debug;
use timescape_core::EventId;

/// Milestones are never stacked closer to the axis than this
const MIN_MILESTONE_STACK_INDEX: usize = 5;

/// Extra stack slots left between ordinary events and milestones
const MILESTONE_STACK_GAP: usize = 4;

/// The result of laying events out along a two-sided track
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackLayout {
    pub items: Vec<LayoutItem>,

    /// The number of overlap groups found
    pub group_count: usize,
}

/// Collect events into runs that start within one card (plus gap) of the
/// run's first event
fn overlap_groups<'a>(events: &[&'a PositionedEvent], min_separation: f64) -> Vec<Vec<&'a PositionedEvent>> {
    let mut groups: Vec<Vec<&PositionedEvent>> = Vec::new();
    for &event in events {
        match groups.last_mut() {
            Some(group) if event.x - group[0].x < min_separation => group.push(event),
            _ => groups.push(vec![event]),
        }
    }
    groups
}

/// Collapse a whole group into one cluster at the first member's position
fn cluster(group: &[&PositionedEvent], lane: Lane) -> LayoutItem {
    let first = group[0];
    let start_year = group.iter().map(|event| event.year).fold(f64::INFINITY, f64::min);
    let end_year = group
        .iter()
        .map(|event| event.end_year)
        .fold(f64::NEG_INFINITY, f64::max);
    LayoutItem::Cluster(ClusterItem {
        id: EventId::from(format!("cluster-{}", first.id)),
        x: first.x,
        lane,
        member_ids: group.iter().map(|event| event.id.clone()).collect(),
        start_year,
        end_year,
    })
}

/// Stack a group's members away from the axis.  Ordinary events take the
/// slots nearest the axis; milestones are pushed well clear of them.
fn stack(group: &[&PositionedEvent], lane: Lane, items: &mut Vec<LayoutItem>) {
    let regular_count = group.iter().filter(|event| !event.milestone).count();
    let first_milestone_index = (regular_count + MILESTONE_STACK_GAP).max(MIN_MILESTONE_STACK_INDEX);

    let mut next_regular = 0;
    let mut next_milestone = first_milestone_index;
    for event in group {
        let stack_index = if event.milestone {
            next_milestone += 1;
            next_milestone - 1
        } else {
            next_regular += 1;
            next_regular - 1
        };
        items.push(LayoutItem::Event(EventItem {
            id: event.id.clone(),
            x: event.x,
            lane,
            stack_index,
        }));
    }
}

/// Lay events out above and below the time axis.
///
/// Overlapping events are grouped, and groups alternate between the two
/// sides in time order.  A group with at least `cluster_threshold` members
/// becomes a single cluster; a smaller group is stacked.
pub fn layout_track(events: &[PositionedEvent], config: &LayoutConfig) -> TrackLayout {
    let mut order: Vec<&PositionedEvent> = events.iter().collect();
    order.sort_by(|a, b| a.x.total_cmp(&b.x));

    let groups = overlap_groups(&order, config.min_separation());
    let mut items = Vec::with_capacity(order.len());
    for (i, group) in groups.iter().enumerate() {
        let lane = if i % 2 == 0 { Lane::Above } else { Lane::Below };
        if group.len() >= config.cluster_threshold {
            trace!("clustering {} events at x = {}", group.len(), group[0].x);
            items.push(cluster(group, lane));
        } else {
            stack(group, lane, &mut items);
        }
    }

    TrackLayout {
        items,
        group_count: groups.len(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn event(id: &str, x: f64) -> PositionedEvent {
        PositionedEvent {
            id: EventId::from(id),
            x,
            end_x: None,
            year: 2000.0 + x / 100.0,
            end_year: 2000.0 + x / 100.0,
            milestone: false,
        }
    }

    fn milestone(id: &str, x: f64) -> PositionedEvent {
        PositionedEvent {
            milestone: true,
            ..event(id, x)
        }
    }

    fn config() -> LayoutConfig {
        LayoutConfig {
            card_width: 100.0,
            gap: 10.0,
            cluster_threshold: 4,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn five_overlapping_events_cluster() {
        let events: Vec<PositionedEvent> = (0..5)
            .map(|i| event(&format!("e{i}"), f64::from(i) * 10.0))
            .collect();
        let layout = layout_track(&events, &config());
        assert_eq!(layout.items.len(), 1);
        let LayoutItem::Cluster(cluster) = &layout.items[0] else {
            panic!("expected a cluster");
        };
        assert_eq!(cluster.id.as_str(), "cluster-e0");
        assert_eq!(cluster.x, 0.0);
        assert_eq!(cluster.lane, Lane::Above);
        assert_eq!(cluster.member_ids.len(), 5);
        assert_eq!(cluster.start_year, 2000.0);
        assert_eq!(cluster.end_year, 2000.4);
    }

    #[test]
    fn three_overlapping_events_stack() {
        let events = [event("a", 0.0), event("b", 20.0), event("c", 40.0)];
        let layout = layout_track(&events, &config());
        assert_eq!(layout.items.len(), 3);
        let stacks: Vec<usize> = layout.items.iter().map(LayoutItem::stack_index).collect();
        assert_eq!(stacks, vec![0, 1, 2]);
        assert!(layout.items.iter().all(|item| item.lane() == Lane::Above));
    }

    #[test]
    fn groups_alternate_sides() {
        let events = [
            event("a", 0.0),
            event("b", 200.0),
            event("c", 400.0),
            event("d", 450.0),
        ];
        let layout = layout_track(&events, &config());
        assert_eq!(layout.group_count, 3);
        let lanes: Vec<Lane> = layout.items.iter().map(LayoutItem::lane).collect();
        assert_eq!(lanes, vec![Lane::Above, Lane::Below, Lane::Above, Lane::Above]);
    }

    #[test]
    fn groups_are_anchored_on_their_first_event() {
        // Each event overlaps the previous one, but "c" is too far from "a"
        let events = [event("a", 0.0), event("b", 100.0), event("c", 200.0)];
        let layout = layout_track(&events, &config());
        assert_eq!(layout.group_count, 2);
        assert_eq!(layout.items[2].lane(), Lane::Below);
        assert_eq!(layout.items[2].stack_index(), 0);
    }

    #[test]
    fn milestones_are_pushed_clear() {
        let events = [event("a", 0.0), milestone("m", 10.0)];
        let layout = layout_track(&events, &config());
        assert_eq!(layout.items[0].stack_index(), 0);
        assert_eq!(layout.items[1].stack_index(), 5);

        let events = [
            event("a", 0.0),
            milestone("m1", 5.0),
            event("b", 10.0),
            milestone("m2", 15.0),
        ];
        let config = LayoutConfig {
            cluster_threshold: 10,
            ..config()
        };
        let layout = layout_track(&events, &config);
        let stacks: Vec<usize> = layout.items.iter().map(LayoutItem::stack_index).collect();
        assert_eq!(stacks, vec![0, 6, 1, 7]);
    }

    #[test]
    fn no_overlap_on_the_axis() {
        let config = config();
        let events: Vec<PositionedEvent> = (0..200)
            .map(|i| event(&format!("e{i}"), f64::from(i * i % 997) * 3.0))
            .collect();
        let layout = layout_track(&events, &config);
        for lane in [Lane::Above, Lane::Below] {
            let mut xs: Vec<f64> = layout
                .items
                .iter()
                .filter(|item| item.lane() == lane && item.stack_index() == 0)
                .map(LayoutItem::x)
                .collect();
            xs.sort_by(f64::total_cmp);
            for pair in xs.windows(2) {
                assert!(pair[1] - pair[0] >= config.min_separation());
            }
        }
    }

    #[test]
    fn idempotent_and_empty() {
        let events = [event("a", 0.0), event("b", 5.0), event("c", 500.0)];
        assert_eq!(layout_track(&events, &config()), layout_track(&events, &config()));
        assert_eq!(layout_track(&[], &config()), TrackLayout::default());
    }
}
