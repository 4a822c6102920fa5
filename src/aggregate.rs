// src/aggregate.rs
//! Classification and grouping: pure, total logic that maps one cycle's raw
//! item list to marker groups and the two sidebar views. No I/O.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Deserialize;

use crate::model::{CoordKey, Coordinate, NewsItem, NewsStatus};

/// What to do with items whose status is neither `coordinate_fetched` nor
/// `no_valid_coordinate`. The observed upstream behavior silently drops them;
/// routing them to the uncoordinated list is the conservative alternative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStatusPolicy {
    #[default]
    Drop,
    RouteToOther,
}

/// All items sharing one exact coordinate; rendered as a single marker.
#[derive(Debug, Clone)]
pub struct MarkerGroup {
    pub coordinate: Coordinate,
    pub items: Vec<NewsItem>,
}

/// One refresh cycle's aggregation result. Rebuilt from scratch every cycle;
/// owning it per cycle (instead of a shared marker table) is what keeps
/// overlapping refreshes from trampling each other.
#[derive(Debug, Default)]
pub struct Aggregated {
    groups: Vec<MarkerGroup>,
    index: HashMap<CoordKey, usize>,
    pub other_items: Vec<NewsItem>,
    pub all_items_sorted: Vec<NewsItem>,
}

impl Aggregated {
    pub fn marker_groups(&self) -> &[MarkerGroup] {
        &self.groups
    }

    /// Popup content lookup for a selected marker.
    pub fn group_for(&self, key: CoordKey) -> Option<&MarkerGroup> {
        self.index.get(&key).map(|&i| &self.groups[i])
    }

    /// True when there is nothing to show at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.other_items.is_empty()
    }

    /// Number of classified items across both views.
    pub fn item_count(&self) -> usize {
        self.all_items_sorted.len()
    }
}

/// Classify and group one cycle's items.
///
/// Every classified item lands in exactly one of {a marker group,
/// `other_items`} and exactly once in `all_items_sorted`. Grouping is keyed on
/// exact numeric coordinate equality; classification is the validator's call
/// alone, with `status` only gating whether the coordinate is considered.
pub fn aggregate(items: Vec<NewsItem>, policy: UnknownStatusPolicy) -> Aggregated {
    let mut out = Aggregated::default();

    // 1) Route each item by status + coordinate validity.
    for item in items {
        match item.status {
            NewsStatus::NoValidCoordinate => out.other_items.push(item),
            NewsStatus::CoordinateFetched => match item.usable_coordinate() {
                Some(coordinate) => {
                    let key = CoordKey::from(coordinate);
                    let idx = *out.index.entry(key).or_insert_with(|| {
                        out.groups.push(MarkerGroup {
                            coordinate,
                            items: Vec::new(),
                        });
                        out.groups.len() - 1
                    });
                    out.groups[idx].items.push(item);
                }
                // Status claims a coordinate but validation failed.
                None => out.other_items.push(item),
            },
            NewsStatus::Unknown => match policy {
                UnknownStatusPolicy::Drop => {}
                UnknownStatusPolicy::RouteToOther => out.other_items.push(item),
            },
        }
    }

    // 2) Popup order inside each group: newest first, unparsable dates last.
    for group in &mut out.groups {
        group.items.sort_by_key(|it| Reverse(it.date_sort_key()));
    }

    // 3) Combined view: everything classified, newest first.
    out.all_items_sorted = out
        .other_items
        .iter()
        .chain(out.groups.iter().flat_map(|g| g.items.iter()))
        .cloned()
        .collect();
    out.all_items_sorted
        .sort_by_key(|it| Reverse(it.date_sort_key()));

    out
}
