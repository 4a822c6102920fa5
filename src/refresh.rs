// src/refresh.rs
//! One refresh cycle: load feeds, aggregate, render, push to the surface.
//! The cycle never fails; the worst outcome is an empty render with the
//! placeholder shown.

use std::sync::Arc;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::aggregate::{aggregate, Aggregated};
use crate::config::NewsmapConfig;
use crate::feed::{load_recent, FeedSource};
use crate::model::CoordKey;
use crate::render;
use crate::surface::{CardList, MapSurface};
use crate::{feed, metadata};

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("refresh_runs_total", "Completed refresh cycles.");
        describe_gauge!("refresh_last_run_ts", "Unix ts of the last refresh cycle.");
        describe_gauge!("refresh_marker_groups", "Marker groups in the last cycle.");
        describe_gauge!("refresh_items", "Classified items in the last cycle.");
    });
}

/// The completed cycle. Owns its aggregation result so late marker clicks
/// resolve against the data that produced the markers, not whatever a newer
/// cycle is mid-way through writing.
#[derive(Debug)]
pub struct RefreshCycle {
    aggregated: Aggregated,
}

impl RefreshCycle {
    /// Run one full cycle against `source`, driving `surface`.
    ///
    /// Display state is cleared eagerly before any new data lands, so a
    /// reader mid-refresh sees an empty surface rather than a stale mix.
    pub async fn run(
        source: Arc<dyn FeedSource>,
        surface: &mut dyn MapSurface,
        config: &NewsmapConfig,
    ) -> Self {
        ensure_metrics_described();

        surface.hide_popup();
        surface.clear_markers();
        surface.clear_cards(CardList::Other);
        surface.clear_cards(CardList::All);

        let items = load_recent(source, config.days).await;
        let aggregated = aggregate(items, config.unknown_status_policy);

        for group in aggregated.marker_groups() {
            surface.add_marker(group.coordinate, &render::render_popup(&group.items));
        }
        for item in &aggregated.other_items {
            surface.append_card(CardList::Other, &render::render_card(item));
        }
        for item in &aggregated.all_items_sorted {
            surface.append_card(CardList::All, &render::render_card(item));
        }
        if aggregated.is_empty() {
            surface.show_empty_placeholder(&render::empty_placeholder());
        }

        if !config.metadata_url.is_empty() {
            let last_update = metadata::fetch_last_update(&config.metadata_url).await;
            surface.set_last_update(&last_update);
        }

        counter!("refresh_runs_total").increment(1);
        gauge!("refresh_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        gauge!("refresh_marker_groups").set(aggregated.marker_groups().len() as f64);
        gauge!("refresh_items").set(aggregated.item_count() as f64);

        tracing::info!(
            days = config.days,
            marker_groups = aggregated.marker_groups().len(),
            other_items = aggregated.other_items.len(),
            items = aggregated.item_count(),
            "refresh cycle complete"
        );

        Self { aggregated }
    }

    pub fn aggregated(&self) -> &Aggregated {
        &self.aggregated
    }

    /// Popup markup for a marker, looked up by its grouping key. `None` when
    /// the key belongs to no group in this cycle.
    pub fn popup_for_marker(&self, key: CoordKey) -> Option<String> {
        self.aggregated
            .group_for(key)
            .map(|g| render::render_popup(&g.items))
    }

    /// Re-open the popup for the marker a sidebar card belongs to.
    pub fn show_popup_for_marker(&self, key: CoordKey, surface: &mut dyn MapSurface) -> bool {
        match self.aggregated.group_for(key) {
            Some(group) => {
                surface.show_popup(&render::render_popup(&group.items), group.coordinate);
                true
            }
            None => false,
        }
    }
}

/// Convenience wrapper for the binary: HTTP source from config.
pub async fn run_http_refresh(config: &NewsmapConfig, surface: &mut dyn MapSurface) -> RefreshCycle {
    let source: Arc<dyn FeedSource> = Arc::new(feed::HttpFeedSource::new(&config.feed_base_url));
    RefreshCycle::run(source, surface, config).await
}
