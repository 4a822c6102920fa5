// src/surface.rs
//! Seam to the visual layer. The map widget and sidebar DOM are external
//! collaborators; the pipeline only talks to them through this trait.

use crate::model::Coordinate;

/// The two sidebar card containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardList {
    /// Items without a usable coordinate, in feed order.
    Other,
    /// Every classified item, newest first.
    All,
}

/// Operations the refresh cycle performs against the visual surface.
pub trait MapSurface {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, coordinate: Coordinate, popup_html: &str);
    fn show_popup(&mut self, popup_html: &str, coordinate: Coordinate);
    fn hide_popup(&mut self);
    fn clear_cards(&mut self, list: CardList);
    fn append_card(&mut self, list: CardList, card_html: &str);
    fn show_empty_placeholder(&mut self, html: &str);
    fn set_last_update(&mut self, text: &str);
}

/// Surface that logs what a real widget would do. Used by the binary; handy
/// for eyeballing a cycle against a live feed.
#[derive(Debug, Default)]
pub struct TracingSurface;

impl MapSurface for TracingSurface {
    fn clear_markers(&mut self) {
        tracing::debug!("clearing markers");
    }

    fn add_marker(&mut self, coordinate: Coordinate, popup_html: &str) {
        tracing::info!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            popup_bytes = popup_html.len(),
            "marker added"
        );
    }

    fn show_popup(&mut self, popup_html: &str, coordinate: Coordinate) {
        tracing::info!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            popup_bytes = popup_html.len(),
            "popup shown"
        );
    }

    fn hide_popup(&mut self) {
        tracing::debug!("popup hidden");
    }

    fn clear_cards(&mut self, list: CardList) {
        tracing::debug!(?list, "card list cleared");
    }

    fn append_card(&mut self, list: CardList, card_html: &str) {
        tracing::debug!(?list, card_bytes = card_html.len(), "card appended");
    }

    fn show_empty_placeholder(&mut self, _html: &str) {
        tracing::info!("no items this cycle, showing placeholder");
    }

    fn set_last_update(&mut self, text: &str) {
        tracing::info!(last_update = text, "last-update text set");
    }
}
