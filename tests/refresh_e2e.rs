// tests/refresh_e2e.rs
// Full cycle against a mock source and a recording surface: clear-first
// semantics, marker/card pushes, the empty placeholder, and popup reopening.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use newsmap::{
    CardList, CoordKey, Coordinate, FeedSource, MapSurface, NewsItem, NewsStatus, NewsmapConfig,
    RefreshCycle, UnknownStatusPolicy,
};

#[derive(Debug, PartialEq)]
enum Event {
    ClearMarkers,
    AddMarker(String),
    ShowPopup(String),
    HidePopup,
    ClearCards(CardList),
    AppendCard(CardList),
    Placeholder,
}

#[derive(Default)]
struct RecordingSurface {
    events: Vec<Event>,
}

impl RecordingSurface {
    fn count(&self, f: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| f(e)).count()
    }
}

impl MapSurface for RecordingSurface {
    fn clear_markers(&mut self) {
        self.events.push(Event::ClearMarkers);
    }
    fn add_marker(&mut self, _coordinate: Coordinate, popup_html: &str) {
        self.events.push(Event::AddMarker(popup_html.to_string()));
    }
    fn show_popup(&mut self, popup_html: &str, _coordinate: Coordinate) {
        self.events.push(Event::ShowPopup(popup_html.to_string()));
    }
    fn hide_popup(&mut self) {
        self.events.push(Event::HidePopup);
    }
    fn clear_cards(&mut self, list: CardList) {
        self.events.push(Event::ClearCards(list));
    }
    fn append_card(&mut self, list: CardList, _card_html: &str) {
        self.events.push(Event::AppendCard(list));
    }
    fn show_empty_placeholder(&mut self, _html: &str) {
        self.events.push(Event::Placeholder);
    }
    fn set_last_update(&mut self, _text: &str) {}
}

struct FixedSource {
    items: Vec<NewsItem>,
}

#[async_trait]
impl FeedSource for FixedSource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<NewsItem>> {
        if date == Local::now().date_naive() {
            Ok(self.items.clone())
        } else {
            Ok(Vec::new())
        }
    }
    fn name(&self) -> &str {
        "fixed"
    }
}

struct DeadSource;

#[async_trait]
impl FeedSource for DeadSource {
    async fn fetch_day(&self, _date: NaiveDate) -> Result<Vec<NewsItem>> {
        Err(anyhow!("unreachable"))
    }
    fn name(&self) -> &str {
        "dead"
    }
}

fn config() -> NewsmapConfig {
    NewsmapConfig {
        // Metadata lookup disabled so the cycle stays offline.
        metadata_url: String::new(),
        days: 7,
        unknown_status_policy: UnknownStatusPolicy::Drop,
        ..NewsmapConfig::default()
    }
}

fn item(status: NewsStatus, coord: Option<(f64, f64)>, desc: &str, date: &str) -> NewsItem {
    NewsItem {
        description: desc.to_string(),
        date: date.to_string(),
        status,
        coordinate: coord.map(|(la, lo)| Coordinate::new(la, lo)),
        links: Vec::new(),
    }
}

#[tokio::test]
async fn cycle_clears_surface_before_writing() {
    let source = Arc::new(FixedSource {
        items: vec![item(NewsStatus::CoordinateFetched, Some((40.0, -74.0)), "a", "2024-01-01")],
    });
    let mut surface = RecordingSurface::default();
    RefreshCycle::run(source, &mut surface, &config()).await;

    let first_write = surface
        .events
        .iter()
        .position(|e| matches!(e, Event::AddMarker(_) | Event::AppendCard(_)))
        .unwrap();
    let clears = [
        Event::HidePopup,
        Event::ClearMarkers,
        Event::ClearCards(CardList::Other),
        Event::ClearCards(CardList::All),
    ];
    for clear in &clears {
        let pos = surface.events.iter().position(|e| e == clear).unwrap();
        assert!(pos < first_write, "{clear:?} must precede the first write");
    }
}

#[tokio::test]
async fn cycle_pushes_one_marker_per_group_and_cards_per_view() {
    let source = Arc::new(FixedSource {
        items: vec![
            item(NewsStatus::CoordinateFetched, Some((40.0, -74.0)), "a", "2024-01-02"),
            item(NewsStatus::CoordinateFetched, Some((40.0, -74.0)), "b", "2024-01-01"),
            item(NewsStatus::NoValidCoordinate, None, "c", "2024-01-03"),
        ],
    });
    let mut surface = RecordingSurface::default();
    RefreshCycle::run(source, &mut surface, &config()).await;

    assert_eq!(surface.count(|e| matches!(e, Event::AddMarker(_))), 1);
    assert_eq!(
        surface.count(|e| matches!(e, Event::AppendCard(CardList::Other))),
        1
    );
    assert_eq!(
        surface.count(|e| matches!(e, Event::AppendCard(CardList::All))),
        3
    );
    assert_eq!(surface.count(|e| matches!(e, Event::Placeholder)), 0);

    // The merged popup carries both co-located items, newest first.
    let popup = surface
        .events
        .iter()
        .find_map(|e| match e {
            Event::AddMarker(html) => Some(html.clone()),
            _ => None,
        })
        .unwrap();
    assert!(popup.find('a').is_some());
    assert!(popup.find("a<").unwrap_or(usize::MAX) < popup.find("b<").unwrap_or(usize::MAX));
}

#[tokio::test]
async fn dead_feed_renders_placeholder_not_error() {
    let mut surface = RecordingSurface::default();
    let cycle = RefreshCycle::run(Arc::new(DeadSource), &mut surface, &config()).await;

    assert!(cycle.aggregated().is_empty());
    assert_eq!(surface.count(|e| matches!(e, Event::AddMarker(_))), 0);
    assert_eq!(surface.count(|e| matches!(e, Event::AppendCard(_))), 0);
    assert_eq!(surface.count(|e| matches!(e, Event::Placeholder)), 1);
}

#[tokio::test]
async fn marker_popup_can_be_reopened_by_key() {
    let source = Arc::new(FixedSource {
        items: vec![item(NewsStatus::CoordinateFetched, Some((40.0, -74.0)), "a", "2024-01-01")],
    });
    let mut surface = RecordingSurface::default();
    let cycle = RefreshCycle::run(source, &mut surface, &config()).await;

    let key = CoordKey::from(Coordinate::new(40.0, -74.0));
    assert!(cycle.popup_for_marker(key).is_some());
    assert!(cycle.show_popup_for_marker(key, &mut surface));
    assert_eq!(surface.count(|e| matches!(e, Event::ShowPopup(_))), 1);

    let missing = CoordKey::from(Coordinate::new(0.0, 0.0));
    assert!(cycle.popup_for_marker(missing).is_none());
    assert!(!cycle.show_popup_for_marker(missing, &mut surface));
}
