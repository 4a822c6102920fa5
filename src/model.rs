// src/model.rs
//! Feed-facing data model: news items, link lists, coordinate validity,
//! and the exact-equality grouping key used by the aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// One source/url pair attached to a news item. Feeds sometimes omit either
/// field; both degrade to empty strings rather than rejecting the item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsLink {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
}

/// Processing status stamped on each item by the upstream pipeline.
///
/// The presentation pipeline only distinguishes three states; everything else
/// the backend emits (`fetched`, `poi_fetched`, ...) lands on `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsStatus {
    CoordinateFetched,
    NoValidCoordinate,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A latitude/longitude pair as supplied by the feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether this pair is usable for placing a marker.
    ///
    /// `(-1, -1)` is the upstream convention for "geocoding attempted but
    /// failed" and is rejected along with non-finite values.
    pub fn is_usable(&self) -> bool {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return false;
        }
        !(self.latitude == -1.0 && self.longitude == -1.0)
    }
}

/// Grouping identity: two items share a marker iff their coordinates are
/// numerically equal. No rounding, no tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_bits: u64,
    lon_bits: u64,
}

impl From<Coordinate> for CoordKey {
    fn from(c: Coordinate) -> Self {
        // +0.0 and -0.0 compare equal numerically; fold them onto one key.
        let lat = if c.latitude == 0.0 { 0.0 } else { c.latitude };
        let lon = if c.longitude == 0.0 { 0.0 } else { c.longitude };
        Self {
            lat_bits: lat.to_bits(),
            lon_bits: lon.to_bits(),
        }
    }
}

/// A single news item for one refresh cycle. Immutable once fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: NewsStatus,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub links: Vec<NewsLink>,
}

impl NewsItem {
    /// True when the item claims a coordinate and that coordinate is usable.
    pub fn usable_coordinate(&self) -> Option<Coordinate> {
        self.coordinate.filter(Coordinate::is_usable)
    }

    /// Unix-seconds sort key: feed `date` strings are `YYYY-MM-DD` (midnight
    /// UTC), but anything RFC 3339 also parses. Missing or unparsable dates
    /// sort as epoch 0, i.e. oldest.
    pub fn date_sort_key(&self) -> i64 {
        date_sort_key(&self.date)
    }
}

pub fn date_sort_key(date: &str) -> i64 {
    let s = date.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return dt.timestamp();
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp()).unwrap_or(0);
    }
    0
}

/// Coordinates arrive with null fields, string-typed numbers, or not at all.
/// Anything that does not coerce to a pair of numbers becomes `None`; the
/// validator then routes the item to the uncoordinated list.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coordinate_from_value))
}

fn coordinate_from_value(v: &serde_json::Value) -> Option<Coordinate> {
    let obj = v.as_object()?;
    let lat = coerce_f64(obj.get("latitude")?)?;
    let lon = coerce_f64(obj.get("longitude")?)?;
    Some(Coordinate::new(lat, lon))
}

fn coerce_f64(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
