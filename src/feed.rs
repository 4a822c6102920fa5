// src/feed.rs
//! Daily feed loading: one best-effort fetch per calendar date, dispatched
//! concurrently and awaited jointly. A failed date contributes zero items;
//! the loader itself never fails.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::model::NewsItem;

/// One-time metrics registration for the loader series.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_items_total", "News items parsed from daily feeds.");
        describe_counter!(
            "feed_fetch_errors_total",
            "Daily feed fetches that failed or returned malformed bodies."
        );
    });
}

/// A provider of one day's worth of news items.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<NewsItem>>;
    fn name(&self) -> &str;
}

/// HTTP source: each date maps to `<base_url>/<YYYY-MM-DD>.json`, expected to
/// hold a JSON array of item records.
pub struct HttpFeedSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn day_url(&self, date: NaiveDate) -> String {
        format!("{}/{}.json", self.base_url, date.format("%Y-%m-%d"))
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<NewsItem>> {
        let url = self.day_url(date);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fetching daily feed {url}"))?
            .error_for_status()
            .with_context(|| format!("daily feed {url} returned error status"))?;
        let body = resp.text().await.context("reading daily feed body")?;
        let items: Vec<NewsItem> =
            serde_json::from_str(&body).with_context(|| format!("parsing daily feed {url}"))?;
        Ok(items)
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

/// The last `n` calendar dates ending today (inclusive), local time,
/// today first.
pub fn recent_dates(n: u32) -> Vec<NaiveDate> {
    let today = Local::now().date_naive();
    (0..n as i64).map(|off| today - Duration::days(off)).collect()
}

/// Fetch the last `days` daily feeds concurrently and flatten the results.
///
/// Every date is its own task; a task converts its own failure into an empty
/// contribution before the join, so the joint wait itself cannot fail. Order
/// within a date is the feed's order; order across dates follows the date
/// window, not completion order.
pub async fn load_recent(source: Arc<dyn FeedSource>, days: u32) -> Vec<NewsItem> {
    ensure_metrics_described();

    let mut handles = Vec::with_capacity(days as usize);
    for date in recent_dates(days) {
        let src = Arc::clone(&source);
        handles.push(tokio::spawn(async move {
            match src.fetch_day(date).await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(error = ?e, %date, source = src.name(), "daily feed fetch failed");
                    counter!("feed_fetch_errors_total").increment(1);
                    Vec::new()
                }
            }
        }));
    }

    let mut all = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(mut items) => all.append(&mut items),
            Err(e) => {
                // Task panics are treated like any other failed date.
                tracing::warn!(error = ?e, "feed fetch task failed to join");
                counter!("feed_fetch_errors_total").increment(1);
            }
        }
    }

    counter!("feed_items_total").increment(all.len() as u64);
    all
}
