// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod config;
pub mod feed;
pub mod metadata;
pub mod model;
pub mod refresh;
pub mod render;
pub mod surface;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, Aggregated, MarkerGroup, UnknownStatusPolicy};
pub use crate::config::NewsmapConfig;
pub use crate::feed::{load_recent, FeedSource, HttpFeedSource};
pub use crate::model::{CoordKey, Coordinate, NewsItem, NewsLink, NewsStatus};
pub use crate::refresh::RefreshCycle;
pub use crate::surface::{CardList, MapSurface, TracingSurface};
