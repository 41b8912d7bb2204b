//! Remote GeoJSON feeds
//!
//! Fetches the earthquake and plate boundary feeds, validating every feature
//! at the parsing boundary so the rest of the crate only sees typed records.
//!
//! ```ignore
//! use quakemap::feed::{AsyncReqwestClient, FeedLoader, FeedUrls};
//!
//! let loader = FeedLoader::new(AsyncReqwestClient::new()?, FeedUrls::default());
//! let mut events = loader.spawn();
//! while let Some(event) = events.recv().await {
//!     // hand each completion to the layer composer
//! }
//! ```

mod http;
mod loader;
mod parse;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use loader::{
    FeedEvent, FeedKind, FeedLoader, FeedUrls, DEFAULT_EARTHQUAKES_URL,
    DEFAULT_PLATE_BOUNDARIES_URL,
};
pub use parse::{parse_boundaries, parse_earthquakes};
pub use types::{BoundaryGeometry, EarthquakeRecord, FeedError, LonLat, ParsedFeed, PlateBoundary};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
