//! Concurrent loading of the earthquake and plate boundary feeds.
//!
//! Each feed is fetched by its own task. Completions are delivered as
//! [`FeedEvent`]s over a channel in the order they finish, so neither feed
//! waits for the other and a failure in one leaves the other untouched.

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::http::AsyncHttpClient;
use super::parse::{parse_boundaries, parse_earthquakes};
use super::types::{EarthquakeRecord, FeedError, ParsedFeed, PlateBoundary};

/// Default USGS feed of all earthquakes in the past week.
pub const DEFAULT_EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Default PB2002 plate boundary dataset.
pub const DEFAULT_PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Which of the two feeds an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Earthquakes,
    PlateBoundaries,
}

impl FeedKind {
    pub fn name(&self) -> &'static str {
        match self {
            FeedKind::Earthquakes => "earthquakes",
            FeedKind::PlateBoundaries => "plate boundaries",
        }
    }
}

/// Completion of one feed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Earthquakes(Result<ParsedFeed<EarthquakeRecord>, FeedError>),
    PlateBoundaries(Result<ParsedFeed<PlateBoundary>, FeedError>),
}

impl FeedEvent {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedEvent::Earthquakes(_) => FeedKind::Earthquakes,
            FeedEvent::PlateBoundaries(_) => FeedKind::PlateBoundaries,
        }
    }
}

/// Source URLs for the two feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    pub earthquakes: String,
    pub plate_boundaries: String,
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            earthquakes: DEFAULT_EARTHQUAKES_URL.to_string(),
            plate_boundaries: DEFAULT_PLATE_BOUNDARIES_URL.to_string(),
        }
    }
}

/// Fetches and parses both feeds.
pub struct FeedLoader<C: AsyncHttpClient> {
    client: C,
    urls: FeedUrls,
}

impl<C: AsyncHttpClient> FeedLoader<C> {
    /// Creates a loader for the given URLs.
    pub fn new(client: C, urls: FeedUrls) -> Self {
        Self { client, urls }
    }

    /// Feed URLs in use.
    pub fn urls(&self) -> &FeedUrls {
        &self.urls
    }

    /// Fetches and parses the earthquake feed.
    pub async fn fetch_earthquakes(&self) -> Result<ParsedFeed<EarthquakeRecord>, FeedError> {
        fetch_earthquakes(&self.client, &self.urls.earthquakes).await
    }

    /// Fetches and parses the plate boundary feed.
    pub async fn fetch_plate_boundaries(&self) -> Result<ParsedFeed<PlateBoundary>, FeedError> {
        fetch_plate_boundaries(&self.client, &self.urls.plate_boundaries).await
    }
}

impl<C: AsyncHttpClient + Clone + 'static> FeedLoader<C> {
    /// Starts both fetches as independent tasks.
    ///
    /// The returned receiver yields exactly one event per feed, in completion
    /// order, then closes. Must be called from within a tokio runtime.
    pub fn spawn(self) -> mpsc::Receiver<FeedEvent> {
        let (tx, rx) = mpsc::channel(2);

        let quake_tx = tx.clone();
        let quake_client = self.client.clone();
        let quake_url = self.urls.earthquakes;
        tokio::spawn(async move {
            let result = fetch_earthquakes(&quake_client, &quake_url).await;
            if quake_tx.send(FeedEvent::Earthquakes(result)).await.is_err() {
                warn!("Earthquake feed finished after receiver closed");
            }
        });

        let plate_client = self.client;
        let plate_url = self.urls.plate_boundaries;
        tokio::spawn(async move {
            let result = fetch_plate_boundaries(&plate_client, &plate_url).await;
            if tx.send(FeedEvent::PlateBoundaries(result)).await.is_err() {
                warn!("Plate boundary feed finished after receiver closed");
            }
        });

        rx
    }
}

async fn fetch_earthquakes<C: AsyncHttpClient>(
    client: &C,
    url: &str,
) -> Result<ParsedFeed<EarthquakeRecord>, FeedError> {
    let start = Instant::now();
    let body = client.get(url).await?;
    let parsed = parse_earthquakes(&body)?;
    info!(
        url = url,
        records = parsed.items.len(),
        skipped = parsed.skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Earthquake feed loaded"
    );
    Ok(parsed)
}

async fn fetch_plate_boundaries<C: AsyncHttpClient>(
    client: &C,
    url: &str,
) -> Result<ParsedFeed<PlateBoundary>, FeedError> {
    let start = Instant::now();
    let body = client.get(url).await?;
    let parsed = parse_boundaries(&body)?;
    info!(
        url = url,
        boundaries = parsed.items.len(),
        skipped = parsed.skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Plate boundary feed loaded"
    );
    Ok(parsed)
}
