//! QuakeMap - Recent earthquakes and tectonic plate boundaries on a web map
//!
//! This library fetches the USGS weekly earthquake feed and a plate boundary
//! collection, styles each quake by magnitude, and renders a self-contained
//! Leaflet page with switchable base imagery and toggleable overlays.
//!
//! # High-Level API
//!
//! ```ignore
//! use quakemap::basemap::{mapbox_base_layers, ImageryStyle};
//! use quakemap::feed::{AsyncReqwestClient, FeedLoader, FeedUrls};
//! use quakemap::layer::{LayerComposer, MapContext};
//! use quakemap::legend::default_legend;
//! use quakemap::render::{render_page, DEFAULT_TITLE};
//!
//! let mut ctx = MapContext::default();
//! let composer = LayerComposer::default();
//! composer.initialize(&mut ctx, mapbox_base_layers(token)?, ImageryStyle::Satellite)?;
//!
//! let loader = FeedLoader::new(AsyncReqwestClient::new()?, FeedUrls::default());
//! composer.consume(&mut ctx, loader.spawn()).await;
//!
//! let html = render_page(&ctx, &default_legend(), DEFAULT_TITLE)?;
//! ```

pub mod basemap;
pub mod config;
pub mod feed;
pub mod layer;
pub mod legend;
pub mod logging;
pub mod magnitude;
pub mod render;
pub mod style;

/// Version of the QuakeMap library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION.split('.').count(), 3);
    }
}
