//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use quakemap::basemap::{BaseMapError, ImageryStyle};
use quakemap::config::ConfigFile;
use quakemap::feed::FeedUrls;
use quakemap::layer::MapView;
use quakemap::magnitude::MagnitudeClassifier;
use quakemap::style::FeatureStylist;

use crate::error::CliError;

/// Base layer selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum BaseStyle {
    /// Mapbox satellite imagery
    Satellite,
    /// Light gray street map
    Grayscale,
    /// Terrain and trails
    Outdoors,
}

impl From<BaseStyle> for ImageryStyle {
    fn from(style: BaseStyle) -> Self {
        match style {
            BaseStyle::Satellite => ImageryStyle::Satellite,
            BaseStyle::Grayscale => ImageryStyle::Grayscale,
            BaseStyle::Outdoors => ImageryStyle::Outdoors,
        }
    }
}

/// Resolve the Mapbox access token. CLI takes precedence, then config.
pub fn resolve_access_token(
    cli_token: Option<String>,
    config: &ConfigFile,
) -> Result<String, CliError> {
    cli_token
        .or_else(|| config.mapbox.access_token.clone())
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(CliError::BaseMap(BaseMapError::MissingAccessToken))
}

/// Resolve the default base layer from CLI args and config.
pub fn resolve_base(cli_base: Option<BaseStyle>, config: &ConfigFile) -> ImageryStyle {
    cli_base
        .map(ImageryStyle::from)
        .unwrap_or(config.map.default_base)
}

/// Resolve feed URLs from CLI args and config.
pub fn resolve_feed_urls(
    cli_earthquakes: Option<String>,
    cli_plates: Option<String>,
    config: &ConfigFile,
) -> FeedUrls {
    FeedUrls {
        earthquakes: cli_earthquakes.unwrap_or_else(|| config.feeds.earthquakes_url.clone()),
        plate_boundaries: cli_plates.unwrap_or_else(|| config.feeds.plate_boundaries_url.clone()),
    }
}

/// Initial view from the `[map]` section.
pub fn map_view(config: &ConfigFile) -> MapView {
    MapView {
        center_lat: config.map.center_lat,
        center_lon: config.map.center_lon,
        zoom: config.map.zoom,
        ..MapView::default()
    }
}

/// Marker stylist from the `[markers]` section.
pub fn stylist(config: &ConfigFile) -> FeatureStylist {
    FeatureStylist::new(MagnitudeClassifier::new(config.markers.radius_scale))
        .with_border(config.markers.border)
        .with_fill_opacity(config.markers.fill_opacity)
        .with_weight(config.markers.weight)
}
