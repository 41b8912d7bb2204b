//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::basemap::ImageryStyle;
use crate::magnitude::RadiusScale;
use crate::style::BorderMode;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Mapbox credentials
    pub mapbox: MapboxSettings,
    /// Feed source URLs
    pub feeds: FeedSettings,
    /// Initial view and output page
    pub map: MapSettings,
    /// Earthquake marker appearance
    pub markers: MarkerSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Mapbox configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapboxSettings {
    /// Access token substituted into every tile URL
    pub access_token: Option<String>,
}

/// Feed source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    /// USGS earthquake GeoJSON feed
    pub earthquakes_url: String,
    /// Tectonic plate boundary GeoJSON
    pub plate_boundaries_url: String,
}

/// Map view and page configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Initial center latitude
    pub center_lat: f64,
    /// Initial center longitude
    pub center_lon: f64,
    /// Initial zoom level
    pub zoom: u8,
    /// Base layer active when the page opens
    pub default_base: ImageryStyle,
    /// Where `render` writes the page
    pub output: PathBuf,
    /// Page title
    pub title: String,
}

/// Marker appearance configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSettings {
    pub radius_scale: RadiusScale,
    pub border: BorderMode,
    pub fill_opacity: f64,
    pub weight: f64,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Per-request timeout in seconds
    pub timeout: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
