//! Configuration key access and validation.
//!
//! This module provides a type-safe interface for getting and setting
//! configuration values by key name. Each key validates its value through a
//! value specification before the config is touched.

use std::str::FromStr;
use thiserror::Error;

use super::settings::ConfigFile;
use super::parser::{
    expand_tilde, parse_base, parse_latitude, parse_longitude, parse_opacity, parse_timeout,
    parse_url, parse_weight, parse_zoom,
};
use super::writer::path_to_string;
use crate::magnitude::RadiusScale;
use crate::style::BorderMode;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    MapboxAccessToken,

    FeedsEarthquakesUrl,
    FeedsPlateBoundariesUrl,

    MapCenterLat,
    MapCenterLon,
    MapZoom,
    MapDefaultBase,
    MapOutput,
    MapTitle,

    MarkersRadiusScale,
    MarkersBorder,
    MarkersFillOpacity,
    MarkersWeight,

    DownloadTimeout,

    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.trim().to_lowercase())
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "map.default_base").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::MapboxAccessToken => "mapbox.access_token",
            ConfigKey::FeedsEarthquakesUrl => "feeds.earthquakes_url",
            ConfigKey::FeedsPlateBoundariesUrl => "feeds.plate_boundaries_url",
            ConfigKey::MapCenterLat => "map.center_lat",
            ConfigKey::MapCenterLon => "map.center_lon",
            ConfigKey::MapZoom => "map.zoom",
            ConfigKey::MapDefaultBase => "map.default_base",
            ConfigKey::MapOutput => "map.output",
            ConfigKey::MapTitle => "map.title",
            ConfigKey::MarkersRadiusScale => "markers.radius_scale",
            ConfigKey::MarkersBorder => "markers.border",
            ConfigKey::MarkersFillOpacity => "markers.fill_opacity",
            ConfigKey::MarkersWeight => "markers.weight",
            ConfigKey::DownloadTimeout => "download.timeout",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "map").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "default_base").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or("")
    }

    /// Get the current value from the config as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::MapboxAccessToken => config.mapbox.access_token.clone().unwrap_or_default(),
            ConfigKey::FeedsEarthquakesUrl => config.feeds.earthquakes_url.clone(),
            ConfigKey::FeedsPlateBoundariesUrl => config.feeds.plate_boundaries_url.clone(),
            ConfigKey::MapCenterLat => config.map.center_lat.to_string(),
            ConfigKey::MapCenterLon => config.map.center_lon.to_string(),
            ConfigKey::MapZoom => config.map.zoom.to_string(),
            ConfigKey::MapDefaultBase => config.map.default_base.as_str().to_string(),
            ConfigKey::MapOutput => path_to_string(&config.map.output),
            ConfigKey::MapTitle => config.map.title.clone(),
            ConfigKey::MarkersRadiusScale => config.markers.radius_scale.as_str().to_string(),
            ConfigKey::MarkersBorder => config.markers.border.as_str().to_string(),
            ConfigKey::MarkersFillOpacity => config.markers.fill_opacity.to_string(),
            ConfigKey::MarkersWeight => config.markers.weight.to_string(),
            ConfigKey::DownloadTimeout => config.download.timeout.to_string(),
            ConfigKey::LoggingFile => path_to_string(&config.logging.file),
        }
    }

    /// Set the value in the config after validation.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        self.validate(value)?;
        self.set_unchecked(config, value)
            .map_err(|reason| self.validation_error(reason))
    }

    /// Store an already validated value.
    fn set_unchecked(&self, config: &mut ConfigFile, value: &str) -> Result<(), String> {
        match self {
            ConfigKey::MapboxAccessToken => {
                config.mapbox.access_token = (!value.is_empty()).then(|| value.to_string());
            }
            ConfigKey::FeedsEarthquakesUrl => config.feeds.earthquakes_url = parse_url(value)?,
            ConfigKey::FeedsPlateBoundariesUrl => {
                config.feeds.plate_boundaries_url = parse_url(value)?
            }
            ConfigKey::MapCenterLat => config.map.center_lat = parse_latitude(value)?,
            ConfigKey::MapCenterLon => config.map.center_lon = parse_longitude(value)?,
            ConfigKey::MapZoom => config.map.zoom = parse_zoom(value)?,
            ConfigKey::MapDefaultBase => config.map.default_base = parse_base(value)?,
            ConfigKey::MapOutput => config.map.output = expand_tilde(value),
            ConfigKey::MapTitle => config.map.title = value.to_string(),
            ConfigKey::MarkersRadiusScale => config.markers.radius_scale = value.parse()?,
            ConfigKey::MarkersBorder => config.markers.border = value.parse()?,
            ConfigKey::MarkersFillOpacity => config.markers.fill_opacity = parse_opacity(value)?,
            ConfigKey::MarkersWeight => config.markers.weight = parse_weight(value)?,
            ConfigKey::DownloadTimeout => config.download.timeout = parse_timeout(value)?,
            ConfigKey::LoggingFile => config.logging.file = expand_tilde(value),
        }
        Ok(())
    }

    /// Validate a value for this key.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value)
            .map_err(|reason| self.validation_error(reason))
    }

    fn validation_error(&self, reason: String) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason,
        }
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::MapboxAccessToken | ConfigKey::MapTitle => Box::new(AnyStringSpec),
            ConfigKey::FeedsEarthquakesUrl | ConfigKey::FeedsPlateBoundariesUrl => {
                Box::new(ParsedSpec(parse_url))
            }
            ConfigKey::MapCenterLat => Box::new(ParsedSpec(parse_latitude)),
            ConfigKey::MapCenterLon => Box::new(ParsedSpec(parse_longitude)),
            ConfigKey::MapZoom => Box::new(ParsedSpec(parse_zoom)),
            ConfigKey::MapDefaultBase => Box::new(ParsedSpec(parse_base)),
            ConfigKey::MapOutput | ConfigKey::LoggingFile => Box::new(PathSpec),
            ConfigKey::MarkersRadiusScale => Box::new(ParsedSpec(RadiusScale::from_str)),
            ConfigKey::MarkersBorder => Box::new(ParsedSpec(BorderMode::from_str)),
            ConfigKey::MarkersFillOpacity => Box::new(ParsedSpec(parse_opacity)),
            ConfigKey::MarkersWeight => Box::new(ParsedSpec(parse_weight)),
            ConfigKey::DownloadTimeout => Box::new(ParsedSpec(parse_timeout)),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::MapboxAccessToken,
            ConfigKey::FeedsEarthquakesUrl,
            ConfigKey::FeedsPlateBoundariesUrl,
            ConfigKey::MapCenterLat,
            ConfigKey::MapCenterLon,
            ConfigKey::MapZoom,
            ConfigKey::MapDefaultBase,
            ConfigKey::MapOutput,
            ConfigKey::MapTitle,
            ConfigKey::MarkersRadiusScale,
            ConfigKey::MarkersBorder,
            ConfigKey::MarkersFillOpacity,
            ConfigKey::MarkersWeight,
            ConfigKey::DownloadTimeout,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value Specifications
// ============================================================================

/// A rule a raw string value must satisfy before it is stored.
trait ValueSpecification {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Accepts anything, including the empty string.
struct AnyStringSpec;

impl ValueSpecification for AnyStringSpec {
    fn is_satisfied_by(&self, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Accepts values the wrapped parser accepts.
struct ParsedSpec<T>(fn(&str) -> Result<T, String>);

impl<T> ValueSpecification for ParsedSpec<T> {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        (self.0)(value).map(|_| ())
    }
}

/// Specification for path values (non-empty).
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}
