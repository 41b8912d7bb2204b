//! MapBox base imagery layers.
//!
//! The map offers three interchangeable base layers served by MapBox's Raster
//! Tiles API. Tiles are requested by the browser, so this module only describes
//! each layer: its tile URL template, imagery style identifier, credential and
//! attribution.
//!
//! # URL Pattern
//!
//! `https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}`
//!
//! - `{id}` is the imagery style (`mapbox.satellite`, `mapbox.light`, ...)
//! - Uses standard XYZ tile coordinates
//! - Requires an access token as query parameter
//!
//! # Getting an Access Token
//!
//! 1. Create a free account at <https://www.mapbox.com/>
//! 2. Navigate to your account's access tokens page
//! 3. Use the default public token or create a new one

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Tile URL template understood by Leaflet's tile layer.
pub const MAPBOX_TILE_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";

/// Attribution required by the imagery and map data licenses.
pub const MAPBOX_ATTRIBUTION: &str = "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, Imagery \u{a9} <a href=\"https://www.mapbox.com/\">Mapbox</a>";

/// Minimum zoom level offered by the base layers.
pub const MIN_ZOOM: u8 = 0;

/// Maximum zoom level offered by the base layers.
pub const MAX_ZOOM: u8 = 18;

/// Errors that can occur when defining base layers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BaseMapError {
    /// No MapBox access token was configured
    #[error("MapBox access token is required")]
    MissingAccessToken,

    /// Zoom level outside the layer's range
    #[error("Zoom level {0} not supported by base layer")]
    UnsupportedZoom(u8),

    /// Unrecognized imagery style name
    #[error("Unknown imagery style '{0}' (expected satellite, grayscale, or outdoors)")]
    UnknownStyle(String),
}

/// Imagery style of a base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageryStyle {
    #[default]
    Satellite,
    Grayscale,
    Outdoors,
}

impl ImageryStyle {
    /// All styles in the order they are listed in the layer control.
    pub const ALL: [ImageryStyle; 3] = [
        ImageryStyle::Satellite,
        ImageryStyle::Grayscale,
        ImageryStyle::Outdoors,
    ];

    /// MapBox tileset identifier.
    pub fn style_id(self) -> &'static str {
        match self {
            ImageryStyle::Satellite => "mapbox.satellite",
            ImageryStyle::Grayscale => "mapbox.light",
            ImageryStyle::Outdoors => "mapbox.outdoors",
        }
    }

    /// Name shown in the layer control.
    pub fn display_name(self) -> &'static str {
        match self {
            ImageryStyle::Satellite => "Satellite Map",
            ImageryStyle::Grayscale => "Gray Scale Map",
            ImageryStyle::Outdoors => "Outdoors Map",
        }
    }

    /// Config/CLI name.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageryStyle::Satellite => "satellite",
            ImageryStyle::Grayscale => "grayscale",
            ImageryStyle::Outdoors => "outdoors",
        }
    }
}

impl fmt::Display for ImageryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageryStyle {
    type Err = BaseMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "satellite" => Ok(ImageryStyle::Satellite),
            "grayscale" | "greyscale" | "light" => Ok(ImageryStyle::Grayscale),
            "outdoors" | "terrain" => Ok(ImageryStyle::Outdoors),
            other => Err(BaseMapError::UnknownStyle(other.to_string())),
        }
    }
}

/// A MapBox raster base layer.
///
/// # Example
///
/// ```ignore
/// use quakemap::basemap::{BaseLayer, ImageryStyle};
///
/// let layer = BaseLayer::new(ImageryStyle::Satellite, "pk.your_token")?;
/// assert_eq!(layer.name(), "Satellite Map");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLayer {
    style: ImageryStyle,
    access_token: String,
}

impl BaseLayer {
    /// Creates a base layer for `style`.
    ///
    /// # Errors
    ///
    /// Returns [`BaseMapError::MissingAccessToken`] if the token is blank.
    pub fn new(style: ImageryStyle, access_token: impl Into<String>) -> Result<Self, BaseMapError> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(BaseMapError::MissingAccessToken);
        }
        Ok(Self {
            style,
            access_token,
        })
    }

    pub fn style(&self) -> ImageryStyle {
        self.style
    }

    /// Name shown in the layer control.
    pub fn name(&self) -> &'static str {
        self.style.display_name()
    }

    pub fn style_id(&self) -> &'static str {
        self.style.style_id()
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn url_template(&self) -> &'static str {
        MAPBOX_TILE_TEMPLATE
    }

    pub fn attribution(&self) -> &'static str {
        MAPBOX_ATTRIBUTION
    }

    pub fn min_zoom(&self) -> u8 {
        MIN_ZOOM
    }

    pub fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }

    /// Checks if this layer supports the given zoom level.
    pub fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }

    /// Expands the URL template for a concrete tile.
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> Result<String, BaseMapError> {
        if !self.supports_zoom(zoom) {
            return Err(BaseMapError::UnsupportedZoom(zoom));
        }

        Ok(MAPBOX_TILE_TEMPLATE
            .replace("{id}", self.style_id())
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{accessToken}", &self.access_token))
    }
}

/// Builds the satellite, grayscale and outdoors layers sharing one token.
pub fn mapbox_base_layers(access_token: &str) -> Result<Vec<BaseLayer>, BaseMapError> {
    ImageryStyle::ALL
        .iter()
        .map(|style| BaseLayer::new(*style, access_token))
        .collect()
}
