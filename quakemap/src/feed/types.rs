//! Feed record types

use thiserror::Error;

/// Errors that can occur while fetching or parsing a feed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body is not a GeoJSON feature collection
    #[error("Failed to parse feed: {0}")]
    Json(String),
}

/// Geographic position in GeoJSON axis order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

impl LonLat {
    /// Builds a position from a GeoJSON coordinate array.
    ///
    /// Returns `None` for fewer than two values, non-finite values, or values
    /// outside the valid latitude/longitude ranges. Extra values (depth,
    /// elevation) are ignored here.
    pub fn from_coordinates(coords: &[f64]) -> Option<Self> {
        let (&lon, &lat) = (coords.first()?, coords.get(1)?);
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some(Self { lon, lat })
    }

    /// Position in Leaflet's `[lat, lng]` order.
    #[inline]
    pub fn lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// A single earthquake event from the earthquake feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    /// Magnitude, absent when the network has not published one
    pub magnitude: Option<f64>,
    /// Epicenter
    pub location: LonLat,
    /// Hypocenter depth in kilometers, when the feed supplies it
    pub depth_km: Option<f64>,
    /// Human-readable place description
    pub place: Option<String>,
    /// Origin time in milliseconds since the Unix epoch
    pub time_ms: Option<i64>,
}

/// Line geometry of a plate boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    LineString(Vec<LonLat>),
    MultiLineString(Vec<Vec<LonLat>>),
    Polygon(Vec<Vec<LonLat>>),
    MultiPolygon(Vec<Vec<Vec<LonLat>>>),
}

impl BoundaryGeometry {
    /// GeoJSON geometry type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            BoundaryGeometry::LineString(_) => "LineString",
            BoundaryGeometry::MultiLineString(_) => "MultiLineString",
            BoundaryGeometry::Polygon(_) => "Polygon",
            BoundaryGeometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// All lines and rings making up the geometry.
    pub fn lines(&self) -> Vec<&[LonLat]> {
        match self {
            BoundaryGeometry::LineString(line) => vec![line.as_slice()],
            BoundaryGeometry::MultiLineString(lines) | BoundaryGeometry::Polygon(lines) => {
                lines.iter().map(Vec::as_slice).collect()
            }
            BoundaryGeometry::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter().map(Vec::as_slice))
                .collect(),
        }
    }

    /// Total number of positions across all lines.
    pub fn position_count(&self) -> usize {
        self.lines().iter().map(|line| line.len()).sum()
    }
}

/// A tectonic plate boundary segment from the boundary feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundary {
    /// Segment name, e.g. `"AF-AN"`
    pub name: Option<String>,
    /// Segment geometry
    pub geometry: BoundaryGeometry,
}

/// Result of parsing one feed: the usable records plus how many features
/// were dropped as malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for ParsedFeed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}
