//! Layer shapes, controls, and errors

use serde::Serialize;
use thiserror::Error;

use crate::feed::{BoundaryGeometry, LonLat};
use crate::magnitude::RadiusScale;
use crate::style::{Popup, StyleDescriptor};

/// Name of the earthquake overlay collection.
pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";

/// Name of the plate boundary overlay collection.
pub const PLATES_OVERLAY: &str = "Plates Boundary";

/// Default plate boundary line color.
pub const DEFAULT_BOUNDARY_COLOR: &str = "red";

/// Default plate boundary line weight in pixels.
pub const DEFAULT_BOUNDARY_WEIGHT: f64 = 2.0;

/// Errors that can occur when mutating the layer registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    /// No overlay with this name exists
    #[error("Unknown overlay '{0}'")]
    UnknownOverlay(String),

    /// No base layer with this name exists
    #[error("Unknown base layer '{0}'")]
    UnknownBaseLayer(String),

    /// Composition needs at least one base layer
    #[error("No base layers available")]
    NoBaseLayers,
}

/// Fixed line style shared by all plate boundary shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_BOUNDARY_COLOR.to_string(),
            weight: DEFAULT_BOUNDARY_WEIGHT,
        }
    }
}

/// Styled circle for one earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeMarker {
    pub location: LonLat,
    pub style: StyleDescriptor,
    /// Units of `style.radius`
    pub radius_scale: RadiusScale,
    pub popup: Popup,
}

/// Styled line shape for one plate boundary segment.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryShape {
    pub name: Option<String>,
    pub geometry: BoundaryGeometry,
    pub style: PathStyle,
}

/// A renderable shape belonging to an overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker(EarthquakeMarker),
    Boundary(BoundaryShape),
}

impl Shape {
    pub fn as_marker(&self) -> Option<&EarthquakeMarker> {
        match self {
            Shape::Marker(marker) => Some(marker),
            Shape::Boundary(_) => None,
        }
    }

    pub fn as_boundary(&self) -> Option<&BoundaryShape> {
        match self {
            Shape::Boundary(boundary) => Some(boundary),
            Shape::Marker(_) => None,
        }
    }
}

/// User-facing control for switching base layers and toggling overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerControl {
    /// Whether the control starts collapsed into an icon
    pub collapsed: bool,
    /// Base layer names, in display order
    pub base_layers: Vec<String>,
    /// Overlay names, in display order
    pub overlays: Vec<String>,
}
