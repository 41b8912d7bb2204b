//! Layer composition for the earthquake map.
//!
//! Two overlays ("Earthquakes" and "Plates Boundary") are toggled
//! independently on top of three mutually exclusive base layers. All state
//! lives in an explicit [`MapContext`] created by the caller:
//!
//! ```ignore
//! use quakemap::layer::{LayerComposer, MapContext};
//!
//! let mut ctx = MapContext::default();
//! let composer = LayerComposer::default();
//! composer.initialize(&mut ctx, base_layers, ImageryStyle::Satellite)?;
//! let summary = composer.consume(&mut ctx, loader.spawn()).await;
//! ```

mod composer;
mod registry;
mod types;

pub use composer::{FeedOutcome, LayerComposer, LoadSummary};
pub use registry::{
    LayerRegistry, MapContext, MapView, OverlayGroup, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON,
    DEFAULT_CONTAINER_ID, DEFAULT_ZOOM,
};
pub use types::{
    BoundaryShape, EarthquakeMarker, LayerControl, LayerError, PathStyle, Shape,
    DEFAULT_BOUNDARY_COLOR, DEFAULT_BOUNDARY_WEIGHT, EARTHQUAKES_OVERLAY, PLATES_OVERLAY,
};
