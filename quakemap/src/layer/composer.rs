//! Layer composition.
//!
//! The composer owns no state of its own: every operation takes the
//! [`MapContext`] it mutates.

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::registry::MapContext;
use super::types::{
    BoundaryShape, EarthquakeMarker, LayerControl, LayerError, PathStyle, Shape,
    EARTHQUAKES_OVERLAY, PLATES_OVERLAY,
};
use crate::basemap::{BaseLayer, ImageryStyle};
use crate::feed::{EarthquakeRecord, FeedEvent, FeedKind, PlateBoundary};
use crate::style::FeatureStylist;

/// How one feed ended up after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedOutcome {
    /// No completion received
    #[default]
    Pending,
    /// Shapes were added to the overlay
    Loaded { added: usize, skipped: usize },
    /// Fetch or parse failed; the overlay was left empty
    Failed(String),
}

impl FeedOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedOutcome::Loaded { .. })
    }
}

/// Outcome of both feeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub earthquakes: FeedOutcome,
    pub plate_boundaries: FeedOutcome,
}

/// Builds overlays from feed records and wires up the layer control.
#[derive(Debug, Clone, Default)]
pub struct LayerComposer {
    stylist: FeatureStylist,
    boundary_style: PathStyle,
}

impl LayerComposer {
    pub fn new(stylist: FeatureStylist) -> Self {
        Self {
            stylist,
            boundary_style: PathStyle::default(),
        }
    }

    pub fn with_boundary_style(mut self, style: PathStyle) -> Self {
        self.boundary_style = style;
        self
    }

    pub fn stylist(&self) -> &FeatureStylist {
        &self.stylist
    }

    /// Registers base layers and both overlays, activates the default base
    /// layer and both overlays, then registers an expanded layer control.
    pub fn initialize(
        &self,
        ctx: &mut MapContext,
        base_layers: Vec<BaseLayer>,
        default_base: ImageryStyle,
    ) -> Result<(), LayerError> {
        if base_layers.is_empty() {
            return Err(LayerError::NoBaseLayers);
        }

        let registry = &mut ctx.registry;
        for layer in base_layers {
            registry.add_base_layer(layer);
        }
        registry.set_active_base(default_base.display_name())?;

        for name in [EARTHQUAKES_OVERLAY, PLATES_OVERLAY] {
            registry.add_overlay(name);
            registry.set_overlay_visible(name, true)?;
        }

        let control = LayerControl {
            collapsed: false,
            base_layers: registry
                .base_layers()
                .iter()
                .map(|l| l.name().to_string())
                .collect(),
            overlays: registry
                .overlays()
                .iter()
                .map(|o| o.name().to_string())
                .collect(),
        };
        registry.register_control(control);

        info!(
            base_layer = default_base.display_name(),
            "Map layers initialized"
        );
        Ok(())
    }

    /// Styles each record and appends its marker to the earthquake overlay.
    pub fn add_earthquakes(
        &self,
        ctx: &mut MapContext,
        records: &[EarthquakeRecord],
    ) -> Result<usize, LayerError> {
        let radius_scale = self.stylist.radius_scale();
        let markers = records.iter().map(|record| {
            Shape::Marker(EarthquakeMarker {
                location: record.location,
                style: self.stylist.style(record),
                radius_scale,
                popup: self.stylist.popup(record),
            })
        });
        ctx.registry.extend_overlay(EARTHQUAKES_OVERLAY, markers)
    }

    /// Appends one fixed-style shape per boundary segment.
    pub fn add_boundaries(
        &self,
        ctx: &mut MapContext,
        boundaries: &[PlateBoundary],
    ) -> Result<usize, LayerError> {
        let shapes = boundaries.iter().map(|boundary| {
            Shape::Boundary(BoundaryShape {
                name: boundary.name.clone(),
                geometry: boundary.geometry.clone(),
                style: self.boundary_style.clone(),
            })
        });
        ctx.registry.extend_overlay(PLATES_OVERLAY, shapes)
    }

    /// Applies one feed completion to its own overlay.
    ///
    /// Failures are logged and leave the overlay empty.
    pub fn apply(&self, ctx: &mut MapContext, event: FeedEvent) -> FeedOutcome {
        let kind = event.kind();
        let result = match event {
            FeedEvent::Earthquakes(result) => result.map_err(|e| e.to_string()).and_then(|feed| {
                self.add_earthquakes(ctx, &feed.items)
                    .map(|added| (added, feed.skipped))
                    .map_err(|e| e.to_string())
            }),
            FeedEvent::PlateBoundaries(result) => {
                result.map_err(|e| e.to_string()).and_then(|feed| {
                    self.add_boundaries(ctx, &feed.items)
                        .map(|added| (added, feed.skipped))
                        .map_err(|e| e.to_string())
                })
            }
        };

        match result {
            Ok((added, skipped)) => {
                info!(feed = kind.name(), added, skipped, "Overlay populated");
                FeedOutcome::Loaded { added, skipped }
            }
            Err(reason) => {
                warn!(feed = kind.name(), error = %reason, "Feed failed, overlay left empty");
                FeedOutcome::Failed(reason)
            }
        }
    }

    /// Applies feed completions in arrival order until the channel closes.
    pub async fn consume(
        &self,
        ctx: &mut MapContext,
        mut events: mpsc::Receiver<FeedEvent>,
    ) -> LoadSummary {
        let mut summary = LoadSummary::default();
        while let Some(event) = events.recv().await {
            let kind = event.kind();
            let outcome = self.apply(ctx, event);
            match kind {
                FeedKind::Earthquakes => summary.earthquakes = outcome,
                FeedKind::PlateBoundaries => summary.plate_boundaries = outcome,
            }
        }
        summary
    }

    /// Shows or hides one overlay.
    pub fn toggle_overlay(
        &self,
        ctx: &mut MapContext,
        name: &str,
        visible: bool,
    ) -> Result<(), LayerError> {
        ctx.registry.set_overlay_visible(name, visible)
    }

    /// Switches the active base layer.
    pub fn select_base(&self, ctx: &mut MapContext, name: &str) -> Result<(), LayerError> {
        ctx.registry.set_active_base(name)
    }
}
