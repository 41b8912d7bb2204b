//! Layer registry and map context.
//!
//! [`MapContext`] is created once at startup and passed to whoever composes
//! the map. Its [`LayerRegistry`] is the only mutable state shared between
//! the two feed completions.

use tracing::debug;

use super::types::{LayerControl, LayerError, Shape};
use crate::basemap::BaseLayer;

/// Default map center latitude (contiguous United States).
pub const DEFAULT_CENTER_LAT: f64 = 37.09;

/// Default map center longitude.
pub const DEFAULT_CENTER_LON: f64 = -95.71;

/// Default initial zoom level.
pub const DEFAULT_ZOOM: u8 = 3;

/// Id of the page element the map is mounted into.
pub const DEFAULT_CONTAINER_ID: &str = "map";

/// Initial viewport and mount point.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub container_id: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center_lat: DEFAULT_CENTER_LAT,
            center_lon: DEFAULT_CENTER_LON,
            zoom: DEFAULT_ZOOM,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
        }
    }
}

/// Named, append-only collection of shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGroup {
    name: String,
    shapes: Vec<Shape>,
    visible: bool,
}

impl OverlayGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shapes: Vec::new(),
            visible: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Base layers, overlays and the layer control of one map.
///
/// Exactly one base layer is active once any has been added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRegistry {
    base_layers: Vec<BaseLayer>,
    active_base: Option<usize>,
    overlays: Vec<OverlayGroup>,
    control: Option<LayerControl>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a base layer. The first one added becomes active.
    pub fn add_base_layer(&mut self, layer: BaseLayer) {
        self.base_layers.push(layer);
        if self.active_base.is_none() {
            self.active_base = Some(0);
        }
    }

    pub fn base_layers(&self) -> &[BaseLayer] {
        &self.base_layers
    }

    pub fn active_base(&self) -> Option<&BaseLayer> {
        self.active_base.and_then(|i| self.base_layers.get(i))
    }

    /// Makes the named base layer the active one, deactivating the previous.
    pub fn set_active_base(&mut self, name: &str) -> Result<(), LayerError> {
        let index = self
            .base_layers
            .iter()
            .position(|l| l.name() == name)
            .ok_or_else(|| LayerError::UnknownBaseLayer(name.to_string()))?;
        debug!(base_layer = name, "Active base layer changed");
        self.active_base = Some(index);
        Ok(())
    }

    /// Registers an empty, hidden overlay. Existing overlays are left as is.
    pub fn add_overlay(&mut self, name: &str) {
        if self.overlay(name).is_none() {
            self.overlays.push(OverlayGroup::new(name));
        }
    }

    pub fn overlay(&self, name: &str) -> Option<&OverlayGroup> {
        self.overlays.iter().find(|o| o.name == name)
    }

    fn overlay_mut(&mut self, name: &str) -> Result<&mut OverlayGroup, LayerError> {
        self.overlays
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| LayerError::UnknownOverlay(name.to_string()))
    }

    pub fn overlays(&self) -> &[OverlayGroup] {
        &self.overlays
    }

    /// Appends shapes to an overlay, returning the number added.
    pub fn extend_overlay(
        &mut self,
        name: &str,
        shapes: impl IntoIterator<Item = Shape>,
    ) -> Result<usize, LayerError> {
        let overlay = self.overlay_mut(name)?;
        let before = overlay.shapes.len();
        overlay.shapes.extend(shapes);
        Ok(overlay.shapes.len() - before)
    }

    /// Shows or hides one overlay. Other overlays and base layers are untouched.
    pub fn set_overlay_visible(&mut self, name: &str, visible: bool) -> Result<(), LayerError> {
        self.overlay_mut(name)?.visible = visible;
        debug!(overlay = name, visible, "Overlay visibility changed");
        Ok(())
    }

    pub fn register_control(&mut self, control: LayerControl) {
        self.control = Some(control);
    }

    pub fn control(&self) -> Option<&LayerControl> {
        self.control.as_ref()
    }

    /// Shapes currently drawn: every shape of every visible overlay.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.overlays
            .iter()
            .filter(|o| o.visible)
            .flat_map(|o| o.shapes.iter())
    }
}

/// Everything the page renderer needs to draw one map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapContext {
    pub view: MapView,
    pub registry: LayerRegistry,
}

impl MapContext {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            registry: LayerRegistry::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basemap::{mapbox_base_layers, BaseLayer, ImageryStyle};
    use crate::feed::{BoundaryGeometry, LonLat};
    use crate::layer::types::{BoundaryShape, PathStyle};

    fn boundary() -> Shape {
        Shape::Boundary(BoundaryShape {
            name: None,
            geometry: BoundaryGeometry::LineString(vec![
                LonLat { lon: 0.0, lat: 0.0 },
                LonLat { lon: 1.0, lat: 1.0 },
            ]),
            style: PathStyle::default(),
        })
    }

    #[test]
    fn test_default_view() {
        let view = MapView::default();
        assert_eq!(view.center_lat, 37.09);
        assert_eq!(view.center_lon, -95.71);
        assert_eq!(view.zoom, 3);
        assert_eq!(view.container_id, "map");
    }

    #[test]
    fn test_first_base_layer_becomes_active() {
        let mut registry = LayerRegistry::new();
        assert!(registry.active_base().is_none());

        for layer in mapbox_base_layers("pk.test").unwrap() {
            registry.add_base_layer(layer);
        }
        assert_eq!(registry.active_base().unwrap().name(), "Satellite Map");
    }

    #[test]
    fn test_switch_base_layer_is_exclusive() {
        let mut registry = LayerRegistry::new();
        for layer in mapbox_base_layers("pk.test").unwrap() {
            registry.add_base_layer(layer);
        }

        registry.set_active_base("Outdoors Map").unwrap();
        assert_eq!(registry.active_base().unwrap().style(), ImageryStyle::Outdoors);
        assert_eq!(registry.base_layers().len(), 3);

        let err = registry.set_active_base("Street Map").unwrap_err();
        assert_eq!(err, LayerError::UnknownBaseLayer("Street Map".to_string()));
        assert_eq!(registry.active_base().unwrap().style(), ImageryStyle::Outdoors);
    }

    #[test]
    fn test_add_overlay_is_idempotent() {
        let mut registry = LayerRegistry::new();
        registry.add_overlay("A");
        registry.extend_overlay("A", vec![boundary()]).unwrap();
        registry.add_overlay("A");

        assert_eq!(registry.overlays().len(), 1);
        assert_eq!(registry.overlay("A").unwrap().len(), 1);
    }

    #[test]
    fn test_extend_unknown_overlay() {
        let mut registry = LayerRegistry::new();
        let err = registry.extend_overlay("Missing", vec![boundary()]).unwrap_err();
        assert_eq!(err, LayerError::UnknownOverlay("Missing".to_string()));
    }

    #[test]
    fn test_extend_is_append_only() {
        let mut registry = LayerRegistry::new();
        registry.add_overlay("A");

        assert_eq!(registry.extend_overlay("A", vec![boundary()]).unwrap(), 1);
        assert_eq!(registry.extend_overlay("A", vec![boundary(), boundary()]).unwrap(), 2);
        assert_eq!(registry.overlay("A").unwrap().len(), 3);
    }

    #[test]
    fn test_visibility_affects_only_target() {
        let mut registry = LayerRegistry::new();
        registry.add_base_layer(BaseLayer::new(ImageryStyle::Satellite, "pk.test").unwrap());
        registry.add_overlay("A");
        registry.add_overlay("B");
        registry.extend_overlay("A", vec![boundary()]).unwrap();
        registry.extend_overlay("B", vec![boundary(), boundary()]).unwrap();
        registry.set_overlay_visible("A", true).unwrap();
        registry.set_overlay_visible("B", true).unwrap();
        assert_eq!(registry.visible_shapes().count(), 3);

        registry.set_overlay_visible("A", false).unwrap();
        assert_eq!(registry.visible_shapes().count(), 2);
        assert!(registry.overlay("B").unwrap().is_visible());
        assert_eq!(registry.overlay("A").unwrap().len(), 1);
        assert!(registry.active_base().is_some());
    }
}
