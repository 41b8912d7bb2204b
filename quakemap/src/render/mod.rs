//! Page rendering.
//!
//! Serializes a composed [`MapContext`] into a self-contained HTML page. The
//! page loads Leaflet from a CDN and mounts the map into a single container
//! element; everything the map shows is carried in an embedded JSON payload
//! ([`MapDocument`]).

mod template;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::feed::{BoundaryGeometry, LonLat};
use crate::layer::{MapContext, Shape};
use crate::legend::{LegendRow, LEGEND_TITLE};
use crate::style::escape_html;

pub use template::LEAFLET_VERSION;

/// Default page title.
pub const DEFAULT_TITLE: &str = "Earthquakes and Plate Boundaries";

/// Corner of the map holding the legend.
pub const LEGEND_POSITION: &str = "bottomright";

/// Errors that can occur when rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Payload could not be serialized
    #[error("Failed to serialize map payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Payload embedded in the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub container: String,
    pub center: [f64; 2],
    pub zoom: u8,
    pub base_layers: Vec<BaseLayerDoc>,
    pub active_base: Option<String>,
    pub overlays: Vec<OverlayDoc>,
    pub control: Option<ControlDoc>,
    pub legend: LegendDoc,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayerDoc {
    pub name: String,
    pub id: String,
    pub url_template: String,
    pub access_token: String,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

#[derive(Debug, Serialize)]
pub struct OverlayDoc {
    pub name: String,
    pub visible: bool,
    /// GeoJSON features, one per shape
    pub features: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ControlDoc {
    pub collapsed: bool,
}

#[derive(Debug, Serialize)]
pub struct LegendDoc {
    pub title: String,
    pub position: String,
    pub rows: Vec<LegendRow>,
}

impl MapDocument {
    /// Builds the payload from a composed map and its legend.
    pub fn from_context(ctx: &MapContext, legend: &[LegendRow]) -> Self {
        let registry = &ctx.registry;

        let base_layers = registry
            .base_layers()
            .iter()
            .map(|layer| BaseLayerDoc {
                name: layer.name().to_string(),
                id: layer.style_id().to_string(),
                url_template: layer.url_template().to_string(),
                access_token: layer.access_token().to_string(),
                attribution: layer.attribution().to_string(),
                min_zoom: layer.min_zoom(),
                max_zoom: layer.max_zoom(),
            })
            .collect();

        let overlays = registry
            .overlays()
            .iter()
            .map(|overlay| OverlayDoc {
                name: overlay.name().to_string(),
                visible: overlay.is_visible(),
                features: overlay.shapes().iter().map(shape_feature).collect(),
            })
            .collect();

        Self {
            container: ctx.view.container_id.clone(),
            center: [ctx.view.center_lat, ctx.view.center_lon],
            zoom: ctx.view.zoom,
            base_layers,
            active_base: registry.active_base().map(|l| l.name().to_string()),
            overlays,
            control: registry.control().map(|c| ControlDoc {
                collapsed: c.collapsed,
            }),
            legend: LegendDoc {
                title: LEGEND_TITLE.to_string(),
                position: LEGEND_POSITION.to_string(),
                rows: legend.to_vec(),
            },
        }
    }
}

fn position(p: &LonLat) -> [f64; 2] {
    [p.lon, p.lat]
}

fn line(points: &[LonLat]) -> Vec<[f64; 2]> {
    points.iter().map(position).collect()
}

fn geometry_json(geometry: &BoundaryGeometry) -> Value {
    let coordinates = match geometry {
        BoundaryGeometry::LineString(points) => json!(line(points)),
        BoundaryGeometry::MultiLineString(lines) | BoundaryGeometry::Polygon(lines) => {
            json!(lines.iter().map(|l| line(l)).collect::<Vec<_>>())
        }
        BoundaryGeometry::MultiPolygon(polygons) => json!(polygons
            .iter()
            .map(|rings| rings.iter().map(|l| line(l)).collect::<Vec<_>>())
            .collect::<Vec<_>>()),
    };
    json!({ "type": geometry.type_name(), "coordinates": coordinates })
}

fn shape_feature(shape: &Shape) -> Value {
    match shape {
        Shape::Marker(marker) => json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": position(&marker.location) },
            "properties": {
                "style": marker.style,
                "radiusScale": marker.radius_scale.as_str(),
                "popup": marker.popup.to_html(),
            }
        }),
        Shape::Boundary(boundary) => json!({
            "type": "Feature",
            "geometry": geometry_json(&boundary.geometry),
            "properties": {
                "style": boundary.style,
                "popup": boundary.name.as_deref().map(|n| format!("<h3>{}</h3>", escape_html(n))),
            }
        }),
    }
}

/// Serializes `value` for embedding inside a `<script>` element.
///
/// `<` only occurs inside JSON strings, where `\u003c` is an equivalent
/// escape, so the output can never close the script element early.
pub fn to_script_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Renders the complete HTML page for a composed map.
pub fn render_page(
    ctx: &MapContext,
    legend: &[LegendRow],
    title: &str,
) -> Result<String, RenderError> {
    let document = MapDocument::from_context(ctx, legend);
    let payload = to_script_json(&document)?;

    Ok(template::PAGE_TEMPLATE
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{LEAFLET_VERSION}}", LEAFLET_VERSION)
        .replace("{{CONTAINER}}", &escape_html(&ctx.view.container_id))
        .replace("{{PAYLOAD}}", &payload))
}
