//! GeoJSON parsing for the two feeds.
//!
//! The top-level document must be a feature collection. Each feature is then
//! decoded on its own so that one malformed feature is dropped without
//! losing the rest of the collection.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::types::{
    BoundaryGeometry, EarthquakeRecord, FeedError, LonLat, ParsedFeed, PlateBoundary,
};

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<Value>,
}

#[derive(Deserialize)]
struct RawQuake {
    properties: Option<RawQuakeProperties>,
    geometry: Option<RawPoint>,
}

// Property values are decoded loosely: a wrong type becomes `None` rather
// than dropping the whole feature.
#[derive(Deserialize)]
struct RawQuakeProperties {
    mag: Option<Value>,
    place: Option<Value>,
    time: Option<Value>,
}

#[derive(Deserialize)]
struct RawPoint {
    coordinates: Vec<Value>,
}

#[derive(Deserialize)]
struct RawBoundary {
    properties: Option<RawBoundaryProperties>,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawBoundaryProperties {
    #[serde(rename = "Name", alias = "name")]
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum RawGeometry {
    LineString(Vec<Vec<f64>>),
    MultiLineString(Vec<Vec<Vec<f64>>>),
    Polygon(Vec<Vec<Vec<f64>>>),
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

fn parse_collection(body: &[u8]) -> Result<Vec<Value>, FeedError> {
    serde_json::from_slice::<RawCollection>(body)
        .map(|c| c.features)
        .map_err(|e| FeedError::Json(e.to_string()))
}

/// Parses the earthquake feed.
///
/// Features without a usable point location are skipped. A missing magnitude
/// is kept as `None` and handled by the stylist.
pub fn parse_earthquakes(body: &[u8]) -> Result<ParsedFeed<EarthquakeRecord>, FeedError> {
    let features = parse_collection(body)?;
    let mut parsed = ParsedFeed::default();

    for (index, feature) in features.into_iter().enumerate() {
        match quake_from_value(feature) {
            Some(record) => parsed.items.push(record),
            None => {
                debug!(index, "Skipping malformed earthquake feature");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

fn quake_from_value(value: Value) -> Option<EarthquakeRecord> {
    let raw: RawQuake = serde_json::from_value(value).ok()?;
    let coordinates = raw.geometry?.coordinates;
    let lon_lat = coordinates
        .iter()
        .take(2)
        .map(Value::as_f64)
        .collect::<Option<Vec<f64>>>()?;
    let location = LonLat::from_coordinates(&lon_lat)?;
    let depth_km = coordinates
        .get(2)
        .and_then(Value::as_f64)
        .filter(|d| d.is_finite());

    let (magnitude, place, time_ms) = match raw.properties {
        Some(p) => (
            p.mag.as_ref().and_then(Value::as_f64),
            p.place.as_ref().and_then(Value::as_str).map(str::to_owned),
            p.time.as_ref().and_then(epoch_millis),
        ),
        None => (None, None, None),
    };

    Some(EarthquakeRecord {
        magnitude,
        location,
        depth_km,
        place,
        time_ms,
    })
}

/// Epoch milliseconds from an integer, or from a float the feed wrote as such.
fn epoch_millis(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|t| t.is_finite() && t.abs() < i64::MAX as f64)
            .map(|t| t as i64)
    })
}

/// Parses the plate boundary feed.
///
/// Features with an unsupported geometry type or any invalid position are
/// skipped.
pub fn parse_boundaries(body: &[u8]) -> Result<ParsedFeed<PlateBoundary>, FeedError> {
    let features = parse_collection(body)?;
    let mut parsed = ParsedFeed::default();

    for (index, feature) in features.into_iter().enumerate() {
        match boundary_from_value(feature) {
            Some(boundary) => parsed.items.push(boundary),
            None => {
                debug!(index, "Skipping malformed plate boundary feature");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

fn boundary_from_value(value: Value) -> Option<PlateBoundary> {
    let raw: RawBoundary = serde_json::from_value(value).ok()?;
    let geometry = match raw.geometry? {
        RawGeometry::LineString(line) => BoundaryGeometry::LineString(line_of(&line)?),
        RawGeometry::MultiLineString(lines) => {
            BoundaryGeometry::MultiLineString(lines_of(&lines)?)
        }
        RawGeometry::Polygon(rings) => BoundaryGeometry::Polygon(lines_of(&rings)?),
        RawGeometry::MultiPolygon(polygons) => BoundaryGeometry::MultiPolygon(
            polygons
                .iter()
                .map(|rings| lines_of(rings))
                .collect::<Option<Vec<_>>>()?,
        ),
    };

    if geometry.position_count() == 0 {
        return None;
    }

    Some(PlateBoundary {
        name: raw.properties.and_then(|p| p.name),
        geometry,
    })
}

fn line_of(positions: &[Vec<f64>]) -> Option<Vec<LonLat>> {
    positions
        .iter()
        .map(|p| LonLat::from_coordinates(p))
        .collect()
}

fn lines_of(lines: &[Vec<Vec<f64>>]) -> Option<Vec<Vec<LonLat>>> {
    lines.iter().map(|line| line_of(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"generated": 1700000000000, "count": 3},
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 4.6, "place": "10 km SW of Somewhere", "time": 1700000000000, "tsunami": 0},
                "geometry": {"type": "Point", "coordinates": [-117.5, 35.7, 8.2]},
                "id": "ci1"
            },
            {
                "type": "Feature",
                "properties": {"mag": null, "place": "Offshore", "time": 1700000100000},
                "geometry": {"type": "Point", "coordinates": [140.1, 36.2]},
                "id": "us2"
            },
            {
                "type": "Feature",
                "properties": {"mag": 2.1, "place": "Nowhere", "time": 1700000200000},
                "geometry": null,
                "id": "nc3"
            }
        ]
    }"#;

    #[test]
    fn test_parse_earthquakes_keeps_valid_features() {
        let parsed = parse_earthquakes(QUAKES.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.skipped, 1);

        let first = &parsed.items[0];
        assert_eq!(first.magnitude, Some(4.6));
        assert_eq!(first.location, LonLat { lon: -117.5, lat: 35.7 });
        assert_eq!(first.depth_km, Some(8.2));
        assert_eq!(first.place.as_deref(), Some("10 km SW of Somewhere"));
        assert_eq!(first.time_ms, Some(1_700_000_000_000));
    }

    #[test]
    fn test_parse_earthquakes_keeps_null_magnitude() {
        let parsed = parse_earthquakes(QUAKES.as_bytes()).unwrap();
        let offshore = &parsed.items[1];
        assert_eq!(offshore.magnitude, None);
        assert_eq!(offshore.depth_km, None);
    }

    #[test]
    fn test_parse_earthquakes_skips_bad_coordinates() {
        let json = r#"{"features": [
            {"properties": {"mag": 1.0}, "geometry": {"coordinates": [10.0]}},
            {"properties": {"mag": 1.0}, "geometry": {"coordinates": [200.0, 10.0]}},
            {"properties": {"mag": 1.0}, "geometry": {"coordinates": [10.0, -95.0]}},
            {"properties": {"mag": 1.0}, "geometry": {"coordinates": ["10.0", 10.0]}},
            {"properties": {"mag": 1.0}, "geometry": {"coordinates": [10.0, 10.0]}}
        ]}"#;

        let parsed = parse_earthquakes(json.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.skipped, 4);
    }

    #[test]
    fn test_parse_earthquakes_mistyped_properties_fall_back() {
        let json = r#"{"features": [
            {"properties": {"mag": "4.5", "place": 7, "time": 1700000000000}, "geometry": {"coordinates": [10.0, 10.0]}},
            {"properties": {"mag": 2.5, "time": 1.7e12}, "geometry": {"coordinates": [10.0, 10.0, null]}},
            {"properties": {"mag": 3.0, "time": "yesterday"}, "geometry": {"coordinates": [-20.0, 5.0, "deep"]}}
        ]}"#;

        let parsed = parse_earthquakes(json.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 3);
        assert_eq!(parsed.skipped, 0);

        let text_mag = &parsed.items[0];
        assert_eq!(text_mag.magnitude, None);
        assert_eq!(text_mag.place, None);
        assert_eq!(text_mag.time_ms, Some(1_700_000_000_000));

        let float_time = &parsed.items[1];
        assert_eq!(float_time.magnitude, Some(2.5));
        assert_eq!(float_time.time_ms, Some(1_700_000_000_000));
        assert_eq!(float_time.depth_km, None);

        let bad_time = &parsed.items[2];
        assert_eq!(bad_time.time_ms, None);
        assert_eq!(bad_time.depth_km, None);
        assert_eq!(bad_time.location, LonLat { lon: -20.0, lat: 5.0 });
    }

    #[test]
    fn test_parse_earthquakes_missing_properties() {
        let json = r#"{"features": [{"geometry": {"coordinates": [1.0, 2.0]}}]}"#;
        let parsed = parse_earthquakes(json.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].magnitude, None);
        assert_eq!(parsed.items[0].place, None);
    }

    #[test]
    fn test_parse_rejects_non_collection() {
        let result = parse_earthquakes(b"<html>503 Service Unavailable</html>");
        assert!(matches!(result, Err(FeedError::Json(_))));

        let result = parse_boundaries(br#"{"type": "Feature"}"#);
        assert!(matches!(result, Err(FeedError::Json(_))));
    }

    #[test]
    fn test_parse_boundaries() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"LAYER": "plate boundary", "Name": "AF-AN", "Source": "Mueller"},
                    "geometry": {"type": "LineString", "coordinates": [[-0.43, -54.85], [-0.04, -54.82], [0.22, -54.4]]}
                },
                {
                    "type": "Feature",
                    "properties": {"name": "PA-NA"},
                    "geometry": {"type": "MultiLineString", "coordinates": [[[-120.0, 35.0], [-121.0, 36.0]], [[-122.0, 37.0], [-123.0, 38.0]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"Name": "point"},
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
                },
                {
                    "type": "Feature",
                    "properties": {"Name": "broken"},
                    "geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [1.0, 200.0]]}
                }
            ]
        }"#;

        let parsed = parse_boundaries(json.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.skipped, 2);

        let first = &parsed.items[0];
        assert_eq!(first.name.as_deref(), Some("AF-AN"));
        assert_eq!(first.geometry.type_name(), "LineString");
        assert_eq!(first.geometry.position_count(), 3);

        let second = &parsed.items[1];
        assert_eq!(second.name.as_deref(), Some("PA-NA"));
        assert_eq!(second.geometry.lines().len(), 2);
    }

    #[test]
    fn test_parse_boundary_polygon() {
        let json = r#"{"features": [{
            "properties": null,
            "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}
        }]}"#;

        let parsed = parse_boundaries(json.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].name, None);
        assert!(matches!(parsed.items[0].geometry, BoundaryGeometry::Polygon(_)));
    }

    #[test]
    fn test_parse_boundary_empty_geometry_skipped() {
        let json = r#"{"features": [{"geometry": {"type": "MultiLineString", "coordinates": []}}]}"#;
        let parsed = parse_boundaries(json.as_bytes()).unwrap();
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.skipped, 1);
    }
}
