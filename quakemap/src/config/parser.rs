//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and the value parsers
//! shared with [`super::keys`]. It is the single place where INI key names
//! are mapped to struct fields.

use ini::{Ini, ParseOption, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::basemap::{ImageryStyle, MAX_ZOOM, MIN_ZOOM};
use crate::magnitude::RadiusScale;
use crate::style::BorderMode;

/// Reader options matching what the writer emits.
///
/// Values are written raw, so backslashes and quotes must be read back
/// verbatim rather than unescaped.
pub(super) fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// Blank values keep the default.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [mapbox] section
    if let Some(section) = ini.section(Some("mapbox")) {
        if let Some(v) = value(section, "access_token") {
            config.mapbox.access_token = Some(v.to_string());
        }
    }

    // [feeds] section
    if let Some(section) = ini.section(Some("feeds")) {
        if let Some(v) = value(section, "earthquakes_url") {
            config.feeds.earthquakes_url = check("feeds", "earthquakes_url", v, parse_url)?;
        }
        if let Some(v) = value(section, "plate_boundaries_url") {
            config.feeds.plate_boundaries_url =
                check("feeds", "plate_boundaries_url", v, parse_url)?;
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = value(section, "center_lat") {
            config.map.center_lat = check("map", "center_lat", v, parse_latitude)?;
        }
        if let Some(v) = value(section, "center_lon") {
            config.map.center_lon = check("map", "center_lon", v, parse_longitude)?;
        }
        if let Some(v) = value(section, "zoom") {
            config.map.zoom = check("map", "zoom", v, parse_zoom)?;
        }
        if let Some(v) = value(section, "default_base") {
            config.map.default_base = check("map", "default_base", v, parse_base)?;
        }
        if let Some(v) = value(section, "output") {
            config.map.output = expand_tilde(v);
        }
        if let Some(v) = value(section, "title") {
            config.map.title = v.to_string();
        }
    }

    // [markers] section
    if let Some(section) = ini.section(Some("markers")) {
        if let Some(v) = value(section, "radius_scale") {
            config.markers.radius_scale =
                check("markers", "radius_scale", v, RadiusScale::from_str)?;
        }
        if let Some(v) = value(section, "border") {
            config.markers.border = check("markers", "border", v, BorderMode::from_str)?;
        }
        if let Some(v) = value(section, "fill_opacity") {
            config.markers.fill_opacity = check("markers", "fill_opacity", v, parse_opacity)?;
        }
        if let Some(v) = value(section, "weight") {
            config.markers.weight = check("markers", "weight", v, parse_weight)?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = value(section, "timeout") {
            config.download.timeout = check("download", "timeout", v, parse_timeout)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = value(section, "file") {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

/// Trimmed, non-empty value of `key`.
fn value<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn check<T>(
    section: &str,
    key: &str,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigFileError> {
    parse(value).map_err(|reason| ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason,
    })
}

pub(super) fn parse_url(value: &str) -> Result<String, String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_string())
    } else {
        Err("must be a URL starting with 'http://' or 'https://'".to_string())
    }
}

pub(super) fn parse_latitude(value: &str) -> Result<f64, String> {
    parse_bounded(value, -90.0, 90.0, "must be a latitude between -90 and 90")
}

pub(super) fn parse_longitude(value: &str) -> Result<f64, String> {
    parse_bounded(value, -180.0, 180.0, "must be a longitude between -180 and 180")
}

pub(super) fn parse_opacity(value: &str) -> Result<f64, String> {
    parse_bounded(value, 0.0, 1.0, "must be a number between 0 and 1")
}

pub(super) fn parse_weight(value: &str) -> Result<f64, String> {
    parse_bounded(value, 0.0, f64::MAX, "must be a non-negative number")
}

pub(super) fn parse_zoom(value: &str) -> Result<u8, String> {
    value
        .parse::<u8>()
        .ok()
        .filter(|z| (MIN_ZOOM..=MAX_ZOOM).contains(z))
        .ok_or_else(|| format!("must be an integer between {} and {}", MIN_ZOOM, MAX_ZOOM))
}

pub(super) fn parse_timeout(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .ok()
        .filter(|t| *t > 0)
        .ok_or_else(|| "must be a positive integer".to_string())
}

pub(super) fn parse_base(value: &str) -> Result<ImageryStyle, String> {
    value.parse::<ImageryStyle>().map_err(|e| e.to_string())
}

fn parse_bounded(value: &str, min: f64, max: f64, reason: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= min && *n <= max)
        .ok_or_else(|| reason.to_string())
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str_opt(content, parse_option()).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_yields_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = parse("[mapbox]\naccess_token =\n[map]\nzoom =   \n").unwrap();
        assert!(config.mapbox.access_token.is_none());
        assert_eq!(config.map.zoom, ConfigFile::default().map.zoom);
    }

    #[test]
    fn test_parses_all_sections() {
        let config = parse(
            "[mapbox]\naccess_token = pk.abc\n\
             [feeds]\nearthquakes_url = https://example.com/q.json\n\
             [map]\ncenter_lat = 10.5\ncenter_lon = -20\nzoom = 6\ndefault_base = light\n\
             [markers]\nradius_scale = pixels\nborder = black\nfill_opacity = 0.4\nweight = 2\n\
             [download]\ntimeout = 5\n",
        )
        .unwrap();

        assert_eq!(config.mapbox.access_token.as_deref(), Some("pk.abc"));
        assert_eq!(config.feeds.earthquakes_url, "https://example.com/q.json");
        assert_eq!(config.map.center_lat, 10.5);
        assert_eq!(config.map.center_lon, -20.0);
        assert_eq!(config.map.zoom, 6);
        assert_eq!(config.map.default_base, ImageryStyle::Grayscale);
        assert_eq!(config.markers.radius_scale, RadiusScale::Pixels);
        assert_eq!(config.markers.border, BorderMode::Black);
        assert_eq!(config.markers.fill_opacity, 0.4);
        assert_eq!(config.markers.weight, 2.0);
        assert_eq!(config.download.timeout, 5);
    }

    #[test]
    fn test_rejects_out_of_range_latitude() {
        let err = parse("[map]\ncenter_lat = 91\n").unwrap_err();
        assert!(err.to_string().contains("map.center_lat"));
    }

    #[test]
    fn test_rejects_unknown_base() {
        assert!(parse("[map]\ndefault_base = watercolor\n").is_err());
    }

    #[test]
    fn test_rejects_non_http_feed() {
        assert!(parse("[feeds]\nplate_boundaries_url = ftp://example.com\n").is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(parse("[download]\ntimeout = 0\n").is_err());
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_zoom("18"), Ok(18));
        assert!(parse_zoom("19").is_err());
        assert!(parse_opacity("1.5").is_err());
        assert!(parse_opacity("NaN").is_err());
        assert!(parse_weight("-1").is_err());
        assert_eq!(parse_longitude("-180"), Ok(-180.0));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/maps/out.html");
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("maps/out.html"));
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_backslashes_and_quotes_are_literal() {
        let config = parse("[map]\ntitle = \"Quakes\" \\n week\n").unwrap();
        assert_eq!(config.map.title, r#""Quakes" \n week"#);
    }
}
