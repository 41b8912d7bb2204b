//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let access_token = config.mapbox.access_token.as_deref().unwrap_or("");

    format!(
        r#"[mapbox]
; Access token used for every base layer tile request.
; Create one at https://account.mapbox.com/access-tokens/
access_token = {}

[feeds]
; GeoJSON sources fetched on every render
earthquakes_url = {}
plate_boundaries_url = {}

[map]
; Initial view of the page
center_lat = {}
center_lon = {}
; Zoom level between 0 and 18
zoom = {}
; Base layer shown first: satellite, grayscale, outdoors
default_base = {}
; Page written by `quakemap render`
output = {}
title = {}

[markers]
; meters: circle area follows the map scale (30000 m per magnitude unit)
; pixels: fixed screen size (3 px per magnitude unit)
radius_scale = {}
; Outline color: fill (same as the bucket color) or black
border = {}
fill_opacity = {}
weight = {}

[download]
; Per-request timeout in seconds
timeout = {}

[logging]
file = {}
"#,
        access_token,
        config.feeds.earthquakes_url,
        config.feeds.plate_boundaries_url,
        config.map.center_lat,
        config.map.center_lon,
        config.map.zoom,
        config.map.default_base.as_str(),
        path_to_string(&config.map.output),
        config.map.title,
        config.markers.radius_scale.as_str(),
        config.markers.border.as_str(),
        config.markers.fill_opacity,
        config.markers.weight,
        config.download.timeout,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing the home directory to ~.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_emits_every_section() {
        let content = to_config_string(&ConfigFile::default());
        for section in [
            "[mapbox]",
            "[feeds]",
            "[map]",
            "[markers]",
            "[download]",
            "[logging]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
        assert!(content.contains("default_base = satellite"));
        assert!(content.contains("radius_scale = meters"));
        assert!(content.contains("access_token = \n"));
    }

    #[test]
    fn test_path_to_string_collapses_home() {
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".quakemap").join("quakemap.log");
            assert_eq!(path_to_string(&path), "~/.quakemap/quakemap.log");
        }
    }
}
