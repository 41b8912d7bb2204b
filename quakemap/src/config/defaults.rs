//! Default values for all configuration settings.
//!
//! Contains the `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::basemap::ImageryStyle;
use crate::feed::{DEFAULT_EARTHQUAKES_URL, DEFAULT_PLATE_BOUNDARIES_URL, DEFAULT_TIMEOUT_SECS};
use crate::layer::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_ZOOM};
use crate::magnitude::RadiusScale;
use crate::render::DEFAULT_TITLE;
use crate::style::{BorderMode, DEFAULT_FILL_OPACITY, DEFAULT_WEIGHT};

/// Default output page, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "map.html";

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "quakemap.log";

/// Default download timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS;

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            mapbox: MapboxSettings::default(),
            feeds: FeedSettings {
                earthquakes_url: DEFAULT_EARTHQUAKES_URL.to_string(),
                plate_boundaries_url: DEFAULT_PLATE_BOUNDARIES_URL.to_string(),
            },
            map: MapSettings {
                center_lat: DEFAULT_CENTER_LAT,
                center_lon: DEFAULT_CENTER_LON,
                zoom: DEFAULT_ZOOM,
                default_base: ImageryStyle::default(),
                output: PathBuf::from(DEFAULT_OUTPUT_FILE),
                title: DEFAULT_TITLE.to_string(),
            },
            markers: MarkerSettings {
                radius_scale: RadiusScale::default(),
                border: BorderMode::default(),
                fill_opacity: DEFAULT_FILL_OPACITY,
                weight: DEFAULT_WEIGHT,
            },
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
