//! User configuration for QuakeMap.
//!
//! Settings are stored in `~/.quakemap/config.ini`, one `[section]` per
//! concern. A missing file means defaults; invalid values are rejected when
//! the file is loaded or when a key is set from the CLI.
//!
//! # Example
//!
//! ```ignore
//! use quakemap::config::{ConfigFile, ConfigKey};
//!
//! let mut config = ConfigFile::load()?;
//! ConfigKey::MapDefaultBase.set(&mut config, "outdoors")?;
//! config.save()?;
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_LOG_FILE_NAME, DEFAULT_OUTPUT_FILE};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, DownloadSettings, FeedSettings, LoggingSettings, MapSettings, MapboxSettings,
    MarkerSettings,
};
