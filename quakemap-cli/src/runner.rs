//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and file output
//! so command handlers stay focused on their own work.

use std::path::{Path, PathBuf};

use quakemap::config::ConfigFile;
use quakemap::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    ///   and mirrors log events to stdout
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("QuakeMap v{}", quakemap::VERSION);
        info!("QuakeMap CLI: {} command", command);
    }

    /// Write the rendered page to `path`.
    pub fn save_page(&self, path: &Path, html: &str) -> Result<(), CliError> {
        let to_cli_error = |error| CliError::FileWrite {
            path: path.display().to_string(),
            error,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(to_cli_error)?;
        }
        std::fs::write(path, html).map_err(to_cli_error)?;

        let size_kb = html.len() as f64 / 1024.0;
        info!(path = %path.display(), size_kb, "Map page written");
        println!("✓ Saved map: {} ({:.1} KB)", path.display(), size_kb);
        Ok(())
    }
}

/// Split the configured log file path into directory and file name.
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let log_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_dir);
    let log_file = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| default_log_file().to_string());
    (log_dir, log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, file) = split_log_path(Path::new("/var/log/quakemap/run.log"));
        assert_eq!(dir, PathBuf::from("/var/log/quakemap"));
        assert_eq!(file, "run.log");
    }

    #[test]
    fn test_split_bare_file_name_uses_default_dir() {
        let (dir, file) = split_log_path(Path::new("run.log"));
        assert_eq!(dir, default_log_dir());
        assert_eq!(file, "run.log");
    }
}
