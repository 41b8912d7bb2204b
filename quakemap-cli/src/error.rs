//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use quakemap::basemap::BaseMapError;
use quakemap::config::{ConfigFileError, ConfigKeyError};
use quakemap::feed::FeedError;
use quakemap::layer::LayerError;
use quakemap::render::RenderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Base layer definition failed
    BaseMap(BaseMapError),
    /// HTTP client could not be built
    Http(FeedError),
    /// Layer composition failed
    Layer(LayerError),
    /// Page generation failed
    Render(RenderError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::BaseMap(BaseMapError::MissingAccessToken) = self {
            eprintln!();
            eprintln!("Base layer tiles are served by Mapbox and need an access token:");
            eprintln!("  1. Create one at https://account.mapbox.com/access-tokens/");
            eprintln!("  2. Run: quakemap config set mapbox.access_token <token>");
            eprintln!("     or pass --access-token <token> to render");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::BaseMap(e) => write!(f, "Base map error: {}", e),
            CliError::Http(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Layer(e) => write!(f, "Layer error: {}", e),
            CliError::Render(e) => write!(f, "Failed to render map: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::BaseMap(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::Layer(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ConfigKeyError> for CliError {
    fn from(e: ConfigKeyError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<BaseMapError> for CliError {
    fn from(e: BaseMapError) -> Self {
        CliError::BaseMap(e)
    }
}

impl From<LayerError> for CliError {
    fn from(e: LayerError) -> Self {
        CliError::Layer(e)
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        CliError::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CliError::Config("bad".to_string()).to_string(),
            "Configuration error: bad"
        );
        assert_eq!(
            CliError::from(BaseMapError::MissingAccessToken).to_string(),
            "Base map error: MapBox access token is required"
        );
    }

    #[test]
    fn test_config_key_error_converts() {
        let err: CliError = ConfigKeyError::UnknownKey("map.colour".to_string()).into();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("map.colour")));
    }

    #[test]
    fn test_file_write_has_source() {
        use std::error::Error;

        let err = CliError::FileWrite {
            path: "map.html".to_string(),
            error: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("map.html"));
    }
}
