//! Error types for folio_site

use std::path::PathBuf;

use folio_core::ConfigurationError;
use thiserror::Error;

/// Errors raised while loading and mounting the hero
#[derive(Error, Debug)]
pub enum SiteError {
    /// Failed to read a configuration file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error
    #[error("Failed to parse site configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid motion or interaction parameters
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Content that cannot be turned into a hero (empty headline, bad link, ...)
    #[error("Invalid hero content: {0}")]
    InvalidContent(String),

    /// Host layout does not match the content
    #[error("Layout mismatch: {0}")]
    Layout(String),
}

/// Result type for folio_site operations
pub type Result<T> = std::result::Result<T, SiteError>;
