//! Error types for the typesync harness library.

use thiserror::Error;

/// Errors surfaced to the harness's host.
///
/// A generator that runs and exits non-zero is not an error; it is reported
/// as a failure diagnostic. Only problems that prevent a run from happening
/// at all end up here.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Failed to read the configuration file.
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A configured path could not be made absolute.
    #[error("failed to resolve path '{path}': {source}")]
    Resolve {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator executable could not be launched.
    #[error("failed to start generator '{program}': {source}")]
    Start {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Listing the backend root failed.
    #[error("failed to list backend root '{path}': {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Preparing or promoting staged output failed.
    #[error("failed to stage output in '{path}': {source}")]
    Staging {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the generator failed.
    #[error("generator i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file watcher could not be set up.
    #[error("failed to watch backend files: {0}")]
    Watch(#[from] notify::Error),
}

/// Result alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
