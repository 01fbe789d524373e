//! Error types for the typesync generator.

use thiserror::Error;
use typesync_define::DefineError;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read the route manifest
    #[error("Failed to read route manifest '{path}': {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The route manifest is not valid JSON or does not match the schema
    #[error("Failed to parse route manifest '{path}': {source}")]
    ManifestParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A route descriptor is inconsistent
    #[error("Invalid route definition: {0}")]
    Definition(#[from] DefineError),

    /// A name format template is malformed
    #[error("Invalid name format '{template}': {reason}")]
    InvalidFormat { template: String, reason: String },

    /// A name format template references a key that does not exist
    #[error("Unknown key '{key}' in name format '{template}'")]
    UnknownFormatKey { template: String, key: String },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Two route x method pairs render to the same generated name.
    ///
    /// This occurs when distinct descriptors share a declared name and
    /// method (for example the same endpoint registered under two
    /// patterns), or when a custom format drops the method from names.
    #[error(
        "Naming collision: '{name}' is generated for both {first} and {second}. Adjust the name formats or rename one endpoint"
    )]
    NamingCollision {
        /// The generated name both routes map to.
        name: String,
        /// Description of the first route (`METHOD pattern`).
        first: String,
        /// Description of the second route.
        second: String,
    },
}
