//! Error types for route definitions.

use thiserror::Error;

/// Errors raised while building or validating route descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefineError {
    /// A placeholder name appears more than once in a single pattern.
    #[error("route pattern '{pattern}' repeats placeholder '<{name}>'")]
    DuplicatePlaceholder {
        /// The offending pattern.
        pattern: String,
        /// The repeated placeholder name.
        name: String,
    },

    /// A path parameter was declared for a placeholder the pattern lacks.
    #[error("route '{route}' declares parameter '{name}' which is not in its pattern")]
    UnknownParam {
        /// Declared route name.
        route: String,
        /// The parameter name.
        name: String,
    },
}
