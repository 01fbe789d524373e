//! Classification of generator output.
//!
//! The generator speaks a tiny line protocol: a line starting with
//! [`WARNING_PREFIX`] is a warning, anything else is informational. The exit
//! status decides whether the run as a whole failed.
//!
//! ## Examples
//!
//! ```
//! use typesync_lib::{Severity, classify};
//!
//! let diagnostics = classify("Warning: disk low\n", Some(2));
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics[0].severity, Severity::Warning);
//! assert_eq!(diagnostics[0].message, "disk low");
//! assert_eq!(diagnostics[1].severity, Severity::Failure);
//! ```

use std::fmt;

/// Marker that starts a warning line.
pub const WARNING_PREFIX: &str = "Warning: ";

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Ordinary generator output.
    Info,
    /// A recognised warning line.
    Warning,
    /// The generator exited unsuccessfully.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Failure => "failure",
        };
        f.write_str(label)
    }
}

/// One classified message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the message.
    pub severity: Severity,
    /// Message text, without the warning marker.
    pub message: String,
}

impl Diagnostic {
    /// An informational diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// A warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// A failure diagnostic.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            message: message.into(),
        }
    }
}

/// Classifies combined generator output and its exit status.
///
/// `status` is `None` when the process was terminated by a signal. Every
/// line is classified independently; a failure never suppresses earlier
/// diagnostics and is always the last entry.
pub fn classify(output: &str, status: Option<i32>) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| match line.strip_prefix(WARNING_PREFIX) {
            Some(message) => Some(Diagnostic::warning(message)),
            None if line.trim().is_empty() => None,
            None => Some(Diagnostic::info(line)),
        })
        .collect();

    match status {
        Some(0) => {}
        Some(code) => diagnostics.push(Diagnostic::failure(format!("codegen failed with status {code}"))),
        None => diagnostics.push(Diagnostic::failure("codegen terminated by signal")),
    }

    diagnostics
}
