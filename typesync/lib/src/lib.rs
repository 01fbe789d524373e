//! Regeneration harness for the typesync client generator.
//!
//! This library keeps a generated API client in sync with a backend: it
//! builds the generator's command line from a [`GeneratorConfig`], runs the
//! generator, classifies its output into [`Diagnostic`]s, and re-runs it when
//! backend files change.
//!
//! ## Configuration
//!
//! - [`GeneratorConfig`] - Paths, generator flags and harness options
//!
//! ## Pipeline
//!
//! - [`Invocation`] - A resolved generator command line
//! - [`classify`] - Turns generator output into [`Diagnostic`]s
//! - [`Harness`] - Owns the [`WatchSet`] and drives regeneration
//! - [`Reporter`] - Host hooks receiving harness messages
//!
//! ## Watching
//!
//! - [`WatchSet`] - Shallow listing of the backend root
//! - [`BackendWatcher`] - Forwards file changes into [`Harness::run`]

pub mod config;
mod diagnostic;
mod error;
mod harness;
mod invocation;
mod watch;

pub use config::{CONFIG_FILE_NAME, GeneratorConfig};
pub use diagnostic::{Diagnostic, Severity, WARNING_PREFIX, classify};
pub use error::{HarnessError, Result};
pub use harness::{FINISHED_MESSAGE, Harness, HarnessState, Reporter, RunReport, TracingReporter};
pub use invocation::{Invocation, RunOutput};
pub use watch::{BackendWatcher, WatchSet};
