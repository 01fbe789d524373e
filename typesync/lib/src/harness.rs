//! The regeneration harness.
//!
//! A [`Harness`] owns one generator setup: its resolved paths, its
//! [`WatchSet`] and its [`Reporter`]. It runs the pipeline once on
//! [`build_start`](Harness::build_start) and again whenever a path inside
//! the backend root changes.
//!
//! ## State Machine
//!
//! ```text
//!          build_start / relevant change
//!   Idle ─────────────────────────────────▶ Generating
//!    ▲                                          │
//!    └──────────── generator exited ────────────┘
//! ```
//!
//! Every method that generates takes `&mut self`, so a harness never has
//! two runs in flight. [`Harness::run`] drains notifications that queued up
//! during a run and folds them into a single follow-up run.
//!
//! ## Staged Output
//!
//! With `stageOutput` enabled the generator writes into a temporary
//! directory next to the output directory. Its files replace the previous
//! artifacts only after the generator exits with status 0, so a failed run
//! leaves the last good client in place.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::{GeneratorConfig, resolve_path};
use crate::diagnostic::{Diagnostic, Severity, classify};
use crate::error::{HarnessError, Result};
use crate::invocation::Invocation;
use crate::watch::WatchSet;

/// Message reported after a successful run.
pub const FINISHED_MESSAGE: &str = "codegen finished";

/// Sink for harness messages, supplied by the host.
pub trait Reporter {
    /// An informational message.
    fn info(&mut self, message: &str);

    /// A warning, including generator failures.
    fn warn(&mut self, message: &str);

    /// A run that could not complete, such as a generator that failed to
    /// start. Defaults to [`warn`](Reporter::warn).
    fn error(&mut self, message: &str) {
        self.warn(message);
    }
}

/// Reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&mut self, message: &str) {
        tracing::info!(target: "typesync", "{message}");
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!(target: "typesync", "{message}");
    }

    fn error(&mut self, message: &str) {
        tracing::error!(target: "typesync", "{message}");
    }
}

/// Whether a generation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    /// Waiting for a trigger.
    Idle,
    /// A generator process is running.
    Generating,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Classified generator output.
    pub diagnostics: Vec<Diagnostic>,
    /// Generator exit status.
    pub status: Option<i32>,
}

impl RunReport {
    /// Whether the generator exited with status 0.
    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// Warning diagnostics, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Drives the generator for one backend.
pub struct Harness<R: Reporter> {
    config: GeneratorConfig,
    out_dir: PathBuf,
    backend_root: PathBuf,
    watch_set: WatchSet,
    state: HarnessState,
    reporter: R,
}

impl<R: Reporter> Harness<R> {
    /// Creates an idle harness with an empty watch set.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configured paths cannot be resolved.
    pub fn new(config: GeneratorConfig, reporter: R) -> Result<Self> {
        let out_dir = config.resolved_out_dir()?;
        let backend_root = config.resolved_backend_root()?;
        Ok(Self {
            config,
            out_dir,
            backend_root,
            watch_set: WatchSet::default(),
            state: HarnessState::Idle,
            reporter,
        })
    }

    /// The configuration this harness runs with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolved output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Resolved backend root.
    pub fn backend_root(&self) -> &Path {
        &self.backend_root
    }

    /// Files registered at start.
    pub fn watch_set(&self) -> &WatchSet {
        &self.watch_set
    }

    /// Current state.
    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// The host's reporter.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Whether a change at `path` should trigger regeneration.
    ///
    /// True iff `path` lies within the backend root, compared component-wise
    /// after both are made absolute and normalised.
    pub fn is_relevant(&self, path: &Path) -> bool {
        resolve_path(path).is_ok_and(|path| path.starts_with(&self.backend_root))
    }

    /// Lists the watch set, then runs the pipeline once.
    #[tracing::instrument(skip(self), fields(backend_root = %self.backend_root.display()))]
    pub async fn build_start(&mut self) -> Result<RunReport> {
        self.watch_set = WatchSet::scan(&self.backend_root)?;
        self.generate().await
    }

    /// Re-runs the pipeline if `path` is relevant; returns `None` otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn watch_change(&mut self, path: &Path) -> Result<Option<RunReport>> {
        if !self.is_relevant(path) {
            tracing::debug!("ignoring change outside backend root");
            return Ok(None);
        }
        self.generate().await.map(Some)
    }

    /// Consumes change notifications until the channel closes.
    ///
    /// Notifications queued while a run is in flight are coalesced into at
    /// most one follow-up run. Irrelevant paths are dropped.
    ///
    /// A run that fails with an error (for example, the generator cannot be
    /// started) is reported through [`Reporter::error`] and the loop keeps
    /// going; the next relevant change retries.
    pub async fn run(&mut self, mut changes: UnboundedReceiver<PathBuf>) {
        while let Some(path) = changes.recv().await {
            if !self.is_relevant(&path) {
                tracing::debug!(path = %path.display(), "ignoring change outside backend root");
                continue;
            }

            loop {
                tracing::debug!(path = %path.display(), "backend changed");
                if let Err(error) = self.generate().await {
                    tracing::debug!(%error, "generation failed, waiting for the next change");
                    self.reporter.error(&error.to_string());
                }

                let mut pending = 0usize;
                while let Ok(queued) = changes.try_recv() {
                    if self.is_relevant(&queued) {
                        pending += 1;
                    }
                }
                if pending == 0 {
                    break;
                }
                tracing::debug!(coalesced = pending, "changes arrived during generation");
            }
        }
    }

    /// Runs the pipeline once, regardless of triggers.
    pub async fn generate(&mut self) -> Result<RunReport> {
        self.state = HarnessState::Generating;
        let result = self.generate_once().await;
        self.state = HarnessState::Idle;
        result
    }

    async fn generate_once(&mut self) -> Result<RunReport> {
        let staging = if self.config.stage_output {
            Some(Staging::create(&self.out_dir)?)
        } else {
            None
        };
        let target = staging
            .as_ref()
            .map_or(self.out_dir.as_path(), |staging| staging.path());

        let invocation = Invocation::new(&self.config, target, &self.backend_root);
        let run = invocation.run().await?;
        let diagnostics = classify(&run.output, run.status);

        for diagnostic in &diagnostics {
            match diagnostic.severity {
                Severity::Info => self.reporter.info(&diagnostic.message),
                Severity::Warning | Severity::Failure => self.reporter.warn(&diagnostic.message),
            }
        }

        if run.success() {
            if let Some(staging) = staging {
                staging.promote(&self.out_dir)?;
            }
            self.reporter.info(FINISHED_MESSAGE);
        } else if staging.is_some() {
            tracing::debug!(out_dir = %self.out_dir.display(), "discarding staged output");
        }

        Ok(RunReport {
            diagnostics,
            status: run.status,
        })
    }
}

/// A temporary output directory next to the real one.
struct Staging {
    dir: TempDir,
}

impl Staging {
    fn create(out_dir: &Path) -> Result<Self> {
        let staging_error = |source| HarnessError::Staging {
            path: out_dir.display().to_string(),
            source,
        };

        fs::create_dir_all(out_dir).map_err(staging_error)?;
        let parent = out_dir.parent().unwrap_or(out_dir);
        let dir = tempfile::Builder::new()
            .prefix(".typesync-staging-")
            .tempdir_in(parent)
            .map_err(staging_error)?;
        Ok(Self { dir })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Moves every staged file into `out_dir`, replacing existing files.
    fn promote(self, out_dir: &Path) -> Result<()> {
        move_tree(self.dir.path(), out_dir).map_err(|source| HarnessError::Staging {
            path: out_dir.display().to_string(),
            source,
        })
    }
}

fn move_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            move_tree(&entry.path(), &target)?;
        } else {
            fs::rename(entry.path(), target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct Recorder {
        infos: Vec<String>,
        warnings: Vec<String>,
    }

    impl Reporter for Recorder {
        fn info(&mut self, message: &str) {
            self.infos.push(message.to_string());
        }

        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    fn harness(dir: &TempDir) -> Harness<Recorder> {
        let backend = dir.path().join("backend");
        fs::create_dir_all(&backend).unwrap();
        let mut config = GeneratorConfig::new(dir.path().join("out"), backend);
        config.command = "true".to_string();
        config.subcommand = vec![];
        Harness::new(config, Recorder::default()).unwrap()
    }

    #[test]
    fn new_harness_is_idle() {
        let dir = TempDir::new().unwrap();
        let harness = harness(&dir);
        assert_eq!(harness.state(), HarnessState::Idle);
        assert!(harness.watch_set().is_empty());
    }

    #[test]
    fn relevance_is_component_wise() {
        let dir = TempDir::new().unwrap();
        let harness = harness(&dir);
        let root = harness.backend_root().to_path_buf();

        assert!(harness.is_relevant(&root.join("app.py")));
        assert!(harness.is_relevant(&root.join("pkg/views.py")));
        assert!(harness.is_relevant(&root.join("pkg/../app.py")));
        assert!(!harness.is_relevant(&root.join("../elsewhere.py")));
        assert!(!harness.is_relevant(&dir.path().join("backend-other/app.py")));
        assert!(!harness.is_relevant(Path::new("/")));
    }

    #[test]
    fn reports_are_classified() {
        let report = RunReport {
            diagnostics: vec![Diagnostic::info("a"), Diagnostic::warning("b")],
            status: Some(0),
        };
        assert!(report.succeeded());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn move_tree_replaces_files() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("to");
        fs::create_dir_all(from.join("nested")).unwrap();
        fs::create_dir_all(&to).unwrap();
        fs::write(from.join("types.ts"), "new").unwrap();
        fs::write(from.join("nested/x.ts"), "x").unwrap();
        fs::write(to.join("types.ts"), "old").unwrap();
        fs::write(to.join("keep.ts"), "keep").unwrap();

        move_tree(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(to.join("types.ts")).unwrap(), "new");
        assert_eq!(fs::read_to_string(to.join("nested/x.ts")).unwrap(), "x");
        assert_eq!(fs::read_to_string(to.join("keep.ts")).unwrap(), "keep");
    }
}
