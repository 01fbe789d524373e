//! Backend file watching.
//!
//! The [`WatchSet`] is computed once from a shallow listing of the backend
//! root: its immediate file children, dotfiles included. Files created
//! later are not picked up until the set is rebuilt.
//!
//! [`BackendWatcher`] watches the backend root itself, non-recursively, and
//! forwards notifications for watch-set files into a channel consumed by
//! [`Harness::run`](crate::Harness::run). Watching the directory rather than
//! each file keeps notifications flowing after an editor saves by renaming a
//! temporary file over the original.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{HarnessError, Result};

/// Backend files registered for change notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSet {
    files: BTreeSet<PathBuf>,
}

impl WatchSet {
    /// Lists the immediate file children of `root`.
    ///
    /// Directories are not descended into. A missing root yields an empty
    /// set.
    pub fn scan(root: &Path) -> Result<Self> {
        let scan_error = |source| HarnessError::Scan {
            path: root.display().to_string(),
            source,
        };

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(root = %root.display(), "backend root does not exist");
                return Ok(Self::default());
            }
            Err(error) => return Err(scan_error(error)),
        };

        let mut files = BTreeSet::new();
        for entry in entries {
            let path = entry.map_err(scan_error)?.path();
            if path.is_file() {
                files.insert(path);
            }
        }

        tracing::debug!(root = %root.display(), files = files.len(), "scanned backend root");
        Ok(Self { files })
    }

    /// Whether `path` is part of the set.
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

/// Forwards change notifications for a [`WatchSet`] into a channel.
///
/// Watching stops when the value is dropped.
pub struct BackendWatcher {
    _watcher: Option<RecommendedWatcher>,
}

impl BackendWatcher {
    /// Watches `root` non-recursively and forwards events touching files of
    /// `set`.
    ///
    /// A missing root is not watched; nothing is ever forwarded.
    pub fn start(root: &Path, set: &WatchSet, tx: UnboundedSender<PathBuf>) -> Result<Self> {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "backend root does not exist, not watching");
            return Ok(Self { _watcher: None });
        }

        let files = set.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        for path in event.paths.into_iter().filter(|path| files.contains(path)) {
                            let _ = tx.send(path);
                        }
                    }
                }
                Err(error) => tracing::warn!(%error, "file watcher error"),
            },
            Config::default(),
        )?;

        watcher.watch(root, RecursiveMode::NonRecursive)?;

        tracing::info!(root = %root.display(), files = set.len(), "watching backend files");
        Ok(Self {
            _watcher: Some(watcher),
        })
    }
}
