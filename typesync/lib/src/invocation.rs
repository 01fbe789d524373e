//! Generator process invocation.
//!
//! An [`Invocation`] is the fully resolved command line for one generator
//! run. Running it captures both output streams into one log, in arrival
//! order, and the exit status. The output is not interpreted here; see
//! [`crate::diagnostic`].
//!
//! ## Examples
//!
//! ```no_run
//! use std::path::Path;
//! use typesync_lib::{GeneratorConfig, Invocation};
//!
//! # async fn example() -> typesync_lib::Result<()> {
//! let config = GeneratorConfig::new("web/src/api", "backend");
//! let invocation = Invocation::new(&config, Path::new("/abs/web/src/api"), Path::new("/abs/backend"));
//!
//! let run = invocation.run().await?;
//! println!("status {:?}\n{}", run.status, run.output);
//! # Ok(())
//! # }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::GeneratorConfig;
use crate::error::{HarnessError, Result};

/// Captured result of a finished generator process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Lines from stdout and stderr, interleaved in arrival order.
    pub output: String,
    /// Exit code; `None` when terminated by a signal.
    pub status: Option<i32>,
}

impl RunOutput {
    /// Whether the generator exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// A resolved generator command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    cwd: PathBuf,
}

impl Invocation {
    /// Builds `<command> <subcommand...> <out_dir> <flags...>` to run in
    /// `backend_root`.
    ///
    /// Both paths are expected to be resolved already.
    pub fn new(config: &GeneratorConfig, out_dir: &Path, backend_root: &Path) -> Self {
        let mut args: Vec<OsString> = config.subcommand.iter().map(OsString::from).collect();
        args.push(out_dir.as_os_str().to_owned());
        args.extend(config.command_line_args().into_iter().map(OsString::from));

        Self {
            program: config.command.clone(),
            args,
            cwd: backend_root.to_path_buf(),
        }
    }

    /// The generator executable.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments following the executable.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory of the generator.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn command(&self) -> Command {
        // Windows needs a shell to resolve script shims such as `flask.cmd`.
        let mut command = if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(&self.program);
            command
        } else {
            Command::new(&self.program)
        };

        command
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Runs the generator to completion.
    ///
    /// ## Errors
    ///
    /// Returns [`HarnessError::Start`] when the process cannot be launched
    /// (missing executable, missing working directory). A non-zero exit is
    /// not an error.
    #[tracing::instrument(skip(self), fields(program = %self.program, cwd = %self.cwd.display()))]
    pub async fn run(&self) -> Result<RunOutput> {
        let mut child = self.command().spawn().map_err(|source| HarnessError::Start {
            program: self.program.clone(),
            source,
        })?;

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, tx.clone()));
        }
        drop(tx);

        let mut output = String::new();
        while let Some(line) = rx.recv().await {
            output.push_str(&line);
        }

        let status = child.wait().await?;
        tracing::debug!(status = ?status.code(), bytes = output.len(), "generator exited");

        Ok(RunOutput {
            output,
            status: status.code(),
        })
    }
}

/// Sends every line of `reader` (newline included) until EOF.
async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let mut line = String::from_utf8_lossy(&buf).into_owned();
                if !line.ends_with('\n') {
                    line.push('\n');
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(error) => {
                tracing::debug!(%error, "generator output stream closed");
                break;
            }
        }
    }
}
