use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use typesync_lib::{
    BackendWatcher, CONFIG_FILE_NAME, GeneratorConfig, Harness, HarnessError, Invocation, Reporter,
};

/// Keep a generated API client in sync with its backend.
///
/// Examples:
///   typesync generate                       # One-shot generation from typesync.toml
///   typesync watch                          # Generate, then regenerate on backend changes
///   typesync args --out-dir web/api --backend-root backend
#[derive(Debug, Parser)]
#[command(name = "typesync")]
#[command(version)]
#[command(about = "Keep a generated API client in sync with its backend")]
struct Cli {
    /// Configuration file.
    #[arg(long, global = true, value_name = "FILE", default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Override the output directory.
    #[arg(long, global = true, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Override the backend root.
    #[arg(long, global = true, value_name = "DIR")]
    backend_root: Option<PathBuf>,

    /// Enable INFO-level logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the generator once.
    Generate,
    /// Run the generator, then again whenever a backend file changes.
    Watch,
    /// Print the generator command line without running it.
    Args,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("{0}")]
    GenerationFailed(String),
}

/// Prints harness messages for a terminal user.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = load_config(&cli)?;

    match cli.command {
        Command::Generate => generate(config).await,
        Command::Watch => watch(config).await,
        Command::Args => print_args(&config),
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug { "info" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the config file, or builds one from flags when both paths are given
/// and no file exists.
fn load_config(cli: &Cli) -> Result<GeneratorConfig, CliError> {
    let mut config = match (&cli.out_dir, &cli.backend_root) {
        (Some(out_dir), Some(backend_root)) if !cli.config.exists() => {
            GeneratorConfig::new(out_dir, backend_root)
        }
        _ => GeneratorConfig::load(&cli.config)?,
    };

    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(backend_root) = &cli.backend_root {
        config.backend_root = backend_root.clone();
    }

    Ok(config)
}

#[tracing::instrument(skip(config))]
async fn generate(config: GeneratorConfig) -> Result<(), CliError> {
    let mut harness = Harness::new(config, ConsoleReporter)?;
    let report = harness.build_start().await?;

    if report.succeeded() {
        Ok(())
    } else {
        let status = report
            .status
            .map_or_else(|| "signal".to_string(), |code| code.to_string());
        Err(CliError::GenerationFailed(format!("generator exited with {status}")))
    }
}

#[tracing::instrument(skip(config))]
async fn watch(config: GeneratorConfig) -> Result<(), CliError> {
    let mut harness = Harness::new(config, ConsoleReporter)?;
    if let Err(error) = harness.build_start().await {
        eprintln!("error: {error}");
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let _watcher = BackendWatcher::start(harness.backend_root(), harness.watch_set(), tx)?;
    info!(backend_root = %harness.backend_root().display(), "watching for changes");

    tokio::select! {
        () = harness.run(rx) => {}
        _ = tokio::signal::ctrl_c() => warn!("interrupted"),
    }

    Ok(())
}

fn print_args(config: &GeneratorConfig) -> Result<(), CliError> {
    let out_dir = config.resolved_out_dir()?;
    let backend_root = config.resolved_backend_root()?;
    let invocation = Invocation::new(config, &out_dir, &backend_root);

    println!("cwd: {}", invocation.cwd().display());
    println!("{}", invocation.program());
    for arg in invocation.args() {
        println!("{}", arg.to_string_lossy());
    }

    Ok(())
}
