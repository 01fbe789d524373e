//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: loading the route
//! manifest, assembling both generated files and writing them to disk
//! atomically.
//!
//! ## Output Structure
//!
//! ```text
//! <out_dir>/
//! ├── types.ts   # Request plumbing and per route x method shapes
//! └── apis.ts    # buildUrl + makeAPI(requestFn)
//! ```
//!
//! File names follow [`GenerateOptions::types_file`] and
//! [`GenerateOptions::apis_file`].
//!
//! ## Safety Guarantees
//!
//! - **Validation**: the manifest and name formats are checked before anything is written
//! - **Atomic writes**: uses temp file + rename so readers never see a partial file

use std::fs;
use std::path::Path;

use typesync_define::RouteManifest;

use crate::codegen::{generate_apis_file, generate_types_file};
use crate::contract::build_contracts;
use crate::errors::GeneratorError;
use crate::options::GenerateOptions;

/// The rendered output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Contents of the types file.
    pub types: String,
    /// Contents of the apis file.
    pub apis: String,
    /// Warnings about skipped or degraded endpoints.
    pub warnings: Vec<String>,
}

/// Reads and validates a route manifest from `path`.
///
/// ## Errors
///
/// Returns an error if the file cannot be read, is not a valid manifest, or
/// contains an inconsistent descriptor.
pub fn load_manifest(path: &Path) -> Result<RouteManifest, GeneratorError> {
    let text = fs::read_to_string(path).map_err(|e| GeneratorError::ManifestRead {
        path: path.display().to_string(),
        source: e,
    })?;
    let manifest: RouteManifest = serde_json::from_str(&text).map_err(|e| GeneratorError::ManifestParse {
        path: path.display().to_string(),
        source: e,
    })?;
    manifest.validate()?;
    tracing::debug!(path = %path.display(), routes = manifest.routes.len(), "loaded route manifest");
    Ok(manifest)
}

/// Renders both files for `manifest` without touching the filesystem.
///
/// ## Errors
///
/// Returns an error for invalid descriptors, broken name formats and naming
/// collisions.
pub fn generate(manifest: &RouteManifest, options: &GenerateOptions) -> Result<GeneratedFiles, GeneratorError> {
    let set = build_contracts(manifest, options)?;
    Ok(GeneratedFiles {
        types: generate_types_file(&set),
        apis: generate_apis_file(&set, options),
        warnings: set.warnings,
    })
}

/// Writes `content` to `path` atomically using a temp file and rename.
///
/// Parent directories are created when missing.
///
/// ## Errors
///
/// Returns an error if a directory cannot be created or the write or rename
/// fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates both files and writes them into `output_dir`.
///
/// This is the main entry point for code generation. With `dry_run` the
/// files are printed to stdout instead of written.
///
/// ## Returns
///
/// The generated files, including warnings for the caller to report.
///
/// ## Errors
///
/// Returns an error if generation fails or a file cannot be written. Nothing
/// is written when generation fails.
#[tracing::instrument(skip(manifest, options), fields(routes = manifest.routes.len()))]
pub fn generate_and_write(
    manifest: &RouteManifest,
    options: &GenerateOptions,
    output_dir: &Path,
    dry_run: bool,
) -> Result<GeneratedFiles, GeneratorError> {
    let files = generate(manifest, options)?;

    if dry_run {
        println!("=== {} ===\n{}", options.types_file, files.types);
        println!("=== {} ===\n{}", options.apis_file, files.apis);
    } else {
        write_atomic(&output_dir.join(&options.types_file), &files.types)?;
        write_atomic(&output_dir.join(&options.apis_file), &files.apis)?;
        tracing::info!(dir = %output_dir.display(), "wrote generated client");
    }

    Ok(files)
}
