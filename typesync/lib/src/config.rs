//! Generator configuration.
//!
//! [`GeneratorConfig`] carries everything the harness needs to invoke the
//! generator. It is usually read from a `typesync.toml` file:
//!
//! ```toml
//! outDir = "frontend/src/api"
//! backendRoot = "backend"
//! translators = ["annotations", "pydantic"]
//! skipUnannotated = false
//!
//! [translatorPriorities]
//! pydantic = 10
//! ```
//!
//! Relative paths in a config file are resolved against the file's
//! directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "typesync.toml";

fn default_command() -> String {
    "flask".to_string()
}

fn default_subcommand() -> Vec<String> {
    vec!["typesync".to_string(), "generate".to_string()]
}

fn default_true() -> bool {
    true
}

/// Configuration of one generator setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Directory the generated files are written to.
    pub out_dir: PathBuf,
    /// Root of the backend sources; the generator runs here.
    pub backend_root: PathBuf,
    /// Translators to enable, in preference order.
    #[serde(default)]
    pub translators: Vec<String>,
    /// Translator priorities; higher wins.
    #[serde(default)]
    pub translator_priorities: BTreeMap<String, i64>,
    /// Skip unannotated endpoints; `None` leaves the generator default (true).
    #[serde(default)]
    pub skip_unannotated: Option<bool>,
    /// Infer return types of unannotated endpoints.
    #[serde(default)]
    pub inference: bool,
    /// Allow inference that evaluates backend code.
    #[serde(default)]
    pub inference_can_eval: bool,
    /// Name of the generated types file.
    #[serde(default)]
    pub types_file_name: Option<String>,
    /// Name of the generated apis file.
    #[serde(default)]
    pub apis_file_name: Option<String>,
    /// Format of return type names.
    #[serde(default)]
    pub return_type_format: Option<String>,
    /// Format of argument type names.
    #[serde(default)]
    pub args_type_format: Option<String>,
    /// Format of request function names.
    #[serde(default)]
    pub function_name_format: Option<String>,
    /// Generator executable.
    #[serde(default = "default_command")]
    pub command: String,
    /// Arguments placed between the executable and the output directory.
    #[serde(default = "default_subcommand")]
    pub subcommand: Vec<String>,
    /// Generate into a staging directory and promote only on success.
    #[serde(default = "default_true")]
    pub stage_output: bool,
}

impl GeneratorConfig {
    /// Creates a config with only the required fields set.
    pub fn new(out_dir: impl Into<PathBuf>, backend_root: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            backend_root: backend_root.into(),
            translators: vec![],
            translator_priorities: BTreeMap::new(),
            skip_unannotated: None,
            inference: false,
            inference_can_eval: false,
            types_file_name: None,
            apis_file_name: None,
            return_type_format: None,
            args_type_format: None,
            function_name_format: None,
            command: default_command(),
            subcommand: default_subcommand(),
            stage_output: true,
        }
    }

    /// Parses a config from TOML text.
    ///
    /// Paths are kept as written.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| HarnessError::ConfigParse {
            path: origin.display().to_string(),
            source,
        })
    }

    /// Reads a config file, resolving relative paths against its directory.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml(&text, path)?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.out_dir = base.join(&config.out_dir);
        config.backend_root = base.join(&config.backend_root);

        tracing::debug!(out_dir = %config.out_dir.display(), backend_root = %config.backend_root.display(), "loaded config");
        Ok(config)
    }

    /// Absolute, normalised output directory.
    pub fn resolved_out_dir(&self) -> Result<PathBuf> {
        resolve_path(&self.out_dir)
    }

    /// Absolute, normalised backend root.
    pub fn resolved_backend_root(&self) -> Result<PathBuf> {
        resolve_path(&self.backend_root)
    }

    /// Generator flags derived from the optional fields.
    ///
    /// The order is fixed: translators, priorities (by name),
    /// `--skip-unannotated=false`, `-i`, `--inference-can-eval`, file names,
    /// then name formats. Fields left at their defaults emit nothing.
    ///
    /// ## Examples
    ///
    /// ```
    /// use typesync_lib::GeneratorConfig;
    ///
    /// let mut config = GeneratorConfig::new("out", "backend");
    /// assert!(config.command_line_args().is_empty());
    ///
    /// config.translators = vec!["pydantic".to_string()];
    /// config.inference = true;
    /// assert_eq!(config.command_line_args(), ["-t", "pydantic", "-i"]);
    /// ```
    pub fn command_line_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        for translator in &self.translators {
            args.push("-t".to_string());
            args.push(translator.clone());
        }
        for (translator, priority) in &self.translator_priorities {
            args.push("--translator-priority".to_string());
            args.push(format!("{translator}:{priority}"));
        }
        if self.skip_unannotated == Some(false) {
            args.push("--skip-unannotated=false".to_string());
        }
        if self.inference {
            args.push("-i".to_string());
        }
        if self.inference_can_eval {
            args.push("--inference-can-eval".to_string());
        }

        let valued = [
            ("--types-file", &self.types_file_name),
            ("--apis-file", &self.apis_file_name),
            ("--return-type-format", &self.return_type_format),
            ("--args-type-format", &self.args_type_format),
            ("--function-name-format", &self.function_name_format),
        ];
        for (flag, value) in valued {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                args.push(flag.to_string());
                args.push(value.to_string());
            }
        }

        args
    }
}

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` components without touching the filesystem.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| HarnessError::Resolve {
        path: path.display().to_string(),
        source,
    })?;
    Ok(normalize(&absolute))
}

/// Lexically normalises `path`.
///
/// ## Examples
///
/// ```
/// use std::path::Path;
/// use typesync_lib::config::normalize;
///
/// assert_eq!(normalize(Path::new("/a/b/../c/./d")), Path::new("/a/c/d"));
/// assert_eq!(normalize(Path::new("/../x")), Path::new("/x"));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(out.components().next_back(), Some(Component::RootDir | Component::Prefix(_)) | None) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
