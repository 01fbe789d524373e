//! Generation options.
//!
//! These mirror the generator's command-line flags one to one.

use std::collections::BTreeMap;

use crate::naming::NameFormats;

/// Default name of the types file.
pub const DEFAULT_TYPES_FILE: &str = "types.ts";

/// Default name of the apis file.
pub const DEFAULT_APIS_FILE: &str = "apis.ts";

/// Options controlling one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Enabled translators in preference order; empty enables all.
    pub translators: Vec<String>,
    /// Translator priorities; higher wins, unlisted translators are 0.
    pub translator_priorities: BTreeMap<String, i64>,
    /// Omit endpoints without a response annotation instead of typing them `unknown`.
    pub skip_unannotated: bool,
    /// Use inferred schemas for unannotated endpoints.
    pub inference: bool,
    /// Accept inferred schemas that required executing backend code.
    pub inference_can_eval: bool,
    /// File name of the types file.
    pub types_file: String,
    /// File name of the apis file.
    pub apis_file: String,
    /// Name templates.
    pub formats: NameFormats,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            translators: vec![],
            translator_priorities: BTreeMap::new(),
            skip_unannotated: true,
            inference: false,
            inference_can_eval: false,
            types_file: DEFAULT_TYPES_FILE.to_string(),
            apis_file: DEFAULT_APIS_FILE.to_string(),
            formats: NameFormats::default(),
        }
    }
}

impl GenerateOptions {
    /// Whether responses from `translator` may be used.
    pub fn is_enabled(&self, translator: &str) -> bool {
        self.translators.is_empty() || self.translators.iter().any(|t| t == translator)
    }

    /// Priority of `translator`.
    pub fn priority(&self, translator: &str) -> i64 {
        self.translator_priorities.get(translator).copied().unwrap_or(0)
    }

    /// Position of `translator` in the preference list (`usize::MAX` if absent).
    pub fn rank(&self, translator: &str) -> usize {
        self.translators
            .iter()
            .position(|t| t == translator)
            .unwrap_or(usize::MAX)
    }

    /// Module specifier the apis file uses to import the types file.
    pub fn types_module(&self) -> &str {
        self.types_file.strip_suffix(".ts").unwrap_or(&self.types_file)
    }
}

/// Parses a `NAME:PRIORITY` pair.
///
/// The name may itself contain colons; the priority is taken after the last
/// one.
///
/// ## Examples
///
/// ```
/// use typesync_gen::options::parse_translator_priority;
///
/// assert_eq!(parse_translator_priority("pydantic:10").unwrap(), ("pydantic".to_string(), 10));
/// assert_eq!(parse_translator_priority("a:b:-1").unwrap(), ("a:b".to_string(), -1));
/// assert!(parse_translator_priority("pydantic").is_err());
/// ```
pub fn parse_translator_priority(value: &str) -> Result<(String, i64), String> {
    let (name, priority) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("must be of the form ID:PRIORITY (was {value:?})"))?;
    let priority = priority
        .parse::<i64>()
        .map_err(|_| format!("priority {priority:?} cannot be converted to an int"))?;
    Ok((name.to_string(), priority))
}
