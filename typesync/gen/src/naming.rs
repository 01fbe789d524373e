//! Name rendering for generated types and functions.
//!
//! Every generated name comes from a format template with `{key}`
//! placeholders. Keys are prefixed with `r_` (the route's declared name) or
//! `m_` (the HTTP method) and suffixed with a case style:
//!
//! | Suffix | Style | `with_args` | `GET` |
//! |---|---|---|---|
//! | `pc` | PascalCase | `WithArgs` | `Get` |
//! | `cc` | camelCase | `withArgs` | `get` |
//! | `sc` | snake_case | `with_args` | `get` |
//! | `uc` | underscores removed, uppercase | `WITHARGS` | `GET` |
//! | `lc` | underscores removed, lowercase | `withargs` | `get` |
//! | `d` | as declared | `with_args` | `GET` |
//!
//! `{{` and `}}` produce literal braces.
//!
//! ## Reserved Words
//!
//! A declared name that is a JavaScript/TypeScript reserved word gets a
//! trailing underscore on every route-derived key, so route `delete` renders
//! `getDelete_` with the default function format while a route declared as
//! `Delete` renders `getDelete`.
//!
//! ## Examples
//!
//! ```
//! use typesync_define::HttpMethod;
//! use typesync_gen::naming::NameFormats;
//!
//! let formats = NameFormats::default();
//! assert_eq!(formats.function_name("with_args", HttpMethod::Get).unwrap(), "getWithArgs");
//! assert_eq!(formats.return_type_name("with_args", HttpMethod::Get).unwrap(), "WithArgsGETReturnType");
//! assert_eq!(formats.function_name("delete", HttpMethod::Get).unwrap(), "getDelete_");
//! ```

use std::collections::BTreeMap;

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use typesync_define::HttpMethod;

use crate::errors::GeneratorError;

/// Default format for request function names.
pub const DEFAULT_FUNCTION_NAME_FORMAT: &str = "{m_lc}{r_pc}";

/// Default format for return type names.
pub const DEFAULT_RETURN_TYPE_FORMAT: &str = "{r_pc}{m_uc}ReturnType";

/// Default format for argument type names.
pub const DEFAULT_ARGS_TYPE_FORMAT: &str = "{r_pc}{m_uc}ArgsType";

/// Words that cannot be used as identifiers in generated TypeScript.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield", "undefined",
    "NaN", "Infinity",
];

/// Returns true when `name` is reserved in the generated language.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Replaces characters outside identifier syntax with underscores.
///
/// Blueprint endpoints such as `admin.index` become `admin_index`.
pub fn sanitize(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    guard_leading_digit(out)
}

/// Prefixes an underscore when `name` starts with a digit.
///
/// Case conversion drops leading underscores, so every rendered style needs
/// the guard again, not just the sanitized input.
fn guard_leading_digit(mut name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Builds the case-style key map for one name.
///
/// `prefix` is `r_` or `m_`; when `suffix_reserved` is set and the
/// (sanitized) name is reserved, every value gets a trailing underscore.
fn name_map(name: &str, prefix: &str, suffix_reserved: bool, map: &mut BTreeMap<String, String>) {
    let name = sanitize(name);
    let tail = if suffix_reserved && is_reserved(&name) { "_" } else { "" };

    let styles = [
        ("pc", name.to_upper_camel_case()),
        ("cc", name.to_lower_camel_case()),
        ("sc", name.to_snake_case()),
        ("uc", name.replace('_', "").to_uppercase()),
        ("lc", name.replace('_', "").to_lowercase()),
        ("d", name.clone()),
    ];

    for (style, value) in styles {
        map.insert(format!("{prefix}{style}"), format!("{}{tail}", guard_leading_digit(value)));
    }
}

/// The full key map for a route name and method.
pub fn route_keys(route_name: &str, method: HttpMethod) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    name_map(route_name, "r_", true, &mut map);
    name_map(&method.to_string(), "m_", false, &mut map);
    map
}

/// Renders `template`, replacing `{key}` with values from `keys`.
///
/// ## Errors
///
/// Returns `GeneratorError::UnknownFormatKey` for a key not in `keys`, and
/// `GeneratorError::InvalidFormat` for unbalanced braces.
pub fn render_format(template: &str, keys: &BTreeMap<String, String>) -> Result<String, GeneratorError> {
    let invalid = |reason: &str| GeneratorError::InvalidFormat {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => return Err(invalid("nested '{' in placeholder")),
                        Some(k) => key.push(k),
                        None => return Err(invalid("unterminated '{'")),
                    }
                }
                let value = keys.get(&key).ok_or_else(|| GeneratorError::UnknownFormatKey {
                    template: template.to_string(),
                    key: key.clone(),
                })?;
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(invalid("single '}' encountered")),
            other => out.push(other),
        }
    }

    Ok(out)
}

/// The three name templates used by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormats {
    /// Request function names.
    pub function_name: String,
    /// Return type names.
    pub return_type: String,
    /// Argument type names.
    pub args_type: String,
}

impl Default for NameFormats {
    fn default() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION_NAME_FORMAT.to_string(),
            return_type: DEFAULT_RETURN_TYPE_FORMAT.to_string(),
            args_type: DEFAULT_ARGS_TYPE_FORMAT.to_string(),
        }
    }
}

impl NameFormats {
    /// Name of the request function for `route_name` and `method`.
    pub fn function_name(&self, route_name: &str, method: HttpMethod) -> Result<String, GeneratorError> {
        render_format(&self.function_name, &route_keys(route_name, method)).map(guard_leading_digit)
    }

    /// Name of the exported return type.
    pub fn return_type_name(&self, route_name: &str, method: HttpMethod) -> Result<String, GeneratorError> {
        render_format(&self.return_type, &route_keys(route_name, method)).map(guard_leading_digit)
    }

    /// Name of the exported argument type.
    pub fn args_type_name(&self, route_name: &str, method: HttpMethod) -> Result<String, GeneratorError> {
        render_format(&self.args_type, &route_keys(route_name, method)).map(guard_leading_digit)
    }

    /// Checks every template against a sample key map.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let keys = route_keys("route", HttpMethod::Get);
        render_format(&self.function_name, &keys)?;
        render_format(&self.return_type, &keys)?;
        render_format(&self.args_type, &keys)?;
        Ok(())
    }
}

/// Name of the internal alias for a route's path arguments.
pub fn internal_args_name(route_name: &str, method: HttpMethod) -> String {
    let keys = route_keys(route_name, method);
    format!("_{}{}Args", keys["r_d"], keys["m_uc"])
}

/// Name of the internal alias for a route's request body.
pub fn internal_body_name(route_name: &str, method: HttpMethod) -> String {
    let keys = route_keys(route_name, method);
    format!("_{}{}Body", keys["r_d"], keys["m_uc"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_for_snake_case_route() {
        let formats = NameFormats::default();
        assert_eq!(
            formats.function_name("with_args", HttpMethod::Options).unwrap(),
            "optionsWithArgs"
        );
        assert_eq!(
            formats.args_type_name("with_args", HttpMethod::Head).unwrap(),
            "WithArgsHEADArgsType"
        );
    }

    #[test]
    fn reserved_name_gets_suffix() {
        let formats = NameFormats::default();
        let reserved = formats.function_name("delete", HttpMethod::Get).unwrap();
        let unrelated = formats.function_name("Delete", HttpMethod::Get).unwrap();
        assert_eq!(reserved, "getDelete_");
        assert_eq!(unrelated, "getDelete");
        assert_ne!(reserved, unrelated);
        assert_eq!(
            formats.return_type_name("delete", HttpMethod::Get).unwrap(),
            "Delete_GETReturnType"
        );
    }

    #[test]
    fn method_keys_are_never_suffixed() {
        let keys = route_keys("main", HttpMethod::Delete);
        assert_eq!(keys["m_lc"], "delete");
        assert_eq!(keys["m_pc"], "Delete");
    }

    #[test]
    fn all_case_styles() {
        let keys = route_keys("with_args", HttpMethod::Get);
        assert_eq!(keys["r_pc"], "WithArgs");
        assert_eq!(keys["r_cc"], "withArgs");
        assert_eq!(keys["r_sc"], "with_args");
        assert_eq!(keys["r_uc"], "WITHARGS");
        assert_eq!(keys["r_lc"], "withargs");
        assert_eq!(keys["r_d"], "with_args");
    }

    #[test]
    fn sanitize_blueprint_names() {
        assert_eq!(sanitize("admin.index"), "admin_index");
        assert_eq!(sanitize("2fa"), "_2fa");
        assert_eq!(sanitize("ok_name"), "ok_name");
    }

    #[test]
    fn leading_digit_names_stay_identifiers() {
        let formats = NameFormats::default();
        assert_eq!(
            formats.return_type_name("2fa", HttpMethod::Get).unwrap(),
            "_2faGETReturnType"
        );
        assert_eq!(
            formats.args_type_name("2fa", HttpMethod::Post).unwrap(),
            "_2faPOSTArgsType"
        );
        assert_eq!(formats.function_name("2fa", HttpMethod::Get).unwrap(), "get_2fa");

        let keys = route_keys("2fa", HttpMethod::Get);
        for style in ["pc", "cc", "sc", "uc", "lc", "d"] {
            let value = &keys[&format!("r_{style}")];
            assert!(value.starts_with('_'), "r_{style} = {value}");
        }
    }

    #[test]
    fn custom_format_starting_with_digit_is_guarded() {
        let formats = NameFormats {
            function_name: "1{r_pc}".to_string(),
            ..NameFormats::default()
        };
        assert_eq!(formats.function_name("main", HttpMethod::Get).unwrap(), "_1Main");
    }

    #[test]
    fn render_escaped_braces() {
        let keys = route_keys("main", HttpMethod::Get);
        assert_eq!(render_format("{{{r_pc}}}", &keys).unwrap(), "{Main}");
    }

    #[test]
    fn render_unknown_key_fails() {
        let keys = route_keys("main", HttpMethod::Get);
        assert!(matches!(
            render_format("{r_xx}", &keys),
            Err(GeneratorError::UnknownFormatKey { key, .. }) if key == "r_xx"
        ));
    }

    #[test]
    fn render_unbalanced_fails() {
        let keys = route_keys("main", HttpMethod::Get);
        assert!(matches!(
            render_format("{r_pc", &keys),
            Err(GeneratorError::InvalidFormat { .. })
        ));
        assert!(matches!(
            render_format("r_pc}", &keys),
            Err(GeneratorError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn internal_names_follow_declared_name() {
        assert_eq!(internal_args_name("with_args", HttpMethod::Get), "_with_argsGETArgs");
        assert_eq!(internal_body_name("class", HttpMethod::Post), "_class_POSTBody");
    }

    #[test]
    fn custom_formats_validate() {
        let formats = NameFormats {
            function_name: "{r_cc}{m_pc}".to_string(),
            ..NameFormats::default()
        };
        assert!(formats.validate().is_ok());
        assert_eq!(formats.function_name("with_args", HttpMethod::Post).unwrap(), "withArgsPost");

        let broken = NameFormats {
            args_type: "{route}".to_string(),
            ..NameFormats::default()
        };
        assert!(broken.validate().is_err());
    }
}
