//! Path template substitution.
//!
//! Resolves a route pattern such as `/with/<arg>/args` into a concrete path.
//! The generated TypeScript client ships the same algorithm as `buildUrl`
//! (see [`BUILD_URL_SOURCE`]), so what the generator can check here is what
//! the browser will do at call time.
//!
//! Only the first placeholder of a pattern is substituted. Later
//! placeholders are left verbatim, and values missing from the parameter
//! map render as `undefined`. Neither case is an error.

use serde_json::Value;
use typesync_define::pattern::find_placeholder;

/// TypeScript source of the runtime `buildUrl` helper emitted into the apis file.
///
/// The regular expression has no `g` flag, which is what limits substitution
/// to the first placeholder.
pub const BUILD_URL_SOURCE: &str = "\
// eslint-disable-next-line @typescript-eslint/no-explicit-any
export function buildUrl(rule: string, params: Record<string, any>) {
    return rule.replace(/<([a-zA-Z_]+[a-zA-Z_0-9]*)>/, (_, key) => {
        return String(params[key]);
    });
}
";

/// Substitutes the first placeholder of `rule` with its value from `params`.
///
/// `params` plays the role of the client's argument object: keys are looked
/// up on it when it is a JSON object; any other value behaves like an empty
/// mapping.
///
/// ## Examples
///
/// ```
/// use serde_json::json;
/// use typesync_gen::template::build_url;
///
/// assert_eq!(build_url("/with/<arg>/args", &json!({"arg": true})), "/with/true/args");
/// assert_eq!(build_url("/a/<x>/<y>", &json!({"x": 1, "y": 2})), "/a/1/<y>");
/// assert_eq!(build_url("/static/<filename>", &json!({})), "/static/undefined");
/// assert_eq!(build_url("/main", &json!({})), "/main");
/// ```
pub fn build_url(rule: &str, params: &Value) -> String {
    let Some(placeholder) = find_placeholder(rule, 0) else {
        return rule.to_string();
    };

    let value = params.as_object().and_then(|map| map.get(placeholder.name));

    let mut result = String::with_capacity(rule.len());
    result.push_str(&rule[..placeholder.span.start]);
    result.push_str(&js_string(value));
    result.push_str(&rule[placeholder.span.end..]);
    result
}

/// Renders a value the way JavaScript's `String(value)` does.
///
/// `None` stands for a missing property and renders as `undefined`.
///
/// ## Examples
///
/// ```
/// use serde_json::json;
/// use typesync_gen::template::js_string;
///
/// assert_eq!(js_string(Some(&json!(false))), "false");
/// assert_eq!(js_string(Some(&json!(2.0))), "2");
/// assert_eq!(js_string(Some(&json!([1, null, "a"]))), "1,,a");
/// assert_eq!(js_string(None), "undefined");
/// ```
pub fn js_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                js_number(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// `Number.prototype.toString` for finite and non-finite values.
///
/// Magnitudes below `1e-6` or from `1e21` up use exponent notation with an
/// explicit sign on positive exponents (`1e-7`, `1e+21`).
fn js_number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if f == 0.0 {
        "0".to_string()
    } else if f.abs() < 1e-6 || f.abs() >= 1e21 {
        let exponent = format!("{f:e}");
        match exponent.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => exponent,
        }
    } else if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitute_single_param() {
        assert_eq!(
            build_url("/with/<arg>/args", &json!({"arg": true})),
            "/with/true/args"
        );
    }

    #[test]
    fn substitute_only_first_param() {
        assert_eq!(build_url("/a/<x>/<y>", &json!({"x": 1, "y": 2})), "/a/1/<y>");
    }

    #[test]
    fn substitute_first_even_when_only_second_given() {
        assert_eq!(
            build_url("/a/<x>/<y>", &json!({"y": 2})),
            "/a/undefined/<y>"
        );
    }

    #[test]
    fn substitute_missing_param_is_undefined() {
        assert_eq!(
            build_url("/static/<filename>", &json!({})),
            "/static/undefined"
        );
    }

    #[test]
    fn substitute_no_params() {
        assert_eq!(build_url("/main", &json!({"unused": 1})), "/main");
    }

    #[test]
    fn non_object_params_behave_as_empty() {
        assert_eq!(build_url("/<id>", &Value::Null), "/undefined");
    }

    #[test]
    fn non_identifier_brackets_untouched() {
        assert_eq!(
            build_url("/<int:id>/<name>", &json!({"name": "x"})),
            "/<int:id>/x"
        );
    }

    #[test]
    fn values_are_not_encoded() {
        assert_eq!(
            build_url("/files/<path>", &json!({"path": "a/b c"})),
            "/files/a/b c"
        );
    }

    #[test]
    fn js_string_numbers() {
        assert_eq!(js_string(Some(&json!(1))), "1");
        assert_eq!(js_string(Some(&json!(-3))), "-3");
        assert_eq!(js_string(Some(&json!(1.5))), "1.5");
        assert_eq!(js_string(Some(&json!(10.0))), "10");
    }

    #[test]
    fn js_string_exponent_notation() {
        assert_eq!(js_string(Some(&json!(1e-7))), "1e-7");
        assert_eq!(js_string(Some(&json!(-2.5e-8))), "-2.5e-8");
        assert_eq!(js_string(Some(&json!(0.000001))), "0.000001");
        assert_eq!(js_string(Some(&json!(1e21))), "1e+21");
        assert_eq!(js_string(Some(&json!(1e20))), "100000000000000000000");
        assert_eq!(js_number(-0.0), "0");
    }

    #[test]
    fn js_string_compound() {
        assert_eq!(js_string(Some(&json!(null))), "null");
        assert_eq!(js_string(Some(&json!({"a": 1}))), "[object Object]");
        assert_eq!(js_string(Some(&json!([true, [1, 2]]))), "true,1,2");
    }

    #[test]
    fn runtime_helper_has_no_global_flag() {
        assert!(BUILD_URL_SOURCE.contains("/<([a-zA-Z_]+[a-zA-Z_0-9]*)>/,"));
        assert!(!BUILD_URL_SOURCE.contains(">/g"));
    }
}
