//! Route patterns with `<name>` placeholders.
//!
//! A placeholder is a `<`, an identifier (`[A-Za-z_][A-Za-z0-9_]*`) and a `>`.
//! Anything else in angle brackets is literal text.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::DefineError;

/// A single placeholder found in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Byte range of the whole `<name>` token.
    pub span: Range<usize>,
    /// The identifier between the angle brackets.
    pub name: &'a str,
}

/// Finds the first placeholder at or after byte offset `from`.
///
/// ## Examples
///
/// ```
/// use typesync_define::pattern::find_placeholder;
///
/// let found = find_placeholder("/a/<x>/<y>", 0).unwrap();
/// assert_eq!(found.name, "x");
/// assert_eq!(found.span, 3..6);
///
/// assert!(find_placeholder("/a/<1x>", 0).is_none());
/// ```
pub fn find_placeholder(text: &str, from: usize) -> Option<Placeholder<'_>> {
    let bytes = text.as_bytes();
    let mut idx = from;

    while idx < bytes.len() {
        if bytes[idx] == b'<' {
            let start = idx + 1;
            if start < bytes.len() && is_ident_start(bytes[start]) {
                let mut end = start + 1;
                while end < bytes.len() && is_ident_continue(bytes[end]) {
                    end += 1;
                }
                if end < bytes.len() && bytes[end] == b'>' {
                    return Some(Placeholder {
                        span: idx..end + 1,
                        name: &text[start..end],
                    });
                }
            }
        }
        idx += 1;
    }

    None
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A URL template identifying one backend endpoint.
///
/// Placeholder names are unique within a pattern; [`RoutePattern::parse`]
/// enforces this.
///
/// ## Examples
///
/// ```
/// use typesync_define::RoutePattern;
///
/// let pattern = RoutePattern::parse("/threads/<thread_id>/messages/<message_id>").unwrap();
/// assert_eq!(pattern.placeholders(), vec!["thread_id", "message_id"]);
/// assert!(pattern.has_placeholders());
///
/// assert!(RoutePattern::parse("/a/<x>/<x>").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePattern(String);

impl RoutePattern {
    /// Parses and validates a pattern.
    pub fn parse(pattern: impl Into<String>) -> Result<Self, DefineError> {
        let pattern = pattern.into();
        let mut seen: Vec<&str> = Vec::new();
        let mut pos = 0;

        while let Some(placeholder) = find_placeholder(&pattern, pos) {
            if seen.contains(&placeholder.name) {
                return Err(DefineError::DuplicatePlaceholder {
                    pattern: pattern.clone(),
                    name: placeholder.name.to_string(),
                });
            }
            seen.push(placeholder.name);
            pos = placeholder.span.end;
        }

        Ok(Self(pattern))
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut pos = 0;
        while let Some(placeholder) = find_placeholder(&self.0, pos) {
            names.push(placeholder.name);
            pos = placeholder.span.end;
        }
        names
    }

    /// Whether the pattern has at least one placeholder.
    pub fn has_placeholders(&self) -> bool {
        find_placeholder(&self.0, 0).is_some()
    }

    /// The raw pattern text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoutePattern {
    type Error = DefineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<RoutePattern> for String {
    fn from(pattern: RoutePattern) -> Self {
        pattern.0
    }
}
