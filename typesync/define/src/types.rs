//! Core types for route descriptors.
//!
//! This module provides the fundamental types handed from backend
//! introspection to the generator:
//!
//! - [`RouteManifest`] - Every endpoint of the backend
//! - [`EndpointDescriptor`] - One route x method pair
//! - [`HttpMethod`] - HTTP method enumeration

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::DefineError;
use crate::pattern::RoutePattern;
use crate::request::JsonBody;
use crate::response::{InferredType, TranslatedType};
use crate::schema::{ObjectField, TsType};

/// HTTP methods a route can be registered for.
///
/// ## Examples
///
/// Parse from string:
///
/// ```
/// use std::str::FromStr;
/// use typesync_define::HttpMethod;
///
/// let method = HttpMethod::from_str("GET").unwrap();
/// assert_eq!(method, HttpMethod::Get);
/// ```
///
/// Display as uppercase:
///
/// ```
/// use typesync_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
/// ```
///
/// Iterate over all methods:
///
/// ```
/// use typesync_define::HttpMethod;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(HttpMethod::iter().count(), 9);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET
    Get,
    /// HTTP HEAD
    Head,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
    /// HTTP CONNECT
    Connect,
    /// HTTP OPTIONS
    Options,
    /// HTTP TRACE
    Trace,
    /// HTTP PATCH
    Patch,
}

/// The declared type of one path placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParam {
    /// Placeholder name, without angle brackets.
    pub name: String,
    /// Type of the value substituted for it.
    pub schema: TsType,
}

/// The generator's structured view of one route x method combination.
///
/// Descriptors are the source of truth for generated type and function
/// names. They are regenerated wholesale on every generator run.
///
/// ## Path Parameters
///
/// Placeholders in `pattern` without a matching entry in `params` are typed
/// as `string`, which is what an unconverted URL segment is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Human-readable endpoint name (the backend's endpoint identifier).
    pub name: String,
    /// URL template.
    pub pattern: RoutePattern,
    /// HTTP method.
    pub method: HttpMethod,
    /// Types of the path placeholders.
    #[serde(default)]
    pub params: Vec<PathParam>,
    /// Declared JSON body, if any.
    #[serde(default)]
    pub body: Option<JsonBody>,
    /// Response schemas, one per translator that understood the handler.
    #[serde(default)]
    pub responses: Vec<TranslatedType>,
    /// Best-effort schema for handlers without annotations.
    #[serde(default)]
    pub inferred: Option<InferredType>,
}

impl EndpointDescriptor {
    /// Creates a descriptor with no params, body or response schemas.
    pub fn new(name: impl Into<String>, pattern: RoutePattern, method: HttpMethod) -> Self {
        Self {
            name: name.into(),
            pattern,
            method,
            params: vec![],
            body: None,
            responses: vec![],
            inferred: None,
        }
    }

    /// Adds a path parameter type.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, schema: TsType) -> Self {
        self.params.push(PathParam {
            name: name.into(),
            schema,
        });
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: JsonBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a response schema produced by `translator`.
    #[must_use]
    pub fn with_response(mut self, translator: impl Into<String>, schema: Option<TsType>) -> Self {
        self.responses.push(TranslatedType {
            translator: translator.into(),
            schema,
        });
        self
    }

    /// Sets the inferred response schema.
    #[must_use]
    pub fn with_inferred(mut self, schema: TsType, requires_eval: bool) -> Self {
        self.inferred = Some(InferredType {
            schema,
            requires_eval,
        });
        self
    }

    /// Whether any translator produced a response schema.
    pub fn is_annotated(&self) -> bool {
        !self.responses.is_empty()
    }

    /// The object type of the path arguments, or `None` without placeholders.
    ///
    /// Fields follow placeholder order in the pattern.
    pub fn args_type(&self) -> Option<TsType> {
        let placeholders = self.pattern.placeholders();
        if placeholders.is_empty() {
            return None;
        }

        let fields = placeholders
            .into_iter()
            .map(|name| {
                let schema = self
                    .params
                    .iter()
                    .find(|param| param.name == name)
                    .map(|param| param.schema.clone())
                    .unwrap_or_else(|| TsType::simple("string"));
                ObjectField::required(name, schema)
            })
            .collect();

        Some(TsType::Object { fields })
    }

    /// Checks that every declared param appears in the pattern.
    pub fn validate(&self) -> Result<(), DefineError> {
        let placeholders = self.pattern.placeholders();
        for param in &self.params {
            if !placeholders.contains(&param.name.as_str()) {
                return Err(DefineError::UnknownParam {
                    route: self.name.clone(),
                    name: param.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Every endpoint descriptor of a backend, as handed to the generator.
///
/// ## Examples
///
/// ```
/// use typesync_define::RouteManifest;
///
/// let manifest: RouteManifest = serde_json::from_str(r#"{
///     "routes": [
///         {"name": "main", "pattern": "/main", "method": "GET"}
///     ]
/// }"#).unwrap();
/// assert_eq!(manifest.routes.len(), 1);
/// assert!(manifest.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    /// All descriptors.
    #[serde(default)]
    pub routes: Vec<EndpointDescriptor>,
}

impl RouteManifest {
    /// Validates every descriptor.
    pub fn validate(&self) -> Result<(), DefineError> {
        self.routes.iter().try_for_each(EndpointDescriptor::validate)
    }
}
