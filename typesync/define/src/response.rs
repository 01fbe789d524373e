//! Response schema definitions.
//!
//! A backend may describe the same endpoint's response through several
//! translators (plain annotations, pydantic models, ...). Each result is kept
//! as a [`TranslatedType`] so the generator can pick one by priority.

use serde::{Deserialize, Serialize};

use crate::schema::TsType;

/// A response schema produced by one translator.
///
/// A `schema` of `None` means the endpoint declares no response body
/// (static file serving, for example); it renders as `undefined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedType {
    /// Identifier of the translator that produced the schema.
    pub translator: String,
    /// The translated schema.
    #[serde(default)]
    pub schema: Option<TsType>,
}

/// A best-effort schema inferred from an unannotated handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredType {
    /// The inferred schema.
    pub schema: TsType,
    /// Whether producing this schema required executing backend code.
    #[serde(default)]
    pub requires_eval: bool,
}
