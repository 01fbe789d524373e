//! TypeScript emitters for the client contract.
//!
//! Each submodule renders one generated file from a [`ContractSet`]:
//!
//! - [`types_file`] - Request plumbing types plus per route x method shapes
//! - [`apis_file`] - The `buildUrl` helper and the `makeAPI` factory
//!
//! Both emitters are pure string builders. The output depends only on the
//! contract set and options, so repeated runs are byte-identical.
//!
//! [`ContractSet`]: crate::contract::ContractSet

pub mod apis_file;
pub mod types_file;

pub use apis_file::generate_apis_file;
pub use types_file::generate_types_file;

use serde_json::Value;

use crate::contract::CONTRACT_VERSION;

/// First line of every generated file.
pub fn file_header() -> String {
    format!("// Generated by typesync-gen (client contract v{CONTRACT_VERSION}). Do not edit manually.\n\n")
}

/// Quotes `text` as a JavaScript string literal.
pub(crate) fn js_literal(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
