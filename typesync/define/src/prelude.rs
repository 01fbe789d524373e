//! Convenient re-exports for working with route definitions.
//!
//! ## Examples
//!
//! ```
//! use typesync_define::prelude::*;
//!
//! let manifest = RouteManifest {
//!     routes: vec![EndpointDescriptor::new(
//!         "main",
//!         RoutePattern::parse("/main").unwrap(),
//!         HttpMethod::Get,
//!     )],
//! };
//! assert!(manifest.validate().is_ok());
//! ```

pub use crate::error::DefineError;
pub use crate::pattern::RoutePattern;
pub use crate::request::JsonBody;
pub use crate::response::{InferredType, TranslatedType};
pub use crate::schema::{ObjectField, TsType};
pub use crate::types::{EndpointDescriptor, HttpMethod, PathParam, RouteManifest};
