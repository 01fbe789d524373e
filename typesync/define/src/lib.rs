//! Typesync Definition Library
//!
//! This crate provides the types that describe a backend's route table in a
//! declarative way. Descriptors are produced by backend introspection and
//! consumed by `typesync-gen` to emit typed TypeScript client artifacts.
//!
//! ## Core Types
//!
//! - [`RoutePattern`] - A URL template with `<name>` placeholders
//! - [`HttpMethod`] - HTTP methods (GET, POST, ...)
//! - [`EndpointDescriptor`] - One route x method pair with its shapes
//! - [`RouteManifest`] - The full set of descriptors handed to the generator
//! - [`TsType`] - A TypeScript type expression tree
//! - [`JsonBody`] - A declared JSON request body
//! - [`TranslatedType`] / [`InferredType`] - Response schemas and where they came from
//!
//! ## Examples
//!
//! ```
//! use typesync_define::{EndpointDescriptor, HttpMethod, RoutePattern, TsType};
//!
//! let endpoint = EndpointDescriptor::new(
//!     "with_args",
//!     RoutePattern::parse("/with/<arg>/args").unwrap(),
//!     HttpMethod::Get,
//! )
//! .with_param("arg", TsType::simple("boolean"))
//! .with_response("annotations", Some(TsType::simple("number")));
//!
//! assert_eq!(endpoint.pattern.placeholders(), vec!["arg"]);
//! assert!(endpoint.is_annotated());
//! ```

pub mod error;
pub mod pattern;
pub mod prelude;
pub mod request;
pub mod response;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use error::DefineError;
pub use pattern::RoutePattern;
pub use request::JsonBody;
pub use response::{InferredType, TranslatedType};
pub use schema::{ObjectField, TsType};
pub use types::{EndpointDescriptor, HttpMethod, PathParam, RouteManifest};
