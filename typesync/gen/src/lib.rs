//! Typesync code generator library.
//!
//! This crate turns the route descriptors of a backend into a typed
//! TypeScript client. The generated client consists of two files:
//!
//! - A types file with the request plumbing (`RequestArgs`,
//!   `RequestOptions`, `RequestFunction`) and, per route x method, a return
//!   type and an argument interface
//! - An apis file with the `buildUrl` path helper and a `makeAPI(requestFn)`
//!   factory returning one async function per route x method
//!
//! ## Modules
//!
//! - [`template`] - Path template substitution (`buildUrl`)
//! - [`naming`] - Name format templates and reserved-word handling
//! - [`options`] - Generation options
//! - [`contract`] - Resolution of descriptors into client contracts
//! - [`codegen`] - TypeScript emitters
//! - [`output`] - Manifest loading and atomic file writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```
//! use typesync_define::{EndpointDescriptor, HttpMethod, RouteManifest, RoutePattern, TsType};
//! use typesync_gen::options::GenerateOptions;
//! use typesync_gen::output::generate;
//!
//! let manifest = RouteManifest {
//!     routes: vec![
//!         EndpointDescriptor::new("with_args", RoutePattern::parse("/with/<arg>/args").unwrap(), HttpMethod::Get)
//!             .with_param("arg", TsType::simple("boolean"))
//!             .with_response("annotations", Some(TsType::simple("string"))),
//!     ],
//! };
//!
//! let files = generate(&manifest, &GenerateOptions::default()).unwrap();
//! assert!(files.types.contains("export type WithArgsGETReturnType = string;"));
//! assert!(files.apis.contains("async function getWithArgs("));
//! ```

pub mod codegen;
pub mod contract;
pub mod errors;
pub mod naming;
pub mod options;
pub mod output;
pub mod template;

#[doc(hidden)]
pub mod test_utils;
