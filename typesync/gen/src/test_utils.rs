//! Shared test utilities for typesync-gen tests.
//!
//! This module provides fixtures modelled on a small example backend so
//! unit and integration tests agree on what "typical" input looks like.

use typesync_define::{EndpointDescriptor, HttpMethod, JsonBody, ObjectField, RouteManifest, RoutePattern, TsType};

/// Creates a descriptor with no params, body or responses.
///
/// Panics if `pattern` is invalid; fixtures are expected to be well formed.
pub fn endpoint(name: &str, pattern: &str, method: HttpMethod) -> EndpointDescriptor {
    let pattern = RoutePattern::parse(pattern).expect("fixture pattern is valid");
    EndpointDescriptor::new(name, pattern, method)
}

/// The example backend's route manifest.
///
/// - `static` serves files and declares no response body
/// - `main` returns a string for GET and POST
/// - `complex` takes a required JSON body and returns a nested object
/// - `with_args` has one boolean path argument
/// - `delete` has a reserved name
/// - `unannotated` has no response annotation at all
pub fn sample_manifest() -> RouteManifest {
    let complex_return = TsType::Object {
        fields: vec![
            ObjectField::required(
                "result",
                TsType::Tuple {
                    items: vec![TsType::simple("number"), TsType::simple("boolean")],
                },
            ),
            ObjectField::required(
                "tags",
                TsType::Record {
                    key: Box::new(TsType::simple("string")),
                    value: Box::new(TsType::Array {
                        item: Box::new(TsType::Union {
                            members: vec![TsType::simple("number"), TsType::simple("string")],
                        }),
                    }),
                },
            ),
        ],
    };
    let complex_body = TsType::Object {
        fields: vec![
            ObjectField::required("name", TsType::simple("string")),
            ObjectField::optional("count", TsType::simple("number")),
        ],
    };

    RouteManifest {
        routes: vec![
            endpoint("with_args", "/with/<arg>/args", HttpMethod::Get)
                .with_param("arg", TsType::simple("boolean"))
                .with_response("annotations", Some(TsType::simple("string"))),
            endpoint("static", "/static/<filename>", HttpMethod::Get).with_response("flask", None),
            endpoint("main", "/main", HttpMethod::Post).with_response("annotations", Some(TsType::simple("string"))),
            endpoint("main", "/main", HttpMethod::Get).with_response("annotations", Some(TsType::simple("string"))),
            endpoint("complex", "/complex", HttpMethod::Post)
                .with_body(JsonBody::required(complex_body))
                .with_response("annotations", Some(complex_return)),
            endpoint("delete", "/delete", HttpMethod::Get).with_response("annotations", None),
            endpoint("unannotated", "/unannotated", HttpMethod::Get),
        ],
    }
}

/// [`sample_manifest`] serialized as a manifest file body.
pub fn sample_manifest_json() -> String {
    serde_json::to_string_pretty(&sample_manifest()).expect("fixture manifest serializes")
}
