//! The client contract: what is generated for each route x method pair.
//!
//! Only one contract version is emitted: per-method argument and return
//! types with the HTTP method fixed inside each request function
//! ([`CONTRACT_VERSION`]). The older per-route scheme (one argument/return
//! type per route, method passed at call time) is not produced.
//!
//! Building a [`ContractSet`] resolves everything the writers need:
//! generated names, the selected response schema, argument and body shapes.
//! It is a pure function of the manifest and options.

use std::collections::HashMap;

use typesync_define::{EndpointDescriptor, HttpMethod, JsonBody, RouteManifest, RoutePattern, TsType};

use crate::errors::GeneratorError;
use crate::naming::{internal_args_name, internal_body_name};
use crate::options::GenerateOptions;

/// Version of the generated client contract.
pub const CONTRACT_VERSION: u32 = 2;

/// Everything generated for one route x method pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContract {
    /// Declared endpoint name.
    pub route_name: String,
    /// URL template.
    pub pattern: RoutePattern,
    /// HTTP method baked into the function.
    pub method: HttpMethod,
    /// Request function name.
    pub function_name: String,
    /// Exported return type name.
    pub return_type_name: String,
    /// Exported argument type name.
    pub args_type_name: String,
    /// Internal alias for the path arguments.
    pub internal_args_name: String,
    /// Internal alias for the body.
    pub internal_body_name: String,
    /// Selected response schema.
    pub return_type: TsType,
    /// Path argument object, present only when the pattern has placeholders.
    pub args: Option<TsType>,
    /// Declared body.
    pub body: Option<JsonBody>,
}

impl RouteContract {
    /// Whether callers must pass an argument object.
    pub fn requires_params(&self) -> bool {
        self.args.is_some() || self.body.as_ref().is_some_and(|body| body.required)
    }
}

/// All contracts of one generation run plus the warnings it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSet {
    /// Contracts in emission order.
    pub contracts: Vec<RouteContract>,
    /// Human-readable warnings (skipped or degraded endpoints).
    pub warnings: Vec<String>,
}

/// Outcome of response selection for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnSelection {
    /// Generate with this return type; an optional warning explains a degradation.
    Use(TsType, Option<String>),
    /// Leave the endpoint out; the string says why.
    Skip(String),
}

fn describe(endpoint: &EndpointDescriptor) -> String {
    format!("'{}' ({} {})", endpoint.name, endpoint.method, endpoint.pattern)
}

/// Picks the return type for `endpoint`.
///
/// Among responses from enabled translators the highest priority wins;
/// ties go to the translator listed first, then to the earlier response.
/// Endpoints without a usable response are handled according to the
/// inference and skip options.
pub fn select_return_type(endpoint: &EndpointDescriptor, options: &GenerateOptions) -> ReturnSelection {
    let selected = endpoint
        .responses
        .iter()
        .enumerate()
        .filter(|(_, response)| options.is_enabled(&response.translator))
        .max_by(|(ia, a), (ib, b)| {
            options
                .priority(&a.translator)
                .cmp(&options.priority(&b.translator))
                .then(options.rank(&b.translator).cmp(&options.rank(&a.translator)))
                .then(ib.cmp(ia))
        });

    if let Some((_, response)) = selected {
        let ty = response.schema.clone().unwrap_or_else(TsType::undefined);
        return ReturnSelection::Use(ty, None);
    }

    if options.inference {
        return match &endpoint.inferred {
            Some(inferred) if !inferred.requires_eval || options.inference_can_eval => {
                ReturnSelection::Use(inferred.schema.clone(), None)
            }
            Some(_) => ReturnSelection::Use(
                TsType::unknown(),
                Some(format!(
                    "inferring the return type of {} requires evaluating backend code; enable inference-can-eval. Using unknown",
                    describe(endpoint)
                )),
            ),
            None => ReturnSelection::Use(
                TsType::unknown(),
                Some(format!(
                    "could not infer the return type of {}; using unknown",
                    describe(endpoint)
                )),
            ),
        };
    }

    if options.skip_unannotated {
        return ReturnSelection::Skip(format!(
            "skipping unannotated endpoint {}",
            describe(endpoint)
        ));
    }

    ReturnSelection::Use(TsType::unknown(), None)
}

/// Builds the contract for one descriptor with an already selected return type.
pub fn build_contract(
    endpoint: &EndpointDescriptor,
    return_type: TsType,
    options: &GenerateOptions,
) -> Result<RouteContract, GeneratorError> {
    endpoint.validate()?;
    let formats = &options.formats;

    Ok(RouteContract {
        route_name: endpoint.name.clone(),
        pattern: endpoint.pattern.clone(),
        method: endpoint.method,
        function_name: formats.function_name(&endpoint.name, endpoint.method)?,
        return_type_name: formats.return_type_name(&endpoint.name, endpoint.method)?,
        args_type_name: formats.args_type_name(&endpoint.name, endpoint.method)?,
        internal_args_name: internal_args_name(&endpoint.name, endpoint.method),
        internal_body_name: internal_body_name(&endpoint.name, endpoint.method),
        return_type,
        args: endpoint.args_type(),
        body: endpoint.body.clone(),
    })
}

/// Builds every contract of `manifest`.
///
/// Descriptors are ordered by name, pattern and method first so the output
/// does not depend on the order in which the backend enumerated its routes.
///
/// ## Errors
///
/// Returns an error for invalid descriptors, broken name formats, and when
/// two contracts would share a generated name.
pub fn build_contracts(manifest: &RouteManifest, options: &GenerateOptions) -> Result<ContractSet, GeneratorError> {
    options.formats.validate()?;

    let mut endpoints: Vec<&EndpointDescriptor> = manifest.routes.iter().collect();
    endpoints.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.pattern.cmp(&b.pattern))
            .then_with(|| a.method.cmp(&b.method))
    });

    let mut set = ContractSet::default();
    let mut owners: HashMap<String, String> = HashMap::new();

    for endpoint in endpoints {
        let return_type = match select_return_type(endpoint, options) {
            ReturnSelection::Use(ty, warning) => {
                set.warnings.extend(warning);
                ty
            }
            ReturnSelection::Skip(reason) => {
                tracing::debug!(route = %endpoint.name, method = %endpoint.method, "skipped");
                set.warnings.push(reason);
                continue;
            }
        };

        let contract = build_contract(endpoint, return_type, options)?;
        let owner = format!("{} {}", contract.method, contract.pattern);

        for name in [
            &contract.function_name,
            &contract.return_type_name,
            &contract.args_type_name,
        ] {
            if let Some(first) = owners.insert(name.clone(), owner.clone()) {
                return Err(GeneratorError::NamingCollision {
                    name: name.clone(),
                    first,
                    second: owner,
                });
            }
        }

        set.contracts.push(contract);
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{endpoint, sample_manifest};

    #[test]
    fn highest_priority_translator_wins() {
        let ep = endpoint("main", "/main", HttpMethod::Get)
            .with_response("annotations", Some(TsType::simple("string")))
            .with_response("pydantic", Some(TsType::simple("number")));
        let mut options = GenerateOptions::default();
        options.translator_priorities.insert("pydantic".to_string(), 5);

        assert_eq!(
            select_return_type(&ep, &options),
            ReturnSelection::Use(TsType::simple("number"), None)
        );
    }

    #[test]
    fn equal_priority_prefers_translator_order() {
        let ep = endpoint("main", "/main", HttpMethod::Get)
            .with_response("annotations", Some(TsType::simple("string")))
            .with_response("pydantic", Some(TsType::simple("number")));
        let options = GenerateOptions {
            translators: vec!["pydantic".to_string(), "annotations".to_string()],
            ..GenerateOptions::default()
        };

        assert_eq!(
            select_return_type(&ep, &options),
            ReturnSelection::Use(TsType::simple("number"), None)
        );
    }

    #[test]
    fn equal_priority_unlisted_prefers_first_response() {
        let ep = endpoint("main", "/main", HttpMethod::Get)
            .with_response("annotations", Some(TsType::simple("string")))
            .with_response("pydantic", Some(TsType::simple("number")));

        assert_eq!(
            select_return_type(&ep, &GenerateOptions::default()),
            ReturnSelection::Use(TsType::simple("string"), None)
        );
    }

    #[test]
    fn disabled_translators_are_ignored() {
        let ep = endpoint("main", "/main", HttpMethod::Get)
            .with_response("annotations", Some(TsType::simple("string")));
        let options = GenerateOptions {
            translators: vec!["pydantic".to_string()],
            ..GenerateOptions::default()
        };

        assert!(matches!(
            select_return_type(&ep, &options),
            ReturnSelection::Skip(_)
        ));
    }

    #[test]
    fn no_body_response_is_undefined() {
        let ep = endpoint("static", "/static/<filename>", HttpMethod::Get).with_response("flask", None);
        assert_eq!(
            select_return_type(&ep, &GenerateOptions::default()),
            ReturnSelection::Use(TsType::undefined(), None)
        );
    }

    #[test]
    fn unannotated_is_unknown_when_not_skipped() {
        let ep = endpoint("main", "/main", HttpMethod::Get);
        let options = GenerateOptions {
            skip_unannotated: false,
            ..GenerateOptions::default()
        };
        assert_eq!(
            select_return_type(&ep, &options),
            ReturnSelection::Use(TsType::unknown(), None)
        );
    }

    #[test]
    fn inference_uses_inferred_schema() {
        let ep = endpoint("main", "/main", HttpMethod::Get).with_inferred(TsType::simple("number"), false);
        let options = GenerateOptions {
            inference: true,
            ..GenerateOptions::default()
        };
        assert_eq!(
            select_return_type(&ep, &options),
            ReturnSelection::Use(TsType::simple("number"), None)
        );
    }

    #[test]
    fn inference_requiring_eval_is_gated() {
        let ep = endpoint("main", "/main", HttpMethod::Get).with_inferred(TsType::simple("number"), true);
        let options = GenerateOptions {
            inference: true,
            ..GenerateOptions::default()
        };
        match select_return_type(&ep, &options) {
            ReturnSelection::Use(ty, Some(warning)) => {
                assert_eq!(ty, TsType::unknown());
                assert!(warning.contains("inference-can-eval"));
            }
            other => panic!("unexpected selection: {other:?}"),
        }

        let options = GenerateOptions {
            inference: true,
            inference_can_eval: true,
            ..GenerateOptions::default()
        };
        assert_eq!(
            select_return_type(&ep, &options),
            ReturnSelection::Use(TsType::simple("number"), None)
        );
    }

    #[test]
    fn contracts_are_sorted_and_skips_reported() {
        let set = build_contracts(&sample_manifest(), &GenerateOptions::default()).unwrap();
        let names: Vec<_> = set.contracts.iter().map(|c| c.function_name.as_str()).collect();
        let mut sorted = set.contracts.clone();
        sorted.sort_by(|a, b| a.route_name.cmp(&b.route_name).then(a.method.cmp(&b.method)));
        let sorted_names: Vec<_> = sorted.iter().map(|c| c.function_name.as_str()).collect();
        assert_eq!(names, sorted_names);
        assert!(set.warnings.iter().any(|w| w.contains("'unannotated'")));
        assert!(!names.contains(&"getUnannotated"));
    }

    #[test]
    fn duplicate_route_method_is_a_collision() {
        let manifest = RouteManifest {
            routes: vec![
                endpoint("item", "/item", HttpMethod::Get).with_response("a", None),
                endpoint("item", "/items/<id>", HttpMethod::Get).with_response("a", None),
            ],
        };
        let err = build_contracts(&manifest, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::NamingCollision { name, .. } if name == "getItem"));
    }

    #[test]
    fn requires_params_only_for_args_or_mandatory_body() {
        let options = GenerateOptions::default();
        let plain = build_contract(&endpoint("main", "/main", HttpMethod::Get), TsType::undefined(), &options).unwrap();
        assert!(!plain.requires_params());

        let with_args = build_contract(&endpoint("file", "/f/<name>", HttpMethod::Get), TsType::undefined(), &options).unwrap();
        assert!(with_args.requires_params());

        let optional_body = build_contract(
            &endpoint("post", "/p", HttpMethod::Post).with_body(JsonBody::optional(TsType::simple("string"))),
            TsType::undefined(),
            &options,
        )
        .unwrap();
        assert!(!optional_body.requires_params());
    }
}
