//! Apis file generation.
//!
//! The apis file imports the types file, embeds the `buildUrl` runtime
//! helper, and exports `makeAPI(requestFn)`, a factory returning one async
//! function per contract. The HTTP method is fixed inside each function.

use crate::codegen::{file_header, js_literal};
use crate::contract::{ContractSet, RouteContract};
use crate::options::GenerateOptions;
use crate::template::BUILD_URL_SOURCE;

/// Renders one request function, indented for the `makeAPI` body.
///
/// ## Examples
///
/// ```text
/// async function getWithArgs(params: types.WithArgsGETArgsType): Promise<types.WithArgsGETReturnType> {
///     const endpoint = buildUrl("/with/<arg>/args", params.args);
///     return await requestFn(
///         endpoint,
///         {method: "GET", ...params}
///     );
/// }
/// ```
pub fn generate_request_function(contract: &RouteContract) -> String {
    let pattern = js_literal(contract.pattern.as_str());
    let endpoint = if contract.args.is_some() {
        format!("buildUrl({pattern}, params.args)")
    } else {
        pattern
    };
    let default = if contract.requires_params() { "" } else { " = {}" };

    format!(
        "    async function {name}(params: types.{args}{default}): Promise<types.{ret}> {{\n\
         \x20       const endpoint = {endpoint};\n\
         \x20       return await requestFn(\n\
         \x20           endpoint,\n\
         \x20           {{method: \"{method}\", ...params}}\n\
         \x20       );\n\
         \x20   }}\n\n",
        name = contract.function_name,
        args = contract.args_type_name,
        ret = contract.return_type_name,
        method = contract.method,
    )
}

/// Renders the complete apis file.
#[tracing::instrument(skip_all, fields(contracts = set.contracts.len()))]
pub fn generate_apis_file(set: &ContractSet, options: &GenerateOptions) -> String {
    let mut out = file_header();
    out.push_str(&format!(
        "import * as types from {};\n\n",
        js_literal(&format!("./{}", options.types_module()))
    ));
    out.push_str(BUILD_URL_SOURCE);
    out.push('\n');
    out.push_str("export function makeAPI(requestFn: types.RequestFunction) {\n");

    for contract in &set.contracts {
        out.push_str(&generate_request_function(contract));
    }

    out.push_str("    return {\n");
    for contract in &set.contracts {
        out.push_str(&format!("        {},\n", contract.function_name));
    }
    out.push_str("    };\n}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::build_contract;
    use crate::test_utils::endpoint;
    use typesync_define::{EndpointDescriptor, HttpMethod, JsonBody, TsType};

    fn contract_for(ep: EndpointDescriptor) -> RouteContract {
        build_contract(&ep, TsType::undefined(), &GenerateOptions::default()).unwrap()
    }

    #[test]
    fn function_with_placeholders_uses_build_url() {
        let code = generate_request_function(&contract_for(endpoint(
            "with_args",
            "/with/<arg>/args",
            HttpMethod::Get,
        )));
        assert!(code.contains(
            "async function getWithArgs(params: types.WithArgsGETArgsType): Promise<types.WithArgsGETReturnType> {"
        ));
        assert!(code.contains("const endpoint = buildUrl(\"/with/<arg>/args\", params.args);"));
        assert!(code.contains("{method: \"GET\", ...params}"));
    }

    #[test]
    fn function_without_placeholders_uses_literal_and_default_params() {
        let code = generate_request_function(&contract_for(endpoint("main", "/main", HttpMethod::Delete)));
        assert!(code.contains("params: types.MainDELETEArgsType = {}"));
        assert!(code.contains("const endpoint = \"/main\";"));
        assert!(code.contains("{method: \"DELETE\", ...params}"));
    }

    #[test]
    fn required_body_needs_params() {
        let code = generate_request_function(&contract_for(
            endpoint("create", "/items", HttpMethod::Post).with_body(JsonBody::required(TsType::simple("string"))),
        ));
        assert!(code.contains("params: types.CreatePOSTArgsType)"));
    }

    #[test]
    fn file_imports_types_module_and_returns_functions() {
        let set = ContractSet {
            contracts: vec![
                contract_for(endpoint("main", "/main", HttpMethod::Get)),
                contract_for(endpoint("main", "/main", HttpMethod::Post)),
            ],
            warnings: vec![],
        };
        let options = GenerateOptions {
            types_file: "api-types.ts".to_string(),
            ..GenerateOptions::default()
        };
        let code = generate_apis_file(&set, &options);
        assert!(code.contains("import * as types from \"./api-types\";\n"));
        assert!(code.contains("export function buildUrl(rule: string, params: Record<string, any>) {"));
        assert!(code.contains("export function makeAPI(requestFn: types.RequestFunction) {"));
        assert!(code.ends_with("    return {\n        getMain,\n        postMain,\n    };\n}\n"));
    }
}
