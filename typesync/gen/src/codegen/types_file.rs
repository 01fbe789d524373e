//! Types file generation.
//!
//! The types file starts with the request plumbing every client shares
//! (`RequestArgs`, `RequestOptions`, `RequestFunction`) and then declares,
//! per contract, the exported return type, internal aliases for the path
//! arguments and body, and the exported argument interface.

use crate::codegen::file_header;
use crate::contract::{ContractSet, RouteContract};

const REQUEST_TYPES: &str = "\
export interface RequestArgs {
    headers?: Record<string, string>;
}

export interface RequestOptions extends RequestArgs {
    method: string;
    body?: unknown;
}

export type RequestFunction = (
    endpoint: string, options: RequestOptions
// eslint-disable-next-line @typescript-eslint/no-explicit-any
) => Promise<any>;

";

/// Renders the declarations of one contract.
///
/// ## Examples
///
/// For `GET /with/<arg>/args` named `with_args`:
///
/// ```text
/// export type WithArgsGETReturnType = string;
/// type _with_argsGETArgs = {arg: boolean;};
/// export interface WithArgsGETArgsType extends RequestArgs {
///     args: _with_argsGETArgs;
/// }
/// ```
pub fn generate_contract_types(contract: &RouteContract) -> String {
    let mut out = format!(
        "export type {} = {};\n",
        contract.return_type_name,
        contract.return_type.render(Some(&contract.return_type_name))
    );

    let mut fields = Vec::new();

    if let Some(args) = &contract.args {
        out.push_str(&format!(
            "type {} = {};\n",
            contract.internal_args_name,
            args.render(Some(&contract.internal_args_name))
        ));
        fields.push(format!("    args: {};\n", contract.internal_args_name));
    }

    if let Some(body) = &contract.body {
        out.push_str(&format!(
            "type {} = {};\n",
            contract.internal_body_name,
            body.schema.render(Some(&contract.internal_body_name))
        ));
        let marker = if body.required { "" } else { "?" };
        fields.push(format!("    body{marker}: {};\n", contract.internal_body_name));
    }

    if fields.is_empty() {
        out.push_str("// eslint-disable-next-line @typescript-eslint/no-empty-interface\n");
    }
    out.push_str(&format!(
        "export interface {} extends RequestArgs {{\n",
        contract.args_type_name
    ));
    for field in fields {
        out.push_str(&field);
    }
    out.push_str("}\n\n");
    out
}

/// Renders the complete types file.
#[tracing::instrument(skip_all, fields(contracts = set.contracts.len()))]
pub fn generate_types_file(set: &ContractSet) -> String {
    let mut out = file_header();
    out.push_str(REQUEST_TYPES);
    for contract in &set.contracts {
        out.push_str(&generate_contract_types(contract));
    }
    out
}
