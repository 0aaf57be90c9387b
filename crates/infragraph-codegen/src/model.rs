//! Operation model derived from a validated specification.

use serde_yaml::Value;
use strum_macros::{Display, IntoStaticStr};

use infragraph_error::{Error, Result};

use crate::manifest::TypeManifest;
use crate::spec::SpecDocument;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// HTTP methods supported by binding generation.
///
/// Declaration order is the tie-break order for operations sharing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

/// One operation to generate bindings for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Operation id, explicit or derived from method + path.
    pub id: String,
    /// PascalCase binding name (trait and mock struct).
    pub binding: String,
    /// snake_case handler function name.
    pub fn_name: String,
    pub method: HttpMethod,
    pub path: String,
    /// Resolved request body type, if the operation declares one.
    pub request_type: Option<String>,
    /// Resolved success response type, if one carries a schema.
    pub response_type: Option<String>,
}

/// The full model emitted into the generated project.
#[derive(Debug, Clone)]
pub struct ApiModel {
    pub title: String,
    pub version: String,
    /// Operations sorted by (path, method); the emission order contract.
    pub operations: Vec<Operation>,
}

impl ApiModel {
    /// Build the model, resolving every schema reference through `manifest`.
    pub fn from_spec(spec: &SpecDocument, manifest: &TypeManifest) -> Result<Self> {
        let mut operations = Vec::new();

        for (path, item) in &spec.paths {
            for (method, op) in item.operations() {
                let id = op
                    .operation_id
                    .clone()
                    .unwrap_or_else(|| derive_operation_id(method, path));

                let request_type = match op.request_body.as_ref().and_then(find_schema_ref) {
                    Some(schema) => Some(resolve_type(manifest, &schema, &id)?),
                    None => None,
                };
                let response_type = match success_response_ref(op) {
                    Some(schema) => Some(resolve_type(manifest, &schema, &id)?),
                    None => None,
                };

                operations.push(Operation {
                    binding: pascal_case(&id),
                    fn_name: snake_case(&id),
                    id,
                    method,
                    path: path.clone(),
                    request_type,
                    response_type,
                });
            }
        }

        operations.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));

        Ok(Self {
            title: spec.info.title.clone(),
            version: spec.info.version.clone(),
            operations,
        })
    }
}

fn resolve_type(manifest: &TypeManifest, schema: &str, operation: &str) -> Result<String> {
    manifest
        .type_path(schema)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::manifest_invalid(format!(
                "schema '{}' is not exported by types project '{}'",
                schema, manifest.project_name
            ))
            .with_operation("model::resolve_type")
            .with_context("schema", schema)
            .with_context("operation_id", operation)
        })
}

/// First schema reference in the first 2xx response.
fn success_response_ref(op: &crate::spec::OperationSpec) -> Option<String> {
    op.responses
        .iter()
        .find(|(status, _)| status.starts_with('2'))
        .and_then(|(_, value)| find_schema_ref(value))
}

/// Depth-first search for a `$ref` into the shared schema components.
fn find_schema_ref(value: &Value) -> Option<String> {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                if key.as_str() == Some("$ref") {
                    if let Some(target) = val.as_str() {
                        return target.strip_prefix(SCHEMA_REF_PREFIX).map(str::to_string);
                    }
                }
                if let Some(found) = find_schema_ref(val) {
                    return Some(found);
                }
            }
            None
        }
        Value::Sequence(seq) => seq.iter().find_map(find_schema_ref),
        _ => None,
    }
}

/// Derive an operation id from method + path ("/hello/{name}" -> getHelloName).
pub fn derive_operation_id(method: HttpMethod, path: &str) -> String {
    let method_str: &'static str = method.into();
    let mut id = method_str.to_ascii_lowercase();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        id.push_str(&pascal_case(segment));
    }
    id
}

/// Uppercase the first letter of each alphanumeric segment.
pub fn pascal_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}

/// Lowercase with underscores at word boundaries.
pub fn snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_boundary = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase() && !prev_boundary && !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_boundary = ch.is_ascii_uppercase();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_boundary = true;
        }
    }
    out.trim_end_matches('_').to_string()
}
