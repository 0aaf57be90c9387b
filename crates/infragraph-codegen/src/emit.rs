//! Source emission for the generated project.
//!
//! Output is deterministic: operations arrive pre-sorted from the model and
//! every file is assembled with plain string building. File names and their
//! relative layout are part of the external interface; renaming any of them
//! breaks downstream snapshot consumers.

use std::fmt::Write;

use crate::model::{ApiModel, Operation};

/// Relative paths of the generated file set, in emission order.
pub const GENERATED_FILES: [&str; 3] = ["src/api.rs", "src/mock_integrations.rs", "src/lib.rs"];

const HEADER: &str = "// Generated by infragraph. Do not edit.";

fn signature(op: &Operation, param: &str) -> String {
    let mut sig = format!("fn {}(&self", op.fn_name);
    if let Some(request) = &op.request_type {
        let _ = write!(sig, ", {param}: {request}");
    }
    sig.push(')');
    if let Some(response) = &op.response_type {
        let _ = write!(sig, " -> {response}");
    }
    sig
}

/// Emit `src/api.rs`: typed API surface bindings.
pub fn emit_api(model: &ApiModel) -> String {
    let mut out = String::with_capacity(512 + model.operations.len() * 256);
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out, "//");
    let _ = writeln!(
        out,
        "// Typed API surface bindings for \"{}\" {}.",
        model.title, model.version
    );

    for op in &model.operations {
        let _ = writeln!(out);
        let _ = writeln!(out, "/// Operation metadata for `{}`.", op.id);
        let _ = writeln!(out, "pub mod {} {{", op.fn_name);
        let _ = writeln!(out, "    pub const METHOD: &str = \"{}\";", op.method);
        let _ = writeln!(out, "    pub const PATH: &str = \"{}\";", op.path);
        let _ = writeln!(out, "    pub const OPERATION_ID: &str = \"{}\";", op.id);
        let _ = writeln!(out, "}}");
        let _ = writeln!(out);
        let _ = writeln!(out, "/// Handler interface for `{} {}`.", op.method, op.path);
        let _ = writeln!(out, "pub trait {} {{", op.binding);
        let _ = writeln!(out, "    {};", signature(op, "input"));
        let _ = writeln!(out, "}}");
    }

    out
}

/// Emit `src/mock_integrations.rs`: canned test doubles per operation.
pub fn emit_mocks(model: &ApiModel) -> String {
    let mut out = String::with_capacity(512 + model.operations.len() * 256);
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out, "//");
    let _ = writeln!(out, "// Mock integrations returning default responses.");
    let _ = writeln!(out);
    let _ = writeln!(out, "use crate::api;");

    for op in &model.operations {
        let _ = writeln!(out);
        let _ = writeln!(out, "/// Mock for `{}`.", op.id);
        let _ = writeln!(out, "#[derive(Debug, Default)]");
        let _ = writeln!(out, "pub struct Mock{};", op.binding);
        let _ = writeln!(out);
        let _ = writeln!(out, "impl api::{} for Mock{} {{", op.binding, op.binding);
        if op.response_type.is_some() {
            let _ = writeln!(out, "    {} {{", signature(op, "_input"));
            let _ = writeln!(out, "        Default::default()");
            let _ = writeln!(out, "    }}");
        } else {
            let _ = writeln!(out, "    {} {{}}", signature(op, "_input"));
        }
        let _ = writeln!(out, "}}");
    }

    out
}

/// Emit `src/lib.rs`: the barrel file.
pub fn emit_barrel(model: &ApiModel) -> String {
    let mut out = String::with_capacity(256);
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "//! Generated infrastructure bindings for \"{}\".", model.title);
    let _ = writeln!(out, "//!");
    let _ = writeln!(out, "//! See [`api`] for handler interfaces and");
    let _ = writeln!(out, "//! [`mock_integrations`] for canned test doubles.");
    let _ = writeln!(out);
    let _ = writeln!(out, "pub mod api;");
    let _ = writeln!(out, "pub mod mock_integrations;");
    let _ = writeln!(out);
    let _ = writeln!(out, "pub use api::*;");
    let _ = writeln!(out, "pub use mock_integrations::*;");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::TypeManifest;
    use crate::spec::SpecDocument;

    fn model() -> ApiModel {
        let raw = r#"
openapi: 3.0.3
info:
  title: Test API
  version: 1.0.0
paths:
  /hello:
    get:
      operationId: sayHello
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/SayHelloResponseContent'
"#;
        let spec = SpecDocument::parse(raw).unwrap();
        let manifest = TypeManifest::new("test-client").with_type(
            "SayHelloResponseContent",
            "test_client::types::SayHelloResponseContent",
        );
        ApiModel::from_spec(&spec, &manifest).unwrap()
    }

    #[test]
    fn test_api_bindings_shape() {
        let text = emit_api(&model());
        assert!(text.starts_with(HEADER));
        assert!(text.contains("pub mod say_hello {"));
        assert!(text.contains("    pub const METHOD: &str = \"GET\";"));
        assert!(text.contains("pub trait SayHello {"));
        assert!(text.contains(
            "    fn say_hello(&self) -> test_client::types::SayHelloResponseContent;"
        ));
    }

    #[test]
    fn test_mock_shape() {
        let text = emit_mocks(&model());
        assert!(text.contains("pub struct MockSayHello;"));
        assert!(text.contains("impl api::SayHello for MockSayHello {"));
        assert!(text.contains("        Default::default()"));
    }

    #[test]
    fn test_barrel_exports_both_modules() {
        let text = emit_barrel(&model());
        assert!(text.contains("pub mod api;"));
        assert!(text.contains("pub mod mock_integrations;"));
        assert!(text.contains("pub use api::*;"));
    }

    #[test]
    fn test_emission_is_deterministic() {
        let m = model();
        assert_eq!(emit_api(&m), emit_api(&m));
        assert_eq!(emit_mocks(&m), emit_mocks(&m));
    }
}
