//! OpenAPI specification documents.
//!
//! Only the parts driving binding generation are modeled; payload schemas
//! stay opaque `serde_yaml::Value`s and are resolved through the type
//! manifest, never interpreted here. JSON documents parse too, since YAML
//! is a superset.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use infragraph_error::{Error, Result};

use crate::model::HttpMethod;

/// A parsed OpenAPI 3.x document.
#[derive(Debug, Deserialize)]
pub struct SpecDocument {
    pub openapi: String,
    pub info: SpecInfo,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Deserialize)]
pub struct SpecInfo {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, serde_yaml::Value>,
}

/// Operations keyed by HTTP method under one path.
#[derive(Debug, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<OperationSpec>,
    pub put: Option<OperationSpec>,
    pub post: Option<OperationSpec>,
    pub delete: Option<OperationSpec>,
    pub patch: Option<OperationSpec>,
}

impl PathItem {
    /// Present operations in fixed method order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &OperationSpec)> {
        [
            (HttpMethod::Get, self.get.as_ref()),
            (HttpMethod::Put, self.put.as_ref()),
            (HttpMethod::Post, self.post.as_ref()),
            (HttpMethod::Delete, self.delete.as_ref()),
            (HttpMethod::Patch, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

#[derive(Debug, Deserialize)]
pub struct OperationSpec {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<serde_yaml::Value>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<serde_yaml::Value>,
    #[serde(default)]
    pub responses: BTreeMap<String, serde_yaml::Value>,
}

impl SpecDocument {
    /// Read and parse a specification file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("spec::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::parse(&raw).map_err(|e| e.with_context("path", path.display().to_string()))
    }

    /// Parse a specification from text.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| {
            let mut err = Error::spec_invalid(format!("invalid specification document: {e}"))
                .with_operation("spec::parse");
            if let Some(location) = e.location() {
                err = err
                    .with_context("line", location.line().to_string())
                    .with_context("column", location.column().to_string());
            }
            err.set_source(e)
        })
    }

    /// Structural validation beyond deserialization.
    pub fn validate(&self) -> Result<()> {
        if !self.openapi.starts_with("3.") {
            return Err(Error::spec_invalid(format!(
                "unsupported openapi version '{}'",
                self.openapi
            ))
            .with_operation("spec::validate"));
        }
        if self.info.title.is_empty() || self.info.version.is_empty() {
            return Err(
                Error::spec_invalid("info.title and info.version must be non-empty")
                    .with_operation("spec::validate"),
            );
        }
        if self.paths.is_empty() {
            return Err(Error::spec_invalid("document declares no paths")
                .with_operation("spec::validate"));
        }
        for (path, item) in &self.paths {
            for (method, op) in item.operations() {
                if op.responses.is_empty() {
                    return Err(Error::spec_invalid("operation declares no responses")
                        .with_operation("spec::validate")
                        .with_context("spec_path", path.as_str())
                        .with_context("method", method.to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
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
"#;

    #[test]
    fn test_parse_minimal_document() {
        let spec = SpecDocument::parse(MINIMAL).unwrap();
        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.paths.len(), 1);
        let item = &spec.paths["/hello"];
        let ops: Vec<_> = item.operations().collect();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].0, HttpMethod::Get);
        assert_eq!(ops[0].1.operation_id.as_deref(), Some("sayHello"));
        spec.validate().unwrap();
    }

    #[test]
    fn test_parse_reports_location() {
        let err = SpecDocument::parse("openapi: [\n  broken").unwrap_err();
        assert_eq!(err.kind(), infragraph_error::ErrorKind::SpecInvalid);
        assert!(err.context().iter().any(|(k, _)| *k == "line"));
    }

    #[test]
    fn test_validate_rejects_wrong_version() {
        let spec = SpecDocument::parse(&MINIMAL.replace("3.0.3", "2.0")).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(err.message().contains("unsupported openapi version"));
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let spec = SpecDocument::parse(
            "openapi: 3.0.3\ninfo:\n  title: t\n  version: '1'\npaths: {}\n",
        )
        .unwrap();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_responses() {
        let raw = r#"
openapi: 3.0.3
info:
  title: t
  version: '1'
paths:
  /x:
    post:
      operationId: doX
"#;
        let spec = SpecDocument::parse(raw).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(
            err.context()
                .iter()
                .any(|(k, v)| *k == "method" && v == "POST")
        );
    }

    #[test]
    fn test_json_documents_parse() {
        let raw = r#"{"openapi":"3.0.3","info":{"title":"t","version":"1"},"paths":{}}"#;
        let spec = SpecDocument::parse(raw).unwrap();
        assert_eq!(spec.info.title, "t");
    }
}
