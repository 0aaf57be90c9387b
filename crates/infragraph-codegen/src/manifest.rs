//! The shared type-name contract between generated projects.
//!
//! The runtime-types generator writes a manifest next to its output; the
//! infrastructure generator resolves every schema reference through it.
//! Nothing is inferred from directory layout.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use infragraph_error::{Error, Result};

/// Conventional manifest file name inside a generated types project.
pub const MANIFEST_FILE: &str = "type-manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeManifest {
    /// Name of the generated types project (e.g. "test-client").
    pub project_name: String,
    /// Schema name -> fully qualified type path in the types crate.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
}

impl TypeManifest {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            types: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, schema: impl Into<String>, type_path: impl Into<String>) -> Self {
        self.types.insert(schema.into(), type_path.into());
        self
    }

    /// Resolve a schema name to its generated type path.
    pub fn type_path(&self, schema: &str) -> Option<&str> {
        self.types.get(schema).map(String::as_str)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("manifest::load")
                .with_context("path", path.display().to_string())
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::manifest_invalid(format!("invalid type manifest: {e}"))
                .with_operation("manifest::load")
                .with_context("path", path.display().to_string())
                .set_source(e)
        })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).map_err(|e| {
            Error::new(
                infragraph_error::ErrorKind::SerializationFailed,
                format!("cannot serialize type manifest: {e}"),
            )
            .with_operation("manifest::write")
            .set_source(e)
        })?;
        fs::write(path, raw + "\n").map_err(|e| {
            Error::from(e)
                .with_operation("manifest::write")
                .with_context("path", path.display().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let manifest = TypeManifest::new("test-client").with_type(
            "SayHelloResponseContent",
            "test_client::types::SayHelloResponseContent",
        );
        manifest.write(&path).unwrap();

        let loaded = TypeManifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(
            loaded.type_path("SayHelloResponseContent"),
            Some("test_client::types::SayHelloResponseContent")
        );
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, "{not json").unwrap();

        let err = TypeManifest::load(&path).unwrap_err();
        assert_eq!(err.kind(), infragraph_error::ErrorKind::ManifestInvalid);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TypeManifest::load(Path::new("/nonexistent/type-manifest.json")).unwrap_err();
        assert_eq!(err.kind(), infragraph_error::ErrorKind::FileNotFound);
    }
}
