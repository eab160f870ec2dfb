use crate::error::{RespecError, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Where the schema text comes from. The name is carried into every
/// diagnostic so a failing test points at the offending document.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    /// A schema file on disk, in YAML or JSON.
    File(PathBuf),
    /// Schema text held in memory, with a display name for diagnostics.
    Inline { name: String, text: String },
}

impl SchemaSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SchemaSource::File(path.into())
    }

    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        SchemaSource::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Display name used in error messages.
    pub fn name(&self) -> String {
        match self {
            SchemaSource::File(path) => path.display().to_string(),
            SchemaSource::Inline { name, .. } => name.clone(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            SchemaSource::File(path) => Ok(fs::read_to_string(path)?),
            SchemaSource::Inline { text, .. } => Ok(text.clone()),
        }
    }
}

/// The parsed, generic in-memory form of an OpenAPI document.
/// Never mutated after load.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub source_name: String,
    pub root: Value,
}

/// Load a schema source into a generic document tree.
///
/// Text that is not valid YAML (duplicate keys included) fails with
/// `SchemaParse`. Text that parses but does not yield a mapping, such as
/// an empty file or a lone scalar, fails with the distinct `EmptySchema`.
pub fn load_schema(source: &SchemaSource) -> Result<SchemaDocument> {
    let source_name = source.name();
    let text = source.read()?;

    // serde_yaml rejects duplicate mapping keys, which serde_json's
    // generic Value would silently overwrite.
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|e| RespecError::SchemaParse {
            source_name: source_name.clone(),
            message: e.to_string(),
        })?;

    if !matches!(parsed, serde_yaml::Value::Mapping(_)) {
        return Err(RespecError::EmptySchema { source_name });
    }

    let root = serde_json::to_value(&parsed).map_err(|e| RespecError::SchemaParse {
        source_name: source_name.clone(),
        message: e.to_string(),
    })?;

    Ok(SchemaDocument { source_name, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_schema() {
        let yaml = r#"
openapi: 3.1.0
info:
  title: Test API
  version: 1.0.0
paths: {}
"#;

        let doc = load_schema(&SchemaSource::inline("test.yaml", yaml)).unwrap();
        assert_eq!(doc.source_name, "test.yaml");
        assert_eq!(doc.root["openapi"], "3.1.0");
        assert_eq!(doc.root["info"]["title"], "Test API");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"openapi: 3.0.0\ninfo:\n  title: T\n  version: '1'\n")
            .unwrap();

        let doc = load_schema(&SchemaSource::file(file.path())).unwrap();
        assert!(doc.root.is_object());
    }

    #[test]
    fn test_duplicate_key_is_parse_error() {
        let yaml = "foo: 42\nbar: 42\nbar: 43\n";

        let err = load_schema(&SchemaSource::inline("dup.yaml", yaml)).unwrap_err();
        match err {
            RespecError::SchemaParse {
                source_name,
                message,
            } => {
                assert_eq!(source_name, "dup.yaml");
                assert!(message.contains("duplicate"), "message: {}", message);
            }
            other => panic!("expected SchemaParse, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let yaml = "foo:\n  - bar\n bad indent: [\n";

        let err = load_schema(&SchemaSource::inline("broken.yaml", yaml)).unwrap_err();
        assert!(matches!(err, RespecError::SchemaParse { .. }));
    }

    #[test]
    fn test_empty_file_is_empty_schema_error() {
        let err = load_schema(&SchemaSource::inline("empty.yaml", "")).unwrap_err();
        match err {
            RespecError::EmptySchema { source_name } => assert_eq!(source_name, "empty.yaml"),
            other => panic!("expected EmptySchema, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_document_is_empty_schema_error() {
        let err = load_schema(&SchemaSource::inline("scalar.yaml", "42")).unwrap_err();
        assert!(matches!(err, RespecError::EmptySchema { .. }));

        let err = load_schema(&SchemaSource::inline("null.yaml", "~")).unwrap_err();
        assert!(matches!(err, RespecError::EmptySchema { .. }));
    }

    #[test]
    fn test_nonexistent_file() {
        let err = load_schema(&SchemaSource::file("/nonexistent/schema.yaml")).unwrap_err();
        assert!(matches!(err, RespecError::Io(_)));
    }
}
