//! Structural validation of package documents against a JSON Schema.
//!
//! Structural validation is a capability behind the [`StructuralValidator`]
//! trait; [`JsonSchemaValidator`] is the `jsonschema`-backed implementation
//! used by the generator. It runs before any semantic check and reports every
//! violation the schema finds, not just the first.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::config::SchemaSource;

const BUNDLED_SCHEMA: &str = include_str!("../../assets/schema/package.schema.json");

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer into the package document (empty for the root).
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid package schema: {0}")]
    InvalidSchema(String),
    #[error("package document cannot be represented as JSON: {0}")]
    Document(String),
    #[error("package document violates schema:\n{}", format_violations(.0))]
    Violations(Vec<SchemaViolation>),
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Anything able to reject structurally malformed package documents.
pub trait StructuralValidator {
    fn validate(&self, document: &serde_yaml::Value) -> Result<(), SchemaError>;
}

/// [`StructuralValidator`] backed by a compiled JSON Schema.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl JsonSchemaValidator {
    /// Load and compile the schema from the given source.
    pub fn load(source: &SchemaSource) -> Result<Self, SchemaError> {
        let raw = match source {
            SchemaSource::Bundled => BUNDLED_SCHEMA.to_string(),
            SchemaSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
                    path: path.clone(),
                    source: e,
                })?
            }
        };
        let schema: Value = serde_json::from_str(&raw)?;
        Self::from_value(&schema)
    }

    /// Compile an in-memory schema document.
    pub fn from_value(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;
        tracing::debug!("Compiled package schema");
        Ok(Self { validator })
    }
}

impl StructuralValidator for JsonSchemaValidator {
    fn validate(&self, document: &serde_yaml::Value) -> Result<(), SchemaError> {
        let instance =
            serde_json::to_value(document).map_err(|e| SchemaError::Document(e.to_string()))?;

        let violations: Vec<SchemaViolation> = self
            .validator
            .iter_errors(&instance)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> JsonSchemaValidator {
        JsonSchemaValidator::load(&SchemaSource::Bundled).unwrap()
    }

    fn doc(yaml: &str) -> serde_yaml::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_bundled_schema_accepts_fixture() {
        let fixture = include_str!("../../tests/fixtures/erc20_token.yaml");
        assert!(bundled().validate(&doc(fixture)).is_ok());
    }

    #[test]
    fn test_bundled_schema_accepts_minimal() {
        let fixture = include_str!("../../tests/fixtures/minimal.yaml");
        assert!(bundled().validate(&doc(fixture)).is_ok());
    }

    #[test]
    fn test_missing_facet_is_rejected() {
        let fixture = include_str!("../../tests/fixtures/missing_facet.yaml");
        let err = bundled().validate(&doc(fixture)).unwrap_err();
        match err {
            SchemaError::Violations(v) => {
                assert!(!v.is_empty());
                assert!(v.iter().any(|v| v.message.contains("facet")));
            }
            other => panic!("expected violations, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_types_are_all_reported() {
        let yaml = r#"
name: 42
exports:
  functions:
    - name: f
      inputs: address
      outputs: []
      selector: "0x12345678"
storage:
  layout: []
impl:
  bindings: {}
  footprints: {}
  facet: F
"#;
        match bundled().validate(&doc(yaml)).unwrap_err() {
            SchemaError::Violations(v) => {
                assert!(v.len() >= 2);
                assert!(v.iter().any(|v| v.instance_path == "/name"));
                assert!(v
                    .iter()
                    .any(|v| v.instance_path == "/exports/functions/0/inputs"));
            }
            other => panic!("expected violations, got {other:?}"),
        }
    }

    #[test]
    fn test_unquoted_hex_selector_is_a_number() {
        // YAML reads 0x... as an integer; the schema requires a string.
        let yaml = r#"
name: t
exports:
  functions:
    - name: f
      inputs: []
      outputs: []
      selector: 0xa9059cbb
storage:
  layout: []
impl:
  bindings: {}
  footprints: {}
  facet: F
"#;
        assert!(matches!(
            bundled().validate(&doc(yaml)),
            Err(SchemaError::Violations(_))
        ));
    }

    #[test]
    fn test_schema_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"type": "object", "required": ["name"]}"#).unwrap();

        let validator = JsonSchemaValidator::load(&SchemaSource::File(path)).unwrap();
        assert!(validator.validate(&doc("name: x")).is_ok());
        assert!(validator.validate(&doc("other: x")).is_err());
    }

    #[test]
    fn test_missing_schema_file() {
        let result = JsonSchemaValidator::load(&SchemaSource::File(PathBuf::from(
            "/nonexistent/schema.json",
        )));
        assert!(matches!(result, Err(SchemaError::Io { .. })));
    }

    #[test]
    fn test_schema_file_not_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "not json").unwrap();
        let result = JsonSchemaValidator::load(&SchemaSource::File(path));
        assert!(matches!(result, Err(SchemaError::Json(_))));
    }

    #[test]
    fn test_violation_display() {
        let v = SchemaViolation {
            instance_path: String::new(),
            message: "\"impl\" is a required property".into(),
        };
        assert_eq!(v.to_string(), "(root): \"impl\" is a required property");
    }
}
