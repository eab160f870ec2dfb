use crate::error::{RespecError, Result};
use crate::loader::SchemaDocument;
use oas3::OpenApiV3Spec;

/// Check that a loaded document is itself a legal OpenAPI 3 description.
///
/// This is structure-only validation, run before any operation is
/// resolved: a non-conformant document would otherwise surface as a
/// misleading "operation not found" downstream. The first defect is
/// reported as `SchemaInvalid` with a detail naming it.
pub fn check_conformance(doc: &SchemaDocument) -> Result<OpenApiV3Spec> {
    let spec: OpenApiV3Spec =
        serde_json::from_value(doc.root.clone()).map_err(|e| RespecError::SchemaInvalid {
            source_name: doc.source_name.clone(),
            detail: e.to_string(),
        })?;

    // Check version
    if !spec.openapi.starts_with("3.0") && !spec.openapi.starts_with("3.1") {
        return Err(invalid(
            doc,
            format!(
                "Unsupported OpenAPI version: {}. Only 3.0.x and 3.1.x are supported.",
                spec.openapi
            ),
        ));
    }

    // Check that there are paths defined
    if spec.paths.as_ref().is_none_or(|p| p.is_empty()) {
        return Err(invalid(doc, "Schema must declare at least one path"));
    }

    // Every operation needs an operationId and at least one response
    if let Some(paths) = &spec.paths {
        for (path, path_item) in paths.iter() {
            let operations = [
                ("GET", &path_item.get),
                ("POST", &path_item.post),
                ("PUT", &path_item.put),
                ("DELETE", &path_item.delete),
                ("PATCH", &path_item.patch),
                ("OPTIONS", &path_item.options),
                ("HEAD", &path_item.head),
                ("TRACE", &path_item.trace),
            ];

            for (method, op_option) in &operations {
                if let Some(op) = op_option {
                    if op.operation_id.is_none() {
                        return Err(invalid(
                            doc,
                            format!("Missing operationId for {} {}", method, path),
                        ));
                    }

                    let declared = doc
                        .root
                        .pointer(&format!(
                            "/paths/{}/{}/responses",
                            escape_pointer(path),
                            method.to_lowercase()
                        ))
                        .and_then(serde_json::Value::as_object);

                    if declared.is_none_or(|r| r.is_empty()) {
                        return Err(invalid(
                            doc,
                            format!("No responses declared for {} {}", method, path),
                        ));
                    }
                }
            }
        }
    }

    Ok(spec)
}

/// JSON-pointer escaping for path templates used as keys (`/` → `~1`).
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn invalid(doc: &SchemaDocument, detail: impl Into<String>) -> RespecError {
    RespecError::SchemaInvalid {
        source_name: doc.source_name.clone(),
        detail: detail.into(),
    }
}
