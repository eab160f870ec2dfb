use super::body::{canonical_content_type, decode_body, ContentType, DecodedBody};
use super::conformance::check_conformance;
use super::operations::{resolve_operation, ResolvedOperation};
use super::{IssueKind, ValidationIssue, ValidationReport};
use crate::error::{RespecError, Result};
use crate::loader::{load_schema, SchemaDocument, SchemaSource};
use crate::models::ObservedResponse;
use serde_json::{json, Value};
use tracing::debug;

/// Caller-visible knobs for the validation pipeline.
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    /// Content type assumed when the response carries no Content-Type
    /// header. Without one, a missing header never matches any declared
    /// media type.
    pub default_content_type: Option<String>,
}

/// Validates observed HTTP responses against an OpenAPI 3 contract.
///
/// Each call loads the schema, checks it is itself valid OpenAPI 3,
/// resolves the operation for the request path and method, decodes the
/// body and validates it against the declared response shape. The
/// pipeline is stateless; concurrent calls share nothing.
///
/// Broken inputs (unparseable or empty schema, non-conformant document,
/// undecodable body) come back as `Err` so callers can tell "could not
/// evaluate" apart from "evaluated and failed". A non-conformant
/// response comes back as an `Ok` report listing every mismatch.
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    options: ValidatorOptions,
}

impl ResponseValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Validate one response against the schema's declared shape for
    /// `request_path` + `request_method` + the observed status code.
    pub fn validate(
        &self,
        schema: &SchemaSource,
        request_path: &str,
        request_method: &str,
        response: &ObservedResponse,
    ) -> Result<ValidationReport> {
        let doc = load_schema(schema)?;
        check_conformance(&doc)?;

        debug!(
            schema = %doc.source_name,
            path = request_path,
            method = request_method,
            status = response.status,
            "validating response"
        );

        let Some(resolved) = resolve_operation(&doc, request_path, request_method) else {
            return Ok(ValidationReport {
                issues: vec![ValidationIssue::new(
                    IssueKind::OperationNotFound,
                    format!(
                        "no operation matches {} {} in schema \"{}\"",
                        request_method.to_lowercase(),
                        request_path,
                        doc.source_name
                    ),
                )],
            });
        };

        let content_type = canonical_content_type(
            response.content_type.as_deref(),
            self.options.default_content_type.as_deref(),
        );
        let operation_address = format!(
            "{} {} status {}",
            resolved.method, resolved.path_template, response.status
        );
        let decoded = decode_body(&response.body, &operation_address)?;

        self.validate_shape(&doc, &resolved, response.status, &content_type, &decoded)
    }

    /// Check the decoded body against the response declared for the
    /// observed status and content type, collecting every mismatch.
    fn validate_shape(
        &self,
        doc: &SchemaDocument,
        resolved: &ResolvedOperation<'_>,
        status: u16,
        content_type: &ContentType,
        decoded: &DecodedBody,
    ) -> Result<ValidationReport> {
        let address = format!("{} {}", resolved.method, resolved.path_template);
        let mut issues = Vec::new();

        let Some(declared) = select_response(&doc.root, resolved.operation, status) else {
            issues.push(ValidationIssue::new(
                IssueKind::UndeclaredStatus,
                format!(
                    "status {} is not declared for {} in schema \"{}\"",
                    status, address, doc.source_name
                ),
            ));
            return Ok(ValidationReport { issues });
        };

        let content = declared
            .get("content")
            .and_then(Value::as_object)
            .filter(|c| !c.is_empty());

        let body = match decoded {
            DecodedBody::Absent => {
                // Legitimate for no-content responses (204, 202)
                if content.is_some() {
                    issues.push(ValidationIssue::new(
                        IssueKind::MissingBody,
                        format!(
                            "response body is empty but {} status {} declares content",
                            address, status
                        ),
                    ));
                }
                return Ok(ValidationReport { issues });
            }
            DecodedBody::Json(value) => value,
        };

        let Some(content) = content else {
            issues.push(ValidationIssue::new(
                IssueKind::UnexpectedBody,
                format!(
                    "response has a body but {} status {} declares no content",
                    address, status
                ),
            ));
            return Ok(ValidationReport { issues });
        };

        let Some((_, media)) = content
            .iter()
            .find(|(declared_type, _)| content_type.matches(declared_type.as_str()))
        else {
            let declared_types: Vec<&str> = content.keys().map(String::as_str).collect();
            issues.push(ValidationIssue::new(
                IssueKind::ContentTypeMismatch,
                format!(
                    "content type {} does not match any declared for {} status {}: [{}]",
                    content_type,
                    address,
                    status,
                    declared_types.join(", ")
                ),
            ));
            return Ok(ValidationReport { issues });
        };

        let Some(schema) = media.get("schema") else {
            // A media type without a schema accepts any decodable body
            return Ok(ValidationReport { issues });
        };

        let validator = compile_schema(doc, schema)?;
        for error in validator.iter_errors(body) {
            issues.push(
                ValidationIssue::new(IssueKind::SchemaMismatch, error.to_string())
                    .with_pointer(error.instance_path.to_string()),
            );
        }

        debug!(issues = issues.len(), "response shape checked");
        Ok(ValidationReport { issues })
    }
}

/// Pick the declared response for a status code: exact match first, then
/// a range wildcard like `2XX`, then `default`.
fn select_response<'a>(root: &'a Value, operation: &'a Value, status: u16) -> Option<&'a Value> {
    let responses = operation.get("responses")?.as_object()?;

    let exact = status.to_string();
    let wildcard = format!("{}XX", status / 100);

    let declared = responses
        .get(&exact)
        .or_else(|| {
            responses
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(&wildcard))
                .map(|(_, value)| value)
        })
        .or_else(|| responses.get("default"))?;

    Some(resolve_ref(root, declared))
}

/// Follow a `#/...` reference against the document root. Values without
/// a `$ref` pass through unchanged.
fn resolve_ref<'a>(root: &'a Value, value: &'a Value) -> &'a Value {
    if let Some(ref_path) = value.get("$ref").and_then(Value::as_str)
        && let Some(pointer) = ref_path.strip_prefix('#')
        && let Some(target) = root.pointer(pointer)
    {
        return target;
    }
    value
}

/// Compile a declared media-type schema for the JSON Schema engine.
///
/// The fragment is lifted out of the document, so the document's
/// components are grafted onto it to keep internal `#/components/...`
/// references resolvable.
fn compile_schema(doc: &SchemaDocument, schema: &Value) -> Result<jsonschema::Validator> {
    let mut schema_value = schema.clone();

    if let Value::Object(map) = &mut schema_value
        && let Some(components) = doc.root.get("components")
    {
        map.insert("components".to_string(), components.clone());
    }

    // OpenAPI 3.0 is not a JSON Schema dialect: it spells nullability as
    // `nullable: true`, which the engine would silently ignore. 3.1
    // documents already use `type: [T, "null"]`.
    if doc
        .root
        .get("openapi")
        .and_then(Value::as_str)
        .is_some_and(|version| version.starts_with("3.0"))
    {
        rewrite_nullable(&mut schema_value);
    }

    jsonschema::options()
        .build(&schema_value)
        .map_err(|e| RespecError::SchemaInvalid {
            source_name: doc.source_name.clone(),
            detail: e.to_string(),
        })
}

/// Translate OpenAPI 3.0 `nullable: true` into JSON Schema terms:
/// `null` joins the allowed types, and the enum when one is declared.
fn rewrite_nullable(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if matches!(map.remove("nullable"), Some(Value::Bool(true))) {
                match map.remove("type") {
                    Some(Value::String(declared)) => {
                        map.insert("type".to_string(), json!([declared, "null"]));
                    }
                    Some(Value::Array(mut types)) => {
                        if !types.iter().any(|t| t == "null") {
                            types.push(Value::String("null".to_string()));
                        }
                        map.insert("type".to_string(), Value::Array(types));
                    }
                    Some(other) => {
                        map.insert("type".to_string(), other);
                    }
                    None => {}
                }

                if let Some(Value::Array(variants)) = map.get_mut("enum")
                    && !variants.iter().any(Value::is_null)
                {
                    variants.push(Value::Null);
                }
            }

            for child in map.values_mut() {
                rewrite_nullable(child);
            }
        }
        Value::Array(items) => {
            for child in items {
                rewrite_nullable(child);
            }
        }
        _ => {}
    }
}
