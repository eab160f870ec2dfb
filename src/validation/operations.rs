use crate::loader::SchemaDocument;
use serde_json::Value;

/// An operation resolved from the schema's path templates.
#[derive(Debug, Clone)]
pub struct ResolvedOperation<'a> {
    /// The matching path template, e.g. `/foo/{slug}/bar`.
    pub path_template: String,
    /// Lower-cased HTTP method.
    pub method: String,
    /// The raw operation object inside the document.
    pub operation: &'a Value,
    /// Template variables bound during matching.
    pub path_params: Vec<(String, String)>,
}

/// Match a request path and method against the document's path templates.
///
/// The query string is stripped before matching and the method is
/// lower-cased, so `PUT /foo/42/bar?baz=24` resolves against a declared
/// `put` on `/foo/{slug}/bar`. Literal segments must match exactly and
/// segment counts must agree. When both a literal and a templated path
/// fit, the one with fewer template segments wins.
pub fn resolve_operation<'a>(
    doc: &'a SchemaDocument,
    raw_path: &str,
    method: &str,
) -> Option<ResolvedOperation<'a>> {
    let path = raw_path.split('?').next().unwrap_or(raw_path);
    let method = method.to_lowercase();

    let paths = doc.root.get("paths")?.as_object()?;

    let mut candidates: Vec<(usize, ResolvedOperation<'a>)> = Vec::new();

    for (template, path_item) in paths {
        let Some(operation) = path_item.get(&method).filter(|op| op.is_object()) else {
            continue;
        };

        if let Some(params) = match_template(template, path) {
            let template_segments = template
                .split('/')
                .filter(|s| s.starts_with('{') && s.ends_with('}'))
                .count();

            candidates.push((
                template_segments,
                ResolvedOperation {
                    path_template: template.clone(),
                    method: method.clone(),
                    operation,
                    path_params: params,
                },
            ));
        }
    }

    candidates
        .into_iter()
        .min_by_key(|(template_segments, _)| *template_segments)
        .map(|(_, resolved)| resolved)
}

/// Match one path template against a concrete path, binding `{var}`
/// segments. Returns `None` unless every literal segment matches and the
/// segment counts are identical.
fn match_template(template: &str, path: &str) -> Option<Vec<(String, String)>> {
    let template_segments: Vec<&str> = template.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if template_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = Vec::new();

    for (expected, actual) in template_segments.iter().zip(&path_segments) {
        if expected.starts_with('{') && expected.ends_with('}') {
            let name = &expected[1..expected.len() - 1];
            params.push((name.to_string(), (*actual).to_string()));
        } else if expected != actual {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_schema, SchemaSource};

    fn doc() -> SchemaDocument {
        let yaml = r#"
openapi: 3.1.0
info:
  title: Test API
  version: 1.0.0
paths:
  /foo/{slug}/bar:
    put:
      operationId: putFooBar
      responses:
        '200':
          description: OK
  /foo/fixed/bar:
    put:
      operationId: putFooFixedBar
      responses:
        '200':
          description: OK
  /foo:
    get:
      operationId: listFoo
      responses:
        '200':
          description: OK
"#;
        load_schema(&SchemaSource::inline("schema.yaml", yaml)).unwrap()
    }

    #[test]
    fn test_template_binding_and_query_stripping() {
        let document = doc();

        let resolved = resolve_operation(&document, "/foo/42/bar?baz=24", "PUT").unwrap();
        assert_eq!(resolved.path_template, "/foo/{slug}/bar");
        assert_eq!(resolved.method, "put");
        assert_eq!(
            resolved.path_params,
            vec![("slug".to_string(), "42".to_string())]
        );
    }

    #[test]
    fn test_method_case_insensitive() {
        let document = doc();

        assert!(resolve_operation(&document, "/foo/42/bar", "put").is_some());
        assert!(resolve_operation(&document, "/foo/42/bar", "PUT").is_some());
        assert!(resolve_operation(&document, "/foo/42/bar", "Put").is_some());
    }

    #[test]
    fn test_literal_match_preferred_over_template() {
        let document = doc();

        let resolved = resolve_operation(&document, "/foo/fixed/bar", "PUT").unwrap();
        assert_eq!(resolved.path_template, "/foo/fixed/bar");
        assert!(resolved.path_params.is_empty());
    }

    #[test]
    fn test_no_partial_match() {
        let document = doc();

        // Segment counts must agree exactly
        assert!(resolve_operation(&document, "/foo/42/bar/extra", "PUT").is_none());
        assert!(resolve_operation(&document, "/foo/42", "PUT").is_none());
    }

    #[test]
    fn test_wrong_method() {
        let document = doc();

        assert!(resolve_operation(&document, "/foo/42/bar", "GET").is_none());
    }

    #[test]
    fn test_unknown_path() {
        let document = doc();

        assert!(resolve_operation(&document, "/unknown", "GET").is_none());
    }
}
