use crate::error::{RespecError, Result};
use serde_json::Value;

/// Canonical content type of an observed response.
///
/// `Absent` is a sentinel that compares unequal to every declared media
/// type, so a schema that requires a content type fails closed when the
/// response never set the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Token(String),
    Absent,
}

impl ContentType {
    /// Case-insensitive comparison against a media type declared in the
    /// schema. Parameters on the declared side are stripped too, so a
    /// declared `application/json; charset=utf-8` still matches.
    pub fn matches(&self, declared: &str) -> bool {
        match self {
            ContentType::Token(token) => token.eq_ignore_ascii_case(strip_parameters(declared)),
            ContentType::Absent => false,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Token(token) => write!(f, "{}", token),
            ContentType::Absent => write!(f, "(no content type)"),
        }
    }
}

/// A decoded response body. An empty byte sequence is a legitimate
/// no-body response (204, 202), kept distinct from a malformed one.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    Absent,
    Json(Value),
}

fn strip_parameters(value: &str) -> &str {
    value.split(';').next().unwrap_or(value).trim()
}

/// Extract the canonical media-type token from a raw Content-Type header.
///
/// Parameters such as `; charset=utf-8` are dropped. When the header is
/// missing or blank the caller-supplied default applies; without one the
/// result is the `Absent` sentinel.
pub fn canonical_content_type(header: Option<&str>, default: Option<&str>) -> ContentType {
    let raw = header.filter(|h| !h.trim().is_empty()).or(default);

    match raw {
        Some(value) => ContentType::Token(strip_parameters(value).to_string()),
        None => ContentType::Absent,
    }
}

/// Decode raw response bytes into a structured body.
///
/// Empty input decodes to `DecodedBody::Absent`; anything else must be
/// valid JSON or the call fails with `BodyDecode` carrying the parser's
/// syntax message. `operation` names the operation under validation
/// (method, path, status) so the failure can be located without rerunning.
pub fn decode_body(raw: &[u8], operation: &str) -> Result<DecodedBody> {
    if raw.is_empty() {
        return Ok(DecodedBody::Absent);
    }

    let value: Value = serde_json::from_slice(raw).map_err(|e| RespecError::BodyDecode {
        operation: operation.to_string(),
        detail: e.to_string(),
    })?;

    Ok(DecodedBody::Json(value))
}
