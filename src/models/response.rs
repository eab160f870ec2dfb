use serde_json::Value;

/// An observed HTTP response, as supplied by the test framework or
/// middleware under whose responsibility the actual HTTP exchange falls.
#[derive(Debug, Clone)]
pub struct ObservedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw Content-Type header value, if the response carried one.
    pub content_type: Option<String>,
    /// Raw body bytes. Empty means the response had no body.
    pub body: Vec<u8>,
}

impl ObservedResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Convenience for tests and fixtures: serialize a JSON value as the
    /// body and set a plain JSON content type. Serializing a `Value` to
    /// text cannot fail, so a body set this way is never empty.
    pub fn with_json_body(mut self, value: &Value) -> Self {
        self.body = value.to_string().into_bytes();
        if self.content_type.is_none() {
            self.content_type = Some("application/json".to_string());
        }
        self
    }
}
