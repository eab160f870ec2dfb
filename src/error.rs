use thiserror::Error;

#[derive(Error, Debug)]
pub enum RespecError {
    #[error("Invalid schema format \"{source_name}\": {message}")]
    SchemaParse { source_name: String, message: String },

    #[error("Schema file \"{source_name}\" is empty")]
    EmptySchema { source_name: String },

    #[error("Schema \"{source_name}\" does not conform to OpenAPI 3: {detail}")]
    SchemaInvalid { source_name: String, detail: String },

    #[error("Failed to decode response body as JSON for {operation}: {detail}")]
    BodyDecode { operation: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RespecError>;
