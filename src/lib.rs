pub mod cli;
pub mod commands;
pub mod error;
pub mod loader;
pub mod models;
pub mod validation;

pub use error::{RespecError, Result};
pub use loader::{SchemaDocument, SchemaSource};
pub use models::ObservedResponse;
pub use validation::{ResponseValidator, ValidationReport, ValidatorOptions};
