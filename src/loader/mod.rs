pub mod schema;

pub use schema::{load_schema, SchemaDocument, SchemaSource};
