use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "respec")]
#[command(version)]
#[command(about = "Validates HTTP responses against their OpenAPI 3 contract", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a recorded response against an OpenAPI schema
    Check {
        /// Path to the OpenAPI schema file (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Request path, query string allowed (e.g. "/foo/42/bar?baz=24")
        #[arg(short, long)]
        path: String,

        /// HTTP method (case-insensitive)
        #[arg(short, long)]
        method: String,

        /// Observed HTTP status code
        #[arg(long)]
        status: u16,

        /// Observed Content-Type header value
        #[arg(short, long)]
        content_type: Option<String>,

        /// File holding the raw response body (no body if omitted)
        #[arg(short, long)]
        body: Option<PathBuf>,

        /// Content type assumed when the response has no Content-Type header
        #[arg(long)]
        default_content_type: Option<String>,
    },
}
