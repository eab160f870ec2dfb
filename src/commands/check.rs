use crate::loader::SchemaSource;
use crate::models::ObservedResponse;
use crate::validation::{ResponseValidator, ValidatorOptions};
use crate::Result;
use colored::*;
use std::fs;
use std::path::Path;

pub fn execute_check(
    schema_path: &Path,
    request_path: &str,
    method: &str,
    status: u16,
    content_type: Option<&str>,
    body_path: Option<&Path>,
    default_content_type: Option<&str>,
) -> Result<()> {
    println!("{}", "Checking response against schema...".bright_blue());
    println!("  Schema: {}", schema_path.display());
    println!(
        "  Operation: {} {} (status {})",
        method.to_uppercase(),
        request_path,
        status
    );

    let mut response = ObservedResponse::new(status);
    if let Some(value) = content_type {
        response = response.with_content_type(value);
    }
    if let Some(path) = body_path {
        response = response.with_body(fs::read(path)?);
    }

    let validator = ResponseValidator::with_options(ValidatorOptions {
        default_content_type: default_content_type.map(String::from),
    });

    let report = match validator.validate(
        &SchemaSource::file(schema_path),
        request_path,
        method,
        &response,
    ) {
        Ok(report) => report,
        Err(e) => {
            println!("{}", "✗ Could not evaluate response".red().bold());
            println!("  {}", e.to_string().red());
            std::process::exit(1);
        }
    };

    if report.has_errors() {
        println!("{}", "✗ Response does not conform".red().bold());
        for issue in &report.issues {
            println!("  - {}", issue.format().red());
        }
        std::process::exit(1);
    }

    println!("{}", "✓ Response conforms to schema".green().bold());
    Ok(())
}
