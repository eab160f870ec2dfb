mod body;
mod conformance;
mod operations;
mod response;

pub use body::{canonical_content_type, decode_body, ContentType, DecodedBody};
pub use conformance::check_conformance;
pub use operations::{resolve_operation, ResolvedOperation};
pub use response::{ResponseValidator, ValidatorOptions};

/// Kind of issue found while checking a response against its contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    // Routing checks
    OperationNotFound,
    UndeclaredStatus,
    ContentTypeMismatch,

    // Body checks
    MissingBody,
    UnexpectedBody,
    SchemaMismatch,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::OperationNotFound => write!(f, "Operation not found"),
            IssueKind::UndeclaredStatus => write!(f, "Undeclared status code"),
            IssueKind::ContentTypeMismatch => write!(f, "Content type mismatch"),
            IssueKind::MissingBody => write!(f, "Missing response body"),
            IssueKind::UnexpectedBody => write!(f, "Unexpected response body"),
            IssueKind::SchemaMismatch => write!(f, "Response does not match schema"),
        }
    }
}

/// A single mismatch between the observed response and the contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
    /// JSON-pointer-like location inside the response body, when known
    pub pointer: Option<String>,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pointer: None,
        }
    }

    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    pub fn format(&self) -> String {
        match &self.pointer {
            Some(pointer) if !pointer.is_empty() => {
                format!("{}: {} (at {})", self.kind, self.message, pointer)
            }
            _ => format!("{}: {}", self.kind, self.message),
        }
    }
}

/// Outcome of one validation call. The response conforms iff the issue
/// list is empty.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn conforming() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_format_with_pointer() {
        let issue = ValidationIssue::new(IssueKind::SchemaMismatch, "\"id\" is not an integer")
            .with_pointer("/data/id");

        assert_eq!(
            issue.format(),
            "Response does not match schema: \"id\" is not an integer (at /data/id)"
        );
    }

    #[test]
    fn test_issue_format_without_pointer() {
        let issue = ValidationIssue::new(IssueKind::UndeclaredStatus, "status 418 not declared");

        assert_eq!(
            issue.format(),
            "Undeclared status code: status 418 not declared"
        );
    }

    #[test]
    fn test_report_flags() {
        let mut report = ValidationReport::conforming();
        assert!(report.is_valid());
        assert!(!report.has_errors());

        report
            .issues
            .push(ValidationIssue::new(IssueKind::MissingBody, "no body"));
        assert!(!report.is_valid());
        assert!(report.has_errors());
    }
}
