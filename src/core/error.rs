//! Error types for the import pipeline and fetch collaborator

use thiserror::Error;

/// Fatal import failures.
///
/// Only a top-level syntax error or a missing `nodes` collection aborts
/// an import. Every field-level problem degrades to that field's
/// default instead, so hand-edited trees stay importable.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not valid JSON
    #[error("invalid JSON: {0}")]
    Syntax(String),

    /// A required collection is absent
    #[error("missing required field: '{0}'")]
    MissingField(&'static str),

    /// The top level of the document is not a JSON object
    #[error("document root must be a JSON object")]
    NotAnObject,
}

/// Failures reported by a graph fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    /// No document exists for the requested course
    #[error("no tree found for course '{0}'")]
    NotFound(String),

    /// The document could not be read
    #[error("failed to read tree: {0}")]
    Io(#[from] std::io::Error),

    /// The document was read but failed to normalize
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::MissingField("nodes");
        assert_eq!(err.to_string(), "missing required field: 'nodes'");

        let err = ParseError::Syntax("expected value at line 1".to_string());
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_fetch_error_wraps_parse_error() {
        let err = FetchError::from(ParseError::NotAnObject);
        assert!(err.to_string().contains("JSON object"));
    }
}
