use thiserror::Error;

use crate::llm::CompletionError;

/// Errors from the report analysis workflow.
///
/// Display strings are part of the HTTP contract: the UI shows them
/// verbatim, so variants carry the exact user-facing text.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Missing required parameters")]
    InvalidRequest,

    #[error("File not found in storage")]
    ContentNotFound,

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Errors from repository operations (used by trait definitions in nirogya-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_contract_strings() {
        assert_eq!(
            AnalysisError::InvalidRequest.to_string(),
            "Missing required parameters"
        );
        assert_eq!(
            AnalysisError::ContentNotFound.to_string(),
            "File not found in storage"
        );
        let err = AnalysisError::UnsupportedFormat("Unsupported file type for analysis".into());
        assert_eq!(err.to_string(), "Unsupported file type for analysis");
    }

    #[test]
    fn test_completion_error_passes_through() {
        let err: AnalysisError = CompletionError::EmptyResponse.into();
        assert_eq!(err.to_string(), "API returned no content");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
