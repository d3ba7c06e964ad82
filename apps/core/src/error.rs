use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// The classifier and the scorer never produce one of these; they are total over their
/// inputs. Errors only come from validation, assessment completion and persistence.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents data validation errors (e.g., an option that the question does not offer).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The assessment was finished before every question had an answer.
    #[error("Incomplete assessment: missing answers for questions {0:?}")]
    IncompleteAssessment(Vec<u32>),

    /// The durable key-value store could not be read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Whether the error means the value could not be persisted.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, AppError::StorageUnavailable(_))
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::IncompleteAssessment(ids) => AppError::IncompleteAssessment(ids.clone()),
            AppError::StorageUnavailable(s) => AppError::StorageUnavailable(s.clone()),
            AppError::Serialization(s) => AppError::Serialization(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failure_classification() {
        assert!(AppError::StorageUnavailable("quota".into()).is_storage_failure());
        assert!(!AppError::Serialization("eof".into()).is_storage_failure());
        assert!(!AppError::Validation("bad".into()).is_storage_failure());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: AppError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_clone_preserves_variant() {
        let err = AppError::IncompleteAssessment(vec![3, 10]);
        match err.clone() {
            AppError::IncompleteAssessment(ids) => assert_eq!(ids, vec![3, 10]),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
