//! Error types for redaction and log emission.

use thiserror::Error;

use crate::DataClassification;

/// A classified value could not be redacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedactionError {
    /// The policy has no redactor (and no fallback) for this classification
    /// and is configured to fail closed.
    #[error("no redactor registered for classification `{0}`")]
    UnknownClassification(DataClassification),

    /// A redactor returned more output than it declared. This is a bug in the
    /// redactor.
    #[error(
        "redactor for `{classification}` produced {actual_len} characters, \
         exceeding its declared maximum of {max_len}"
    )]
    InvariantViolation {
        classification: DataClassification,
        max_len: usize,
        actual_len: usize,
    },
}

/// A log entry could not be emitted.
#[cfg(feature = "sink")]
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Redaction(#[from] RedactionError),

    #[error("failed to serialize log entry: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write log entry: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::RedactionError;
    use crate::DataClassification;

    #[test]
    fn messages_name_the_classification() {
        let classification = DataClassification::new("clinic", "HealthRecord");
        let err = RedactionError::UnknownClassification(classification.clone());
        assert_eq!(
            err.to_string(),
            "no redactor registered for classification `clinic:HealthRecord`"
        );

        let err = RedactionError::InvariantViolation {
            classification,
            max_len: 3,
            actual_len: 5,
        };
        assert!(err.to_string().contains("exceeding its declared maximum of 3"));
    }
}
