/// Error raised by an external collaborator service
///
/// Species resolution, background construction, and the three mapping
/// services are implemented outside the reconciliation core, so their
/// failures are carried as an opaque message rather than forced onto this
/// crate's taxonomy.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CollaboratorError {
    message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for CollaboratorError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for CollaboratorError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Errors that can abort a reconciliation
///
/// Every variant is fatal to the call: no partial result is returned and no
/// retry is attempted. A caller seeing any of these must not proceed to
/// enrichment testing.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Request parameters are mutually inconsistent; not retryable without
    /// fixing the request
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Fewer than the minimum number of hit genes survived filtering; not
    /// retryable with the same inputs
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A post-filter membership assertion failed
    #[error("invariant violated during {stage}: {detail}")]
    InvariantViolation {
        stage: &'static str,
        detail: String,
    },

    /// A collaborator service failed; `stage` names which call
    #[error("{stage} failed: {source}")]
    Collaborator {
        stage: &'static str,
        #[source]
        source: CollaboratorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = ReconcileError::Configuration("geneSizeControl requires genelistSpecies=human".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: geneSizeControl requires genelistSpecies=human"
        );
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = ReconcileError::InsufficientData("too few genes".to_string());
        assert_eq!(err.to_string(), "insufficient data: too few genes");
    }

    #[test]
    fn test_invariant_violation_display() {
        let err = ReconcileError::InvariantViolation {
            stage: "hit/background restriction",
            detail: "1 gene outside background".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invariant violated during hit/background restriction: 1 gene outside background"
        );
    }

    #[test]
    fn test_collaborator_display_and_source() {
        use std::error::Error;

        let err = ReconcileError::Collaborator {
            stage: "ortholog mapping",
            source: CollaboratorError::new("no table for mouse -> human"),
        };
        assert_eq!(
            err.to_string(),
            "ortholog mapping failed: no table for mouse -> human"
        );
        assert!(err.source().is_some());
    }
}
