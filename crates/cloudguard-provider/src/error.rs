/// Failures at the transport boundary.
///
/// `NotFound` is a defined outcome for lookups of single resources; the
/// other variants are operational faults and propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("transport error calling {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("malformed response from {operation}: {message}")]
    Malformed { operation: String, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },
}

impl ProviderError {
    pub fn transport(operation: &str, message: impl Into<String>) -> Self {
        ProviderError::Transport {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed(operation: &str, message: impl Into<String>) -> Self {
        ProviderError::Malformed {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        ProviderError::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}
