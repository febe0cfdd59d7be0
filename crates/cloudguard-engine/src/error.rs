use cloudguard_provider::ProviderError;

/// Failures that abort a scan invocation.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A caller-supplied precondition was violated. Raised before any remote
    /// call and never retried.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A transport or API fault from the provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A rule's audit logic failed in a way it could not express as an
    /// audit state.
    #[error("rule {rule} failed: {message}")]
    Rule { rule: String, message: String },
}

impl ScanError {
    pub fn precondition(message: impl Into<String>) -> Self {
        ScanError::Precondition(message.into())
    }
}
