use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Upstream provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream provider returned a malformed response: {0}")]
    UpstreamMalformed(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn field_not_found(msg: impl Into<String>) -> Self {
        Self::FieldNotFound(msg.into())
    }

    pub fn provider_not_found(msg: impl Into<String>) -> Self {
        Self::ProviderNotFound(msg.into())
    }

    pub fn upstream_unavailable(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    pub fn upstream_malformed(msg: impl Into<String>) -> Self {
        Self::UpstreamMalformed(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreFailure(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Stable machine-readable identifier, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::FieldNotFound(_) => "field_not_found",
            Self::ProviderNotFound(_) => "provider_not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamMalformed(_) => "upstream_malformed",
            Self::StoreFailure(_) => "store_failure",
            Self::Unauthorized(_) => "unauthorized",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound(_) | Self::ProviderNotFound(_))
    }

    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_) | Self::UpstreamMalformed(_)
        )
    }

    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreFailure(_))
    }
}
