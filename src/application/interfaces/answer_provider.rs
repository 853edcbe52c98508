use async_trait::async_trait;

use crate::domain::{DomainError, Provider, ProviderAnswer, ProviderRequest};

/// Sends a query to the external answer-provider service.
///
/// Implementors must map transport failures, timeouts and non-success
/// statuses to [`DomainError::UpstreamUnavailable`], and undecodable bodies to
/// [`DomainError::UpstreamMalformed`].
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn send(&self, request: &ProviderRequest) -> Result<ProviderAnswer, DomainError>;
}

/// Lists the providers the external service currently offers.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    async fn list_providers(&self) -> Result<Vec<Provider>, DomainError>;
}
