use async_trait::async_trait;

use crate::application::{AnswerProvider, ProviderDirectory};
use crate::domain::{DomainError, Provider, ProviderAnswer, ProviderRequest};

pub const MOCK_PROVIDER_NAME: &str = "echo";

/// Offline provider: answers with the query itself.
pub struct MockAnswerProvider;

impl MockAnswerProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockAnswerProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerProvider for MockAnswerProvider {
    async fn send(&self, request: &ProviderRequest) -> Result<ProviderAnswer, DomainError> {
        Ok(ProviderAnswer {
            text: format!("[{}] {}", request.answer_provider, request.query),
        })
    }
}

#[async_trait]
impl ProviderDirectory for MockAnswerProvider {
    async fn list_providers(&self) -> Result<Vec<Provider>, DomainError> {
        Ok(vec![Provider::new(
            MOCK_PROVIDER_NAME,
            "Repeat the user's message.",
        )])
    }
}
