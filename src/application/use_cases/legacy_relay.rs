use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{AnswerProvider, FieldRepository, ListProvidersUseCase};
use crate::domain::{Context, DomainError, History, HistoryTurn, ProviderRequest};

/// Request shape of the older integration, where the caller names the
/// provider by hash and carries the history itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRelayRequest {
    pub query: String,
    pub provider_hash: String,
    pub history: Vec<String>,
    /// Negative means "no field": keep the provider's default prompt.
    pub field_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRelayOutcome {
    pub answer: String,
    pub contexts: Vec<Context>,
}

/// Relay path selecting the provider by hash. Nothing is recorded.
pub struct LegacyRelayUseCase {
    providers: ListProvidersUseCase,
    answer_provider: Arc<dyn AnswerProvider>,
    field_repo: Arc<dyn FieldRepository>,
}

impl LegacyRelayUseCase {
    pub fn new(
        providers: ListProvidersUseCase,
        answer_provider: Arc<dyn AnswerProvider>,
        field_repo: Arc<dyn FieldRepository>,
    ) -> Self {
        Self {
            providers,
            answer_provider,
            field_repo,
        }
    }

    pub async fn execute(
        &self,
        request: LegacyRelayRequest,
    ) -> Result<LegacyRelayOutcome, DomainError> {
        let provider = self.providers.find_by_hash(&request.provider_hash).await?;
        let mut system_prompt = provider.default_system_prompt().to_string();

        if request.field_id >= 0 {
            if let Some(field) = self.field_repo.find_by_id(request.field_id).await? {
                if field.has_system_prompt() {
                    debug!("Using system prompt of field {}", field.id());
                    system_prompt = field.system_prompt().to_string();
                }
            }
        }

        let history = History::new(request.history.into_iter().map(HistoryTurn::from).collect());
        let answer = self
            .answer_provider
            .send(&ProviderRequest {
                query: request.query,
                answer_provider: provider.name().to_string(),
                history,
                system_prompt,
            })
            .await?;

        info!("Relayed legacy query via '{}'", provider.name());

        Ok(LegacyRelayOutcome {
            answer: answer.text,
            contexts: Vec::new(),
        })
    }
}
