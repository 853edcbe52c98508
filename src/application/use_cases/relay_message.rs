use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{AnswerProvider, FieldRepository, RecordInteractionUseCase};
use crate::domain::{
    DomainError, History, NewInteraction, ProviderRequest, RelayOutcome, RelayRequest,
};

/// Forwards a query to the provider configured on a content field and
/// records the exchange.
///
/// The provider is called before anything is written, so a failed call
/// leaves no interaction behind.
pub struct RelayMessageUseCase {
    field_repo: Arc<dyn FieldRepository>,
    answer_provider: Arc<dyn AnswerProvider>,
    recorder: RecordInteractionUseCase,
}

impl RelayMessageUseCase {
    pub fn new(
        field_repo: Arc<dyn FieldRepository>,
        answer_provider: Arc<dyn AnswerProvider>,
        recorder: RecordInteractionUseCase,
    ) -> Self {
        Self {
            field_repo,
            answer_provider,
            recorder,
        }
    }

    pub async fn execute(&self, request: RelayRequest) -> Result<RelayOutcome, DomainError> {
        let start_time = Instant::now();

        let field = self
            .field_repo
            .find_by_id(request.field_id())
            .await?
            .ok_or_else(|| {
                DomainError::field_not_found(format!("no field with id {}", request.field_id()))
            })?;

        let history = match request.parent_id() {
            Some(parent_id) => self.load_history(request.field_id(), parent_id).await?,
            None => History::empty(),
        };

        let provider_request = ProviderRequest {
            query: request.query().to_string(),
            answer_provider: field.provider_name().to_string(),
            history,
            system_prompt: field.system_prompt().to_string(),
        };

        let answer = self.answer_provider.send(&provider_request).await?;

        let interaction_id = self
            .recorder
            .execute(&NewInteraction {
                data_id: field.data_id(),
                user_id: request.user_id(),
                parent_id: request.parent_id(),
                provider_name: provider_request.answer_provider,
                query: provider_request.query,
                system_prompt: provider_request.system_prompt,
                answer: answer.text.clone(),
            })
            .await?;

        info!(
            "Relayed query for field {} via '{}' in {:?}",
            field.id(),
            field.provider_name(),
            start_time.elapsed()
        );

        Ok(RelayOutcome {
            answer: answer.text,
            contexts: Vec::new(),
            interaction_id,
        })
    }

    async fn load_history(&self, field_id: i64, parent_id: i64) -> Result<History, DomainError> {
        let raw = self.field_repo.find_history(field_id, parent_id).await?;
        if raw.is_none() {
            warn!(
                "No history stored for field {} record {}; continuing without history",
                field_id, parent_id
            );
        }
        let history = History::decode(raw.as_deref());
        debug!("Loaded {} history turns", history.len());
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::InteractionRepository;
    use crate::connector::{DuckdbFieldRepository, DuckdbInteractionRepository};
    use crate::domain::{ContentField, Interaction, ProviderAnswer};

    /// Replies with a fixed text and keeps every request it receives.
    struct RecordingProvider {
        reply: String,
        seen: Mutex<Vec<ProviderRequest>>,
    }

    impl RecordingProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> ProviderRequest {
            self.seen.lock().unwrap().last().cloned().expect("provider was called")
        }
    }

    #[async_trait]
    impl AnswerProvider for RecordingProvider {
        async fn send(&self, request: &ProviderRequest) -> Result<ProviderAnswer, DomainError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(ProviderAnswer {
                text: self.reply.clone(),
            })
        }
    }

    struct DownProvider;

    #[async_trait]
    impl AnswerProvider for DownProvider {
        async fn send(&self, _request: &ProviderRequest) -> Result<ProviderAnswer, DomainError> {
            Err(DomainError::upstream_unavailable("timed out"))
        }
    }

    /// Store that refuses every write.
    struct FailingInteractions;

    #[async_trait]
    impl InteractionRepository for FailingInteractions {
        async fn insert(
            &self,
            _interaction: &NewInteraction,
            _timestamp: i64,
        ) -> Result<i64, DomainError> {
            Err(DomainError::store("disk full"))
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Interaction>, DomainError> {
            Ok(None)
        }

        async fn list_by_data_id(&self, _data_id: i64) -> Result<Vec<Interaction>, DomainError> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    struct Env {
        fields: Arc<DuckdbFieldRepository>,
        interactions: Arc<DuckdbInteractionRepository>,
    }

    async fn setup() -> Env {
        let fields = Arc::new(DuckdbFieldRepository::in_memory().expect("duckdb"));
        let interactions = Arc::new(
            DuckdbInteractionRepository::with_connection(fields.shared_connection())
                .await
                .expect("interactions schema"),
        );
        fields
            .save_field(&ContentField::new(7, 42, "tutor", "You are a tutor."))
            .await
            .expect("seed field");
        Env {
            fields,
            interactions,
        }
    }

    fn use_case(env: &Env, provider: Arc<dyn AnswerProvider>) -> RelayMessageUseCase {
        RelayMessageUseCase::new(
            env.fields.clone(),
            provider,
            RecordInteractionUseCase::new(env.interactions.clone()),
        )
    }

    fn request(query: &str, field_id: i64) -> RelayRequest {
        RelayRequest::new(Some(query.to_string()), Some(field_id), 5).unwrap()
    }

    #[tokio::test]
    async fn relays_and_records_one_interaction() {
        let env = setup().await;
        let provider = Arc::new(RecordingProvider::new("X"));

        let outcome = use_case(&env, provider.clone())
            .execute(request("what is rust?", 7))
            .await
            .expect("relay");

        assert_eq!(outcome.answer, "X");
        assert!(outcome.contexts.is_empty());
        assert!(outcome.interaction_id > 0);

        let sent = provider.last_request();
        assert_eq!(sent.answer_provider, "tutor");
        assert_eq!(sent.system_prompt, "You are a tutor.");
        assert!(sent.history.is_empty());

        assert_eq!(env.interactions.count().await.unwrap(), 1);
        let stored = env
            .interactions
            .find_by_id(outcome.interaction_id)
            .await
            .unwrap()
            .expect("stored");
        assert_eq!(stored.query(), "what is rust?");
        assert_eq!(stored.answer(), "X");
        assert_eq!(stored.data_id(), 42);
        assert_eq!(stored.user_id(), 5);
        assert_eq!(stored.provider_name(), "tutor");
        assert!(stored.timestamp() > 0);
        assert_eq!(stored.parent_id(), None);
    }

    #[tokio::test]
    async fn unknown_field_is_not_found_and_writes_nothing() {
        let env = setup().await;
        let provider = Arc::new(RecordingProvider::new("X"));

        let err = use_case(&env, provider.clone())
            .execute(request("hello", 999))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::FieldNotFound(_)));
        assert!(provider.seen.lock().unwrap().is_empty());
        assert_eq!(env.interactions.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_history_row_sends_empty_history() {
        let env = setup().await;
        let provider = Arc::new(RecordingProvider::new("X"));

        let outcome = use_case(&env, provider.clone())
            .execute(request("follow up", 7).with_parent(Some(3)))
            .await
            .expect("relay");

        assert!(provider.last_request().history.is_empty());
        let stored = env
            .interactions
            .find_by_id(outcome.interaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.parent_id(), Some(3));
    }

    #[tokio::test]
    async fn stored_history_is_forwarded_verbatim() {
        let env = setup().await;
        env.fields
            .save_history(7, 3, r#"[{"text":"hi"}]"#)
            .await
            .unwrap();
        let provider = Arc::new(RecordingProvider::new("X"));

        use_case(&env, provider.clone())
            .execute(request("follow up", 7).with_parent(Some(3)))
            .await
            .expect("relay");

        let sent = serde_json::to_value(&provider.last_request().history).unwrap();
        assert_eq!(sent, serde_json::json!([{"text": "hi"}]));
    }

    #[tokio::test]
    async fn malformed_history_degrades_to_empty() {
        let env = setup().await;
        env.fields.save_history(7, 3, "{oops").await.unwrap();
        let provider = Arc::new(RecordingProvider::new("X"));

        use_case(&env, provider.clone())
            .execute(request("follow up", 7).with_parent(Some(3)))
            .await
            .expect("relay");

        assert!(provider.last_request().history.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_writes_nothing() {
        let env = setup().await;

        let err = use_case(&env, Arc::new(DownProvider))
            .execute(request("hello", 7))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
        assert_eq!(env.interactions.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn identical_calls_create_distinct_interactions() {
        let env = setup().await;
        let provider = Arc::new(RecordingProvider::new("same"));
        let relay = use_case(&env, provider);

        let first = relay.execute(request("again", 7)).await.unwrap();
        let second = relay.execute(request("again", 7)).await.unwrap();

        assert_ne!(first.interaction_id, second.interaction_id);
        assert_eq!(env.interactions.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn store_failure_aborts_the_relay() {
        let env = setup().await;
        let provider = Arc::new(RecordingProvider::new("X"));
        let relay = RelayMessageUseCase::new(
            env.fields.clone(),
            provider.clone(),
            RecordInteractionUseCase::new(Arc::new(FailingInteractions)),
        );

        let err = relay.execute(request("hello", 7)).await.unwrap_err();

        assert!(matches!(err, DomainError::StoreFailure(_)));
        assert_eq!(err.kind(), "store_failure");
        assert_eq!(provider.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_query_is_relayed() {
        let env = setup().await;
        let provider = Arc::new(RecordingProvider::new("X"));

        let outcome = use_case(&env, provider.clone())
            .execute(request("", 7))
            .await
            .expect("relay");

        assert_eq!(provider.last_request().query, "");
        let stored = env
            .interactions
            .find_by_id(outcome.interaction_id)
            .await
            .unwrap()
            .expect("stored");
        assert_eq!(stored.query(), "");
    }
}
