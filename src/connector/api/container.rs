use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::{
    AnswerProvider, FieldRepository, InteractionRepository, LegacyRelayUseCase,
    ListInteractionsUseCase, ListProvidersUseCase, ProviderDirectory, RecordInteractionUseCase,
    RelayMessageUseCase,
};
use crate::connector::{
    DuckdbFieldRepository, DuckdbInteractionRepository, HttpAnswerProvider, MockAnswerProvider,
};

pub const DATABASE_FILE: &str = "answer-relay.duckdb";

pub struct ContainerConfig {
    pub data_dir: String,
    /// Base address of the answer-provider service. May be empty.
    pub provider_address: String,
    pub timeout_secs: u64,
    pub mock_provider: bool,
    pub memory_storage: bool,
}

pub struct Container {
    field_repo: Arc<DuckdbFieldRepository>,
    interaction_repo: Arc<dyn InteractionRepository>,
    answer_provider: Arc<dyn AnswerProvider>,
    provider_directory: Arc<dyn ProviderDirectory>,
    config: ContainerConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let field_repo = if config.memory_storage {
            debug!("Using in-memory DuckDB storage");
            Arc::new(DuckdbFieldRepository::in_memory()?)
        } else {
            std::fs::create_dir_all(&config.data_dir)
                .with_context(|| format!("failed to create data dir {}", config.data_dir))?;
            let db_path = PathBuf::from(&config.data_dir).join(DATABASE_FILE);
            debug!("Using DuckDB storage at {:?}", db_path);
            Arc::new(DuckdbFieldRepository::new(&db_path)?)
        };

        // Both repositories share one connection; DuckDB allows a single
        // writer per file.
        let interaction_repo: Arc<dyn InteractionRepository> = Arc::new(
            DuckdbInteractionRepository::with_connection(field_repo.shared_connection()).await?,
        );

        let (answer_provider, provider_directory): (
            Arc<dyn AnswerProvider>,
            Arc<dyn ProviderDirectory>,
        ) = if config.mock_provider {
            debug!("Using mock answer provider");
            let mock = Arc::new(MockAnswerProvider::new());
            (mock.clone(), mock)
        } else {
            let http = Arc::new(HttpAnswerProvider::new(
                config.provider_address.clone(),
                Duration::from_secs(config.timeout_secs),
            ));
            if http.base_url().is_empty() {
                tracing::warn!(
                    "No answer provider address configured; relay calls will fail until one is set"
                );
            } else {
                debug!("Answer provider service at {}", http.base_url());
            }
            (http.clone(), http)
        };

        Ok(Self {
            field_repo,
            interaction_repo,
            answer_provider,
            provider_directory,
            config,
        })
    }

    pub fn relay_use_case(&self) -> RelayMessageUseCase {
        RelayMessageUseCase::new(
            self.field_repo.clone() as Arc<dyn FieldRepository>,
            self.answer_provider.clone(),
            RecordInteractionUseCase::new(self.interaction_repo.clone()),
        )
    }

    pub fn legacy_relay_use_case(&self) -> LegacyRelayUseCase {
        LegacyRelayUseCase::new(
            self.list_providers_use_case(),
            self.answer_provider.clone(),
            self.field_repo.clone() as Arc<dyn FieldRepository>,
        )
    }

    pub fn list_providers_use_case(&self) -> ListProvidersUseCase {
        ListProvidersUseCase::new(self.provider_directory.clone())
    }

    pub fn list_interactions_use_case(&self) -> ListInteractionsUseCase {
        ListInteractionsUseCase::new(self.interaction_repo.clone())
    }

    /// Direct access for seeding fields and history rows.
    pub fn field_repository(&self) -> Arc<DuckdbFieldRepository> {
        self.field_repo.clone()
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }

    pub fn provider_address(&self) -> &str {
        &self.config.provider_address
    }

    pub fn memory_storage(&self) -> bool {
        self.config.memory_storage
    }
}
