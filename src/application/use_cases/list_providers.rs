use std::sync::Arc;

use crate::application::ProviderDirectory;
use crate::domain::{select_by_hash, DomainError, Provider};

pub struct ListProvidersUseCase {
    directory: Arc<dyn ProviderDirectory>,
}

impl ListProvidersUseCase {
    pub fn new(directory: Arc<dyn ProviderDirectory>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self) -> Result<Vec<Provider>, DomainError> {
        self.directory.list_providers().await
    }

    /// Resolves a provider from the hash of its name.
    pub async fn find_by_hash(&self, provider_hash: &str) -> Result<Provider, DomainError> {
        let providers = self.execute().await?;
        select_by_hash(&providers, provider_hash)
            .cloned()
            .ok_or_else(|| {
                DomainError::provider_not_found("no provider matches the supplied hash")
            })
    }
}
