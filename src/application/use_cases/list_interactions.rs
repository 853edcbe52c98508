use std::sync::Arc;

use crate::application::InteractionRepository;
use crate::domain::{DomainError, Interaction};

pub struct ListInteractionsUseCase {
    interaction_repo: Arc<dyn InteractionRepository>,
}

impl ListInteractionsUseCase {
    pub fn new(interaction_repo: Arc<dyn InteractionRepository>) -> Self {
        Self { interaction_repo }
    }

    pub async fn execute(&self, data_id: i64) -> Result<Vec<Interaction>, DomainError> {
        self.interaction_repo.list_by_data_id(data_id).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Interaction>, DomainError> {
        self.interaction_repo.find_by_id(id).await
    }

    pub async fn total(&self) -> Result<u64, DomainError> {
        self.interaction_repo.count().await
    }
}
