use async_trait::async_trait;

use crate::domain::{DomainError, Interaction, NewInteraction};

/// Append-only persistence for interactions.
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Inserts one record and returns the identifier the store assigned.
    async fn insert(
        &self,
        interaction: &NewInteraction,
        timestamp: i64,
    ) -> Result<i64, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Interaction>, DomainError>;

    /// Interactions of one content item, oldest first.
    async fn list_by_data_id(&self, data_id: i64) -> Result<Vec<Interaction>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
