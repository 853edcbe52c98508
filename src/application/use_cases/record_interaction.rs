use std::sync::Arc;

use tracing::info;

use crate::application::InteractionRepository;
use crate::domain::{current_timestamp, DomainError, NewInteraction};

/// Persists one exchange with a server-assigned timestamp.
pub struct RecordInteractionUseCase {
    interaction_repo: Arc<dyn InteractionRepository>,
}

impl RecordInteractionUseCase {
    pub fn new(interaction_repo: Arc<dyn InteractionRepository>) -> Self {
        Self { interaction_repo }
    }

    pub async fn execute(&self, interaction: &NewInteraction) -> Result<i64, DomainError> {
        let id = self
            .interaction_repo
            .insert(interaction, current_timestamp())
            .await?;

        info!(
            "Recorded interaction {} (content item {}, user {}, parent {:?})",
            id, interaction.data_id, interaction.user_id, interaction.parent_id
        );
        Ok(id)
    }
}
