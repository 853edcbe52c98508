use anyhow::Result;

use crate::domain::{RelayOutcome, RelayRequest};

use super::super::Container;

pub struct SendController<'a> {
    container: &'a Container,
}

impl<'a> SendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn send(
        &self,
        query: String,
        field_id: i64,
        parent_rid: Option<i64>,
        user_id: i64,
    ) -> Result<String> {
        let request = RelayRequest::new(Some(query), Some(field_id), user_id)?.with_parent(parent_rid);
        let outcome = self.container.relay_use_case().execute(request).await?;
        Ok(self.format_outcome(&outcome))
    }

    fn format_outcome(&self, outcome: &RelayOutcome) -> String {
        format!(
            "{}\n\n(interaction {})",
            outcome.answer, outcome.interaction_id
        )
    }
}
