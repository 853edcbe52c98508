use anyhow::Result;

use crate::domain::Interaction;

use super::super::Container;

pub struct InteractionsController<'a> {
    container: &'a Container,
}

impl<'a> InteractionsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self, data_id: i64) -> Result<String> {
        let interactions = self
            .container
            .list_interactions_use_case()
            .execute(data_id)
            .await?;
        Ok(self.format_interactions(data_id, &interactions))
    }

    fn format_interactions(&self, data_id: i64, interactions: &[Interaction]) -> String {
        if interactions.is_empty() {
            return format!("No interactions recorded for content item {}.", data_id);
        }

        let mut output = format!("Interactions for content item {}:\n\n", data_id);
        for interaction in interactions {
            let parent = interaction
                .parent_id()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  #{} at {} by user {} (parent {}, provider {})\n",
                interaction.id(),
                interaction.timestamp(),
                interaction.user_id(),
                parent,
                interaction.provider_name()
            ));
            output.push_str(&format!("    Q: {}\n", interaction.query()));
            output.push_str(&format!("    A: {}\n", interaction.answer()));
        }
        output
    }
}
