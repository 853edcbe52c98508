use anyhow::Result;

use crate::cli::FieldAction;
use crate::domain::ContentField;

use super::super::Container;

/// Seeds field configuration and history. In a hosted deployment these rows
/// are written by the host application instead.
pub struct FieldController<'a> {
    container: &'a Container,
}

impl<'a> FieldController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn field(&self, action: FieldAction) -> Result<String> {
        let repo = self.container.field_repository();
        match action {
            FieldAction::Set {
                id,
                data_id,
                provider,
                system_prompt,
            } => {
                let field = ContentField::new(id, data_id, provider, system_prompt);
                repo.save_field(&field).await?;
                Ok(format!(
                    "Saved field {} (content item {}, provider {})",
                    field.id(),
                    field.data_id(),
                    field.provider_name()
                ))
            }
            FieldAction::List => {
                let fields = repo.list_fields().await?;
                Ok(self.format_fields(&fields))
            }
        }
    }

    pub async fn history(&self, field_id: i64, record_id: i64, content: String) -> Result<String> {
        let turns = serde_json::from_str::<Vec<serde_json::Value>>(&content)
            .map_err(|e| anyhow::anyhow!("history must be a JSON array of turns: {}", e))?
            .len();
        self.container
            .field_repository()
            .save_history(field_id, record_id, &content)
            .await?;
        Ok(format!(
            "Stored {} history turns for field {} record {}",
            turns, field_id, record_id
        ))
    }

    fn format_fields(&self, fields: &[ContentField]) -> String {
        if fields.is_empty() {
            return "No fields configured.".to_string();
        }

        let mut output = "Configured fields:\n\n".to_string();
        for field in fields {
            output.push_str(&format!(
                "  {} (content item {})\n    Provider: {}\n",
                field.id(),
                field.data_id(),
                field.provider_name()
            ));
            if field.has_system_prompt() {
                output.push_str(&format!("    Prompt: {}\n", field.system_prompt()));
            }
        }
        output
    }
}
