use anyhow::Result;

use super::super::Container;

pub struct StatsController<'a> {
    container: &'a Container,
}

impl<'a> StatsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let fields = self.container.field_repository().list_fields().await?;
        let interactions = self.container.list_interactions_use_case().total().await?;

        let data_dir = if self.container.memory_storage() {
            "(in memory)"
        } else {
            self.container.data_dir()
        };
        let address = if self.container.provider_address().is_empty() {
            "(not configured)"
        } else {
            self.container.provider_address()
        };

        Ok(format!(
            "Answer Relay Statistics\n=======================\nFields:       {}\nInteractions: {}\nData Dir:     {}\nProvider:     {}",
            fields.len(),
            interactions,
            data_dir,
            address
        ))
    }
}
