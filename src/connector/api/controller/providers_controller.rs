use anyhow::Result;

use crate::domain::{compute_provider_hash, Provider};

use super::super::Container;

pub struct ProvidersController<'a> {
    container: &'a Container,
}

impl<'a> ProvidersController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self) -> Result<String> {
        let providers = self.container.list_providers_use_case().execute().await?;
        Ok(self.format_providers(&providers))
    }

    fn format_providers(&self, providers: &[Provider]) -> String {
        if providers.is_empty() {
            return "No providers available.".to_string();
        }

        let mut output = "Answer providers:\n\n".to_string();
        for provider in providers {
            output.push_str(&format!("  {}\n", provider.name()));
            output.push_str(&format!("    Hash: {}\n", compute_provider_hash(provider.name())));
            if !provider.default_system_prompt().is_empty() {
                output.push_str(&format!(
                    "    Default prompt: {}\n",
                    provider.default_system_prompt()
                ));
            }
            output.push('\n');
        }
        output
    }
}
