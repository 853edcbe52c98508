use serde::{Deserialize, Serialize};

/// A configurable slot of a content item, holding the provider and prompt
/// the relay uses for queries against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentField {
    id: i64,
    /// Owning content item.
    data_id: i64,
    provider_name: String,
    system_prompt: String,
}

impl ContentField {
    pub fn new(
        id: i64,
        data_id: i64,
        provider_name: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id,
            data_id,
            provider_name: provider_name.into(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn data_id(&self) -> i64 {
        self.data_id
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn has_system_prompt(&self) -> bool {
        !self.system_prompt.trim().is_empty()
    }
}
