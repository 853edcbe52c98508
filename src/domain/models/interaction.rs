use serde::{Deserialize, Serialize};

/// The data needed to record one exchange. The recorder assigns the
/// timestamp and the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub data_id: i64,
    pub user_id: i64,
    pub parent_id: Option<i64>,
    pub provider_name: String,
    pub query: String,
    pub system_prompt: String,
    pub answer: String,
}

/// One persisted query/answer exchange. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    id: i64,
    timestamp: i64,
    user_id: i64,
    data_id: i64,
    parent_id: Option<i64>,
    provider_name: String,
    query: String,
    system_prompt: String,
    answer: String,
}

impl Interaction {
    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: i64,
        timestamp: i64,
        user_id: i64,
        data_id: i64,
        parent_id: Option<i64>,
        provider_name: String,
        query: String,
        system_prompt: String,
        answer: String,
    ) -> Self {
        Self {
            id,
            timestamp,
            user_id,
            data_id,
            parent_id,
            provider_name,
            query,
            system_prompt,
            answer,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn data_id(&self) -> i64 {
        self.data_id
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

pub(crate) fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
