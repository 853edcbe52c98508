use serde::{Deserialize, Serialize};

use crate::domain::{Context, Provider};

fn no_field() -> i64 {
    -1
}

/// Body of `POST /send_message`. Required members are optional here so a
/// missing one is reported as invalid input rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct SendMessageInput {
    pub query: Option<String>,
    pub field_id: Option<i64>,
    pub parent_rid: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageOutput {
    pub output: SendMessageBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageBody {
    pub answer: String,
    pub contexts: Vec<Context>,
    pub interaction_id: i64,
}

/// Body of `POST /send_message_legacy`.
#[derive(Debug, Deserialize)]
pub struct LegacySendMessageInput {
    pub query: String,
    pub provider_hash: String,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default = "no_field")]
    pub field_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LegacySendMessageOutput {
    pub output: LegacySendMessageBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LegacySendMessageBody {
    pub answer: String,
    pub contexts: Vec<Context>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersOutput {
    pub providers: Vec<Provider>,
}
