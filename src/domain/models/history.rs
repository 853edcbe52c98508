use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One prior turn of a conversation.
///
/// Kept as the raw JSON value it was stored as (a bare string or an object
/// with a `text` member) so it reaches the provider unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryTurn(Value);

impl HistoryTurn {
    pub fn text(&self) -> Option<&str> {
        match &self.0 {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("text").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl From<&str> for HistoryTurn {
    fn from(text: &str) -> Self {
        Self(Value::String(text.to_string()))
    }
}

impl From<String> for HistoryTurn {
    fn from(text: String) -> Self {
        Self(Value::String(text))
    }
}

impl From<Value> for HistoryTurn {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Ordered prior turns forwarded to the provider for context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    turns: Vec<HistoryTurn>,
}

impl History {
    pub fn new(turns: Vec<HistoryTurn>) -> Self {
        Self { turns }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes a stored history column. Anything that is not a JSON array
    /// yields an empty history rather than an error.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::empty();
        };
        if raw.trim().is_empty() {
            return Self::empty();
        }

        match serde_json::from_str::<Vec<HistoryTurn>>(raw) {
            Ok(turns) => Self { turns },
            Err(e) => {
                warn!("Ignoring undecodable history ({} bytes): {}", raw.len(), e);
                Self::empty()
            }
        }
    }

    pub fn turns(&self) -> &[HistoryTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
