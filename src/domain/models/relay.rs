use serde::{Deserialize, Serialize};

use super::History;
use crate::domain::DomainError;

/// A validated relay request. Build one with [`RelayRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    query: String,
    field_id: i64,
    parent_id: Option<i64>,
    user_id: i64,
}

impl RelayRequest {
    pub fn new(
        query: Option<String>,
        field_id: Option<i64>,
        user_id: i64,
    ) -> Result<Self, DomainError> {
        let query = query.ok_or_else(|| DomainError::invalid_input("query is required"))?;
        let field_id =
            field_id.ok_or_else(|| DomainError::invalid_input("field_id is required"))?;

        Ok(Self {
            query,
            field_id,
            parent_id: None,
            user_id,
        })
    }

    pub fn with_parent(mut self, parent_id: Option<i64>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn field_id(&self) -> i64 {
        self.field_id
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

/// Payload sent to the provider's `send` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub query: String,
    pub answer_provider: String,
    pub history: History,
    pub system_prompt: String,
}

/// The provider's reply. Only `text` is required; other members are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAnswer {
    pub text: String,
}

/// A supporting passage returned alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub text: String,
}

/// Result of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    pub answer: String,
    pub contexts: Vec<Context>,
    pub interaction_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_requires_query_and_field() {
        let err = RelayRequest::new(None, Some(1), 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = RelayRequest::new(Some("hi".into()), None, 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn request_accepts_empty_query() {
        let request = RelayRequest::new(Some(String::new()), Some(7), 5).unwrap();
        assert_eq!(request.query(), "");
    }

    #[test]
    fn request_parent_defaults_to_absent() {
        let request = RelayRequest::new(Some("hi".into()), Some(4), 9).unwrap();
        assert_eq!(request.parent_id(), None);
        assert_eq!(request.clone().with_parent(Some(2)).parent_id(), Some(2));
        assert_eq!(request.field_id(), 4);
        assert_eq!(request.user_id(), 9);
    }

    #[test]
    fn provider_request_wire_format() {
        let request = ProviderRequest {
            query: "q".into(),
            answer_provider: "echo".into(),
            history: History::decode(Some(r#"[{"text":"hi"}]"#)),
            system_prompt: "sp".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "q",
                "answer_provider": "echo",
                "history": [{"text": "hi"}],
                "system_prompt": "sp",
            })
        );
    }

    #[test]
    fn provider_answer_ignores_extra_members() {
        let answer: ProviderAnswer =
            serde_json::from_str(r#"{"text":"X","contexts":[],"model":"m"}"#).unwrap();
        assert_eq!(answer.text, "X");
    }
}
