use async_trait::async_trait;

use crate::domain::{ContentField, DomainError};

/// Read access to field configuration and stored conversation history.
///
/// Both tables are owned by the host application; the relay never writes them.
#[async_trait]
pub trait FieldRepository: Send + Sync {
    async fn find_by_id(&self, field_id: i64) -> Result<Option<ContentField>, DomainError>;

    /// Raw serialized history stored for `(field_id, record_id)`, if any.
    async fn find_history(
        &self,
        field_id: i64,
        record_id: i64,
    ) -> Result<Option<String>, DomainError>;
}
