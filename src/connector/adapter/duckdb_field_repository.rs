use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::FieldRepository;
use crate::domain::{ContentField, DomainError};

/// Field configuration and history rows, laid out the way the host
/// application stores them (`data_fields.param1` is the provider name,
/// `data_fields.param3` the system prompt).
pub struct DuckdbFieldRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbFieldRepository {
    pub fn new(db_path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::store(format!("Failed to open DuckDB database: {}", e)))?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::store(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns a clone of the shared connection Arc so the interaction
    /// repository can write to the same database file.
    pub fn shared_connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS data_fields (
                id BIGINT PRIMARY KEY,
                dataid BIGINT NOT NULL,
                param1 TEXT,
                param3 TEXT
            );

            CREATE TABLE IF NOT EXISTS data_content (
                fieldid BIGINT NOT NULL,
                recordid BIGINT NOT NULL,
                content TEXT,
                PRIMARY KEY (fieldid, recordid)
            );
            "#,
        )
        .map_err(|e| DomainError::store(format!("Failed to initialize field schema: {}", e)))?;

        debug!("DuckDB field schema initialized");
        Ok(())
    }

    /// Creates or replaces a field. Field authoring belongs to the host
    /// application; this exists for standalone deployments and tests.
    pub async fn save_field(&self, field: &ContentField) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO data_fields (id, dataid, param1, param3) VALUES (?, ?, ?, ?)",
            params![
                field.id(),
                field.data_id(),
                field.provider_name(),
                field.system_prompt(),
            ],
        )
        .map_err(|e| DomainError::store(format!("Failed to save field: {}", e)))?;

        debug!("Saved field {} for content item {}", field.id(), field.data_id());
        Ok(())
    }

    /// Stores the serialized history for `(field_id, record_id)` verbatim.
    pub async fn save_history(
        &self,
        field_id: i64,
        record_id: i64,
        content: &str,
    ) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO data_content (fieldid, recordid, content) VALUES (?, ?, ?)",
            params![field_id, record_id, content],
        )
        .map_err(|e| DomainError::store(format!("Failed to save history: {}", e)))?;

        Ok(())
    }

    pub async fn list_fields(&self) -> Result<Vec<ContentField>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, dataid, param1, param3 FROM data_fields ORDER BY id")
            .map_err(|e| DomainError::store(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ContentField::new(
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                ))
            })
            .map_err(|e| DomainError::store(format!("Failed to query fields: {}", e)))?;

        let mut fields = Vec::new();
        for row in rows {
            fields.push(row.map_err(|e| DomainError::store(format!("Failed to read row: {}", e)))?);
        }
        Ok(fields)
    }
}

#[async_trait]
impl FieldRepository for DuckdbFieldRepository {
    async fn find_by_id(&self, field_id: i64) -> Result<Option<ContentField>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, dataid, param1, param3 FROM data_fields WHERE id = ?")
            .map_err(|e| DomainError::store(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![field_id], |row| {
            Ok(ContentField::new(
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            ))
        }) {
            Ok(field) => Ok(Some(field)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::store(format!("Failed to query field: {}", e))),
        }
    }

    async fn find_history(
        &self,
        field_id: i64,
        record_id: i64,
    ) -> Result<Option<String>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT content FROM data_content WHERE fieldid = ? AND recordid = ?")
            .map_err(|e| DomainError::store(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![field_id, record_id], |row| {
            row.get::<_, Option<String>>(0)
        }) {
            Ok(content) => Ok(content),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::store(format!("Failed to query history: {}", e))),
        }
    }
}
