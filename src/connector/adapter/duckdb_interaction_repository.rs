use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::InteractionRepository;
use crate::domain::{DomainError, Interaction, NewInteraction};

const SELECT_COLUMNS: &str = "SELECT id, timecreated, userid, dataid, parentrid, answer_provider, query, system_prompt, answer FROM interactions";

pub struct DuckdbInteractionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbInteractionRepository {
    /// Create a new adapter using an existing shared connection.
    pub async fn with_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, DomainError> {
        let conn_guard = conn.lock().await;
        Self::initialize_schema(&conn_guard)?;
        drop(conn_guard);

        Ok(Self { conn })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE SEQUENCE IF NOT EXISTS interactions_id_seq START 1;

            CREATE TABLE IF NOT EXISTS interactions (
                id BIGINT PRIMARY KEY DEFAULT nextval('interactions_id_seq'),
                timecreated BIGINT NOT NULL,
                userid BIGINT NOT NULL,
                dataid BIGINT NOT NULL,
                parentrid BIGINT,
                answer_provider TEXT NOT NULL,
                query TEXT NOT NULL,
                system_prompt TEXT NOT NULL,
                answer TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_interactions_dataid
            ON interactions(dataid);
            "#,
        )
        .map_err(|e| {
            DomainError::store(format!("Failed to initialize interactions schema: {}", e))
        })?;

        debug!("DuckDB interactions table initialized");
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> duckdb::Result<Interaction> {
        Ok(Interaction::reconstitute(
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
        ))
    }
}

#[async_trait]
impl InteractionRepository for DuckdbInteractionRepository {
    async fn insert(
        &self,
        interaction: &NewInteraction,
        timestamp: i64,
    ) -> Result<i64, DomainError> {
        let conn = self.conn.lock().await;
        let id: i64 = conn
            .query_row(
                r#"
                INSERT INTO interactions
                    (timecreated, userid, dataid, parentrid, answer_provider, query, system_prompt, answer)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
                params![
                    timestamp,
                    interaction.user_id,
                    interaction.data_id,
                    interaction.parent_id,
                    interaction.provider_name,
                    interaction.query,
                    interaction.system_prompt,
                    interaction.answer,
                ],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::store(format!("Failed to insert interaction: {}", e)))?;

        debug!("Inserted interaction {} for content item {}", id, interaction.data_id);
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Interaction>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .map_err(|e| DomainError::store(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![id], Self::map_row) {
            Ok(interaction) => Ok(Some(interaction)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::store(format!(
                "Failed to query interaction: {}",
                e
            ))),
        }
    }

    async fn list_by_data_id(&self, data_id: i64) -> Result<Vec<Interaction>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE dataid = ? ORDER BY id"))
            .map_err(|e| DomainError::store(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![data_id], Self::map_row)
            .map_err(|e| DomainError::store(format!("Failed to query interactions: {}", e)))?;

        let mut interactions = Vec::new();
        for row in rows {
            interactions
                .push(row.map_err(|e| DomainError::store(format!("Failed to read row: {}", e)))?);
        }
        Ok(interactions)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))
            .map_err(|e| DomainError::store(format!("Failed to count interactions: {}", e)))?;
        Ok(count as u64)
    }
}
