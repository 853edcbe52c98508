use std::sync::Arc;

use answer_relay::{
    ContentField, DuckdbFieldRepository, DuckdbInteractionRepository, FieldRepository,
    InteractionRepository, NewInteraction,
};
use tempfile::tempdir;

fn interaction(data_id: i64, query: &str, parent_id: Option<i64>) -> NewInteraction {
    NewInteraction {
        data_id,
        user_id: 3,
        parent_id,
        provider_name: "tutor".to_string(),
        query: query.to_string(),
        system_prompt: "You are a tutor.".to_string(),
        answer: format!("answer to {query}"),
    }
}

#[tokio::test]
async fn duckdb_field_repository_roundtrip_field_and_history() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("answer-relay.duckdb");

    let fields = DuckdbFieldRepository::new(&db_path).expect("duckdb init");
    fields
        .save_field(&ContentField::new(7, 42, "tutor", "You are a tutor."))
        .await
        .expect("save field");
    fields
        .save_history(7, 1, r#"[{"text":"hi"}]"#)
        .await
        .expect("save history");

    let field = fields
        .find_by_id(7)
        .await
        .expect("find_by_id")
        .expect("field exists");
    assert_eq!(field.data_id(), 42);
    assert_eq!(field.provider_name(), "tutor");
    assert_eq!(field.system_prompt(), "You are a tutor.");

    assert!(fields.find_by_id(8).await.expect("find_by_id").is_none());

    let history = fields.find_history(7, 1).await.expect("find_history");
    assert_eq!(history.as_deref(), Some(r#"[{"text":"hi"}]"#));
    assert!(fields.find_history(7, 2).await.expect("find_history").is_none());
}

#[tokio::test]
async fn duckdb_field_repository_replaces_existing_field() {
    let fields = DuckdbFieldRepository::in_memory().expect("duckdb init");

    fields
        .save_field(&ContentField::new(1, 10, "old", "old prompt"))
        .await
        .expect("save");
    fields
        .save_field(&ContentField::new(1, 10, "new", ""))
        .await
        .expect("save again");

    let listed = fields.list_fields().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].provider_name(), "new");
    assert!(!listed[0].has_system_prompt());
}

#[tokio::test]
async fn duckdb_interaction_repository_assigns_increasing_ids() {
    let fields = DuckdbFieldRepository::in_memory().expect("duckdb init");
    let interactions = DuckdbInteractionRepository::with_connection(fields.shared_connection())
        .await
        .expect("schema");

    let first = interactions
        .insert(&interaction(42, "q1", None), 1_700_000_000)
        .await
        .expect("insert");
    let second = interactions
        .insert(&interaction(42, "q2", Some(first)), 1_700_000_010)
        .await
        .expect("insert");
    interactions
        .insert(&interaction(99, "other item", None), 1_700_000_020)
        .await
        .expect("insert");

    assert!(first > 0);
    assert!(second > first);
    assert_eq!(interactions.count().await.expect("count"), 3);

    let stored = interactions
        .find_by_id(second)
        .await
        .expect("find_by_id")
        .expect("exists");
    assert_eq!(stored.timestamp(), 1_700_000_010);
    assert_eq!(stored.parent_id(), Some(first));
    assert_eq!(stored.query(), "q2");
    assert_eq!(stored.answer(), "answer to q2");

    let for_item = interactions.list_by_data_id(42).await.expect("list");
    assert_eq!(for_item.len(), 2);
    assert_eq!(for_item[0].id(), first);
    assert_eq!(for_item[1].id(), second);
}

#[tokio::test]
async fn duckdb_interactions_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("answer-relay.duckdb");

    let first_id = {
        let fields = Arc::new(DuckdbFieldRepository::new(&db_path).expect("duckdb init"));
        let interactions =
            DuckdbInteractionRepository::with_connection(fields.shared_connection())
                .await
                .expect("schema");
        interactions
            .insert(&interaction(1, "before restart", None), 1)
            .await
            .expect("insert")
    };

    let fields = Arc::new(DuckdbFieldRepository::new(&db_path).expect("duckdb reopen"));
    let interactions = DuckdbInteractionRepository::with_connection(fields.shared_connection())
        .await
        .expect("schema");
    let next_id = interactions
        .insert(&interaction(1, "after restart", None), 2)
        .await
        .expect("insert");

    assert_ne!(first_id, next_id);
    assert_eq!(interactions.count().await.expect("count"), 2);
}
