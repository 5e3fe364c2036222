use agenda_database::*;

#[tokio::test]
async fn in_memory_store_is_healthy() {
    let db = Database::connect(ConnectOptions::in_memory("test_ns", "test_db"))
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
}

#[tokio::test]
async fn schema_is_applied_and_idempotent() {
    let db = Database::connect(ConnectOptions::in_memory("test_ns", "schema_db"))
        .await
        .expect("connect to mem://");

    db.query("CREATE contato SET nome = 'Ana Silva', telefone = '(11) 91234-5678', email = 'ana@b.com'")
        .await
        .expect("send create")
        .check()
        .expect("table accepts a well-formed row");

    let again = db.clone();
    drop(db);
    let mut response =
        again.query("RETURN count(SELECT * FROM contato)").await.expect("count contacts");
    let count = response.take::<Option<i64>>(0).expect("count result");
    assert_eq!(count, Some(1));
}

#[tokio::test]
async fn blank_session_fields_fail_validation() {
    let mut options = ConnectOptions::in_memory("agenda", "");
    let err = Database::connect(options.clone()).await.unwrap_err();
    assert!(err.to_string().contains("database"), "got {err}");

    options.database = "contatos".to_owned();
    options.url = "  ".to_owned();
    let err = Database::connect(options).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
    assert!(err.to_string().contains("url"), "got {err}");
}

#[tokio::test]
async fn unknown_scheme_is_a_connection_error() {
    let options = ConnectOptions { url: "nope://x".to_owned(), ..ConnectOptions::in_memory("a", "b") };
    let err = Database::connect(options).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Connection { .. }), "got {err}");
}

#[test]
fn context_is_rendered_in_message() {
    let result: Result<(), DatabaseError> =
        Err(DatabaseError::Schema { message: "boom".into(), context: None });
    let err = result.context("Bootstrapping").unwrap_err();
    assert_eq!(err.to_string(), "Schema error (Bootstrapping): boom");
}
