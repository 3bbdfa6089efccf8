use super::*;

/// Tests running a read-only query against real tables.
///
/// Expected: one JSON object per row with column names as keys
#[tokio::test]
async fn returns_rows_as_json() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    factory::resource::ResourceFactory::new(db, owner.id)
        .title("Quiet Room")
        .build()
        .await?;
    factory::resource::ResourceFactory::new(db, owner.id)
        .title("Loud Room")
        .build()
        .await?;

    let rows = executor::execute(db, "SELECT title FROM resource ORDER BY title").await?;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], "Loud Room");
    assert_eq!(rows[1]["title"], "Quiet Room");

    Ok(())
}

/// Tests a destructive statement.
///
/// Expected: Err(UnsafeQuery) and the table keeps its rows
#[tokio::test]
async fn refuses_to_drop_tables() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;

    let result = executor::execute(db, "DROP TABLE resource").await;

    assert!(matches!(result, Err(ChatbotError::UnsafeQuery(_))));
    assert!(ResourceRepository::new(db)
        .find_by_id(resource.id)
        .await?
        .is_some());

    Ok(())
}

/// Tests a syntactically broken select.
///
/// Expected: Err(QueryFailed)
#[tokio::test]
async fn reports_sql_errors() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = executor::execute(db, "SELECT nope FROM missing_table").await;

    assert!(matches!(result, Err(ChatbotError::QueryFailed(_))));

    Ok(())
}

/// Tests a select followed by a commit and a write smuggled into the same string.
///
/// Expected: Err(UnsafeQuery) and the student keeps their role
#[tokio::test]
async fn refuses_chained_statements_that_escape_the_transaction() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let sql = format!(
        "SELECT 1; COMMIT; REPLACE INTO user (id, email, password_hash, name, role, created_at) \
         SELECT id, email, password_hash, name, 'admin', created_at FROM user WHERE id = {}",
        student.id
    );

    let result = executor::execute(db, &sql).await;

    assert!(matches!(result, Err(ChatbotError::UnsafeQuery(_))));
    let stored = UserRepository::new(db).find_by_id(student.id).await?.unwrap();
    assert_eq!(stored.role, Role::Student);

    Ok(())
}

/// Tests that the connection accepts writes again after a query has run.
///
/// Expected: a later insert through the normal path succeeds
#[tokio::test]
async fn leaves_connection_writable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    executor::execute(db, "SELECT COUNT(*) AS n FROM user;").await?;
    factory::user::create_user(db).await?;

    let rows = executor::execute(db, "SELECT COUNT(*) AS n FROM user").await?;
    assert_eq!(rows[0]["n"], 1);

    Ok(())
}
