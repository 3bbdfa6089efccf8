use super::*;

/// Tests an anonymous request.
///
/// Expected: Ok(None)
#[tokio::test]
async fn anonymous_is_none() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let viewer = AuthGuard::new(db, session).optional().await?;

    assert!(viewer.is_none());

    Ok(())
}

/// Tests a logged-in request and one whose account was deleted.
///
/// Expected: Some(User) for the live account, None once it is gone
#[tokio::test]
async fn resolves_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let viewer = AuthGuard::new(db, session).optional().await?;
    assert_eq!(viewer.map(|u| u.id), Some(user.id));

    AuthSession::new(session).set_user_id(user.id + 50).await?;
    let stale = AuthGuard::new(db, session).optional().await?;
    assert!(stale.is_none());

    Ok(())
}
