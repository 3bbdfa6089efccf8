use super::*;

/// Tests listing notifications.
///
/// Expected: listed with their prior read state, then unread count drops to zero
#[tokio::test]
async fn lists_then_marks_everything_read() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    factory::notification::create_notification(db, user.id).await?;
    factory::notification::create_notification(db, user.id).await?;
    factory::notification::create_notification(db, other.id).await?;

    let service = NotificationService::new(db);
    assert_eq!(service.unread_count(user.id).await?, 2);

    let listed = service.list_and_mark_read(user.id).await?;

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|n| !n.read));
    assert_eq!(service.unread_count(user.id).await?, 0);
    assert_eq!(service.unread_count(other.id).await?, 1);

    Ok(())
}
