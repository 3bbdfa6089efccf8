use super::*;

/// Tests listing a user's notifications newest first with a limit.
///
/// Expected: The two most recent notifications of that user only
#[tokio::test]
async fn returns_newest_first_with_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    for title in ["first", "second", "third"] {
        factory::notification::NotificationFactory::new(db, user.id)
            .title(title)
            .build()
            .await?;
    }
    factory::notification::create_notification(db, other.id).await?;

    let notifications = NotificationRepository::new(db)
        .get_for_user(user.id, Some(2))
        .await?;

    let titles: Vec<&str> = notifications.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second"]);

    Ok(())
}
