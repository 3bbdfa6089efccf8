use super::*;

/// Tests that only messages addressed to the reader are marked read.
///
/// Expected: Ok(1) and the reader's own outgoing message stays unread
#[tokio::test]
async fn marks_only_incoming_messages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::create_user(db).await?;
    let bob = factory::user::create_user(db).await?;
    factory::message::create_message(db, "resource-1-2", alice.id, bob.id).await?;
    factory::message::create_message(db, "resource-1-2", bob.id, alice.id).await?;
    let repo = MessageRepository::new(db);

    let marked = repo.mark_thread_read("resource-1-2", bob.id).await?;

    assert_eq!(marked, 1);
    assert_eq!(repo.count_unread(bob.id).await?, 0);
    assert_eq!(repo.count_unread(alice.id).await?, 1);

    Ok(())
}
