use super::*;

/// Tests storing a message under its rendered thread id.
///
/// Expected: Ok with an unread message in thread `booking-9`
#[tokio::test]
async fn stores_message_in_thread() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::create_user(db).await?;
    let bob = factory::user::create_user(db).await?;
    let repo = MessageRepository::new(db);

    let message = repo
        .create(CreateMessageParam {
            thread_id: ThreadId::Booking { booking_id: 9 },
            sender_id: alice.id,
            receiver_id: bob.id,
            content: "Can we start at 10?".to_string(),
        })
        .await?;

    assert_eq!(message.thread_id, "booking-9");
    assert!(!message.read);
    let thread = repo.get_thread("booking-9").await?;
    assert_eq!(thread, vec![message]);

    Ok(())
}
