use super::*;

/// Tests resolving a booking thread to holder and owner.
///
/// Expected: Ok with both users, nobody else
#[tokio::test]
async fn booking_thread_is_between_holder_and_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, _, booker, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let stranger = factory::user::create_user(db).await?;

    let participants = MessageService::new(db)
        .participants(ThreadId::Booking {
            booking_id: booking.id,
        })
        .await?;

    assert!(participants.contains(owner.id));
    assert!(participants.contains(booker.id));
    assert!(!participants.contains(stranger.id));
    assert_eq!(participants.other(booker.id), owner.id);

    Ok(())
}

/// Tests a thread id naming a booking that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_booking_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = MessageService::new(db)
        .participants(ThreadId::Booking { booking_id: 9 })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
