use super::*;

/// Tests the holder cancelling an approved booking.
///
/// Expected: Ok with cancelled status, holder and owner both notified
#[tokio::test]
async fn cancels_and_notifies_both_parties() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (owner, _, booker, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;

    let cancelled = BookingService::new(db, &locks)
        .cancel(booking.id, &as_user(booker.clone()))
        .await?;

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(kinds_for(db, booker.id).await, vec!["booking_cancelled"]);
    assert_eq!(kinds_for(db, owner.id).await, vec!["booking_cancelled"]);

    Ok(())
}

/// Tests that a cancelled slot can be booked again.
///
/// Expected: Ok for a new booking over the cancelled window
#[tokio::test]
async fn cancelled_slot_is_free_again() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();
    let service = BookingService::new(db, &locks);

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let first = as_user(factory::user::create_user(db).await?);
    let second = as_user(factory::user::create_user(db).await?);

    let booking = service
        .create(&first, request(resource.id, first.id, at(14, 0), at(15, 0)))
        .await?;
    service.cancel(booking.id, &first).await?;

    let rebooked = service
        .create(&second, request(resource.id, second.id, at(14, 0), at(15, 0)))
        .await?;

    assert_eq!(rebooked.status, BookingStatus::Approved);

    Ok(())
}

/// Tests cancelling a completed booking.
///
/// Expected: Err(InvalidTransition)
#[tokio::test]
async fn cannot_cancel_completed_booking() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;
    let booking = factory::booking::BookingFactory::new(db, resource.id, student.id)
        .status("completed")
        .build()
        .await?;

    let result = BookingService::new(db, &locks)
        .cancel(booking.id, &as_user(student))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::InvalidTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Cancelled,
        }))
    ));

    Ok(())
}
