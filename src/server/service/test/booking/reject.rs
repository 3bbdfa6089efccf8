use super::*;

/// Tests rejecting a pending booking.
///
/// Expected: Ok with rejected status and the holder notified
#[tokio::test]
async fn rejects_pending_booking() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;
    let booking = factory::booking::BookingFactory::new(db, resource.id, student.id)
        .status("pending")
        .build()
        .await?;

    let rejected = BookingService::new(db, &locks)
        .reject(booking.id, &as_user(owner))
        .await?;

    assert_eq!(rejected.status, BookingStatus::Rejected);
    assert_eq!(kinds_for(db, student.id).await, vec!["booking_rejected"]);

    Ok(())
}

/// Tests that an approved booking can no longer be rejected.
///
/// Expected: Err(InvalidTransition)
#[tokio::test]
async fn cannot_reject_approved_booking() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (owner, _, _, booking) = factory::helpers::create_booking_with_dependencies(db).await?;

    let result = BookingService::new(db, &locks)
        .reject(booking.id, &as_user(owner))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::InvalidTransition { .. }))
    ));

    Ok(())
}
