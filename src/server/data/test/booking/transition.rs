use super::*;

/// Tests approving a pending booking.
///
/// Expected: Ok(Some) with status approved
#[tokio::test]
async fn approves_pending_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    let booking = factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .status("pending")
        .build()
        .await?;

    let updated = BookingRepository::new(db)
        .transition(booking.id, BookingStatus::Approved)
        .await?;

    assert_eq!(updated.map(|b| b.status), Some(BookingStatus::Approved));

    Ok(())
}

/// Tests that a transition not permitted from the current status is a no-op.
///
/// Verifies an approved booking cannot be rejected and stays approved.
///
/// Expected: Ok(None)
#[tokio::test]
async fn refuses_transition_from_wrong_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, booking) = factory::helpers::create_booking_with_dependencies(db).await?;
    let repo = BookingRepository::new(db);

    let updated = repo.transition(booking.id, BookingStatus::Rejected).await?;

    assert!(updated.is_none());
    let stored = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);

    Ok(())
}

/// Tests that a second identical transition loses.
///
/// Models two reviewers approving at once: only the first update matches the
/// pending guard.
///
/// Expected: First Ok(Some), second Ok(None)
#[tokio::test]
async fn second_transition_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    let booking = factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .status("pending")
        .build()
        .await?;
    let repo = BookingRepository::new(db);

    let first = repo.transition(booking.id, BookingStatus::Cancelled).await?;
    let second = repo.transition(booking.id, BookingStatus::Approved).await?;

    assert!(first.is_some());
    assert!(second.is_none());

    Ok(())
}

/// Tests transitioning an unknown booking.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let updated = BookingRepository::new(db)
        .transition(404, BookingStatus::Cancelled)
        .await?;

    assert!(updated.is_none());

    Ok(())
}
