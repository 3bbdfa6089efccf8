use super::*;

/// Tests booking a resource that needs no approval.
///
/// Expected: Ok with approved status, confirmation sent to requester and owner
#[tokio::test]
async fn books_instantly_when_no_approval_needed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = as_user(factory::user::create_user(db).await?);

    let booking = BookingService::new(db, &locks)
        .create(&student, request(resource.id, student.id, at(9, 0), at(10, 0)))
        .await?;

    assert_eq!(booking.status, BookingStatus::Approved);
    assert_eq!(kinds_for(db, student.id).await, vec!["booking_confirmed"]);
    assert_eq!(kinds_for(db, owner.id).await, vec!["booking_confirmed"]);

    Ok(())
}

/// Tests booking a resource that requires approval.
///
/// Expected: Ok with pending status, pending notices to both parties
#[tokio::test]
async fn books_as_pending_when_approval_required() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let resource = factory::resource::ResourceFactory::new(db, owner.id)
        .requires_approval(true)
        .build()
        .await?;
    let student = as_user(factory::user::create_user(db).await?);

    let booking = BookingService::new(db, &locks)
        .create(&student, request(resource.id, student.id, at(9, 0), at(10, 0)))
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(kinds_for(db, student.id).await, vec!["booking_pending"]);
    assert_eq!(kinds_for(db, owner.id).await, vec!["booking_pending"]);

    Ok(())
}

/// Tests that an overlapping request for the same resource is refused.
///
/// Expected: Err(ResourceConflict(1)) and nothing written
#[tokio::test]
async fn rejects_resource_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let first = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, resource.id, first.id)
        .window(at(9, 0), at(10, 0))
        .build()
        .await?;
    let second = as_user(factory::user::create_user(db).await?);

    let result = BookingService::new(db, &locks)
        .create(&second, request(resource.id, second.id, at(9, 30), at(10, 30)))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::ResourceConflict(1)))
    ));
    assert_eq!(entity::prelude::Booking::find().count(db).await?, 1);
    assert!(kinds_for(db, second.id).await.is_empty());

    Ok(())
}

/// Tests that back-to-back bookings are allowed.
///
/// Expected: Ok for a booking starting exactly when the previous one ends
#[tokio::test]
async fn allows_adjacent_booking() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let first = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, resource.id, first.id)
        .window(at(9, 0), at(10, 0))
        .build()
        .await?;
    let second = as_user(factory::user::create_user(db).await?);

    let booking = BookingService::new(db, &locks)
        .create(&second, request(resource.id, second.id, at(10, 0), at(11, 0)))
        .await?;

    assert_eq!(booking.start_datetime, at(10, 0));

    Ok(())
}

/// Tests that a user cannot hold two overlapping bookings on different resources.
///
/// Expected: Err(UserConflict(1))
#[tokio::test]
async fn rejects_user_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (owner, room) = factory::helpers::create_resource_with_owner(db).await?;
    let projector = factory::resource::create_resource(db, owner.id).await?;
    let student = as_user(factory::user::create_user(db).await?);
    factory::booking::BookingFactory::new(db, room.id, student.id)
        .window(at(9, 0), at(10, 0))
        .build()
        .await?;

    let result = BookingService::new(db, &locks)
        .create(&student, request(projector.id, student.id, at(9, 45), at(11, 0)))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::UserConflict(1)))
    ));

    Ok(())
}

/// Tests that cancelled and rejected bookings do not block the slot.
///
/// Expected: Ok
#[tokio::test]
async fn ignores_dead_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let other = factory::user::create_user(db).await?;
    for status in ["cancelled", "rejected"] {
        factory::booking::BookingFactory::new(db, resource.id, other.id)
            .window(at(9, 0), at(10, 0))
            .status(status)
            .build()
            .await?;
    }
    let student = as_user(factory::user::create_user(db).await?);

    let result = BookingService::new(db, &locks)
        .create(&student, request(resource.id, student.id, at(9, 0), at(10, 0)))
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests booking a draft resource.
///
/// Expected: Err(ResourceUnavailable)
#[tokio::test]
async fn rejects_unpublished_resource() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let draft = factory::resource::ResourceFactory::new(db, owner.id)
        .status("draft")
        .build()
        .await?;
    let student = as_user(factory::user::create_user(db).await?);

    let result = BookingService::new(db, &locks)
        .create(&student, request(draft.id, student.id, at(9, 0), at(10, 0)))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::ResourceUnavailable))
    ));

    Ok(())
}

/// Tests booking a window that has already started.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_past_start() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = as_user(factory::user::create_user(db).await?);
    let start = Utc::now() - Duration::hours(1);

    let result = BookingService::new(db, &locks)
        .create(
            &student,
            request(resource.id, student.id, start, start + Duration::hours(2)),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests booking a resource that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_missing_resource() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let student = as_user(factory::user::create_user(db).await?);

    let result = BookingService::new(db, &locks)
        .create(&student, request(999, student.id, at(9, 0), at(10, 0)))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests two simultaneous requests for the same slot.
///
/// Expected: exactly one succeeds, the other gets ResourceConflict
#[tokio::test]
async fn concurrent_requests_for_same_slot_admit_one() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let alice = as_user(factory::user::create_user(db).await?);
    let bob = as_user(factory::user::create_user(db).await?);
    let service = BookingService::new(db, &locks);

    let (a, b) = tokio::join!(
        service.create(&alice, request(resource.id, alice.id, at(9, 0), at(10, 0))),
        service.create(&bob, request(resource.id, bob.id, at(9, 30), at(10, 30))),
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(AppError::BookingErr(BookingError::ResourceConflict(1)))
    )));
    assert_eq!(entity::prelude::Booking::find().count(db).await?, 1);

    Ok(())
}
