use super::*;

/// Tests detecting an overlapping live booking on the same resource.
///
/// Expected: The overlapping booking is reported
#[tokio::test]
async fn finds_overlapping_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    let existing = factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .window(at(10, 0), at(11, 0))
        .build()
        .await?;

    let conflicts = BookingRepository::new(db)
        .find_resource_conflicts(resource.id, &window(at(10, 30), at(11, 30)), None)
        .await?;

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id, existing.id);

    Ok(())
}

/// Tests that back-to-back bookings do not conflict.
///
/// Expected: No conflicts on either side of the existing interval
#[tokio::test]
async fn adjacent_windows_do_not_conflict() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .window(at(10, 0), at(11, 0))
        .build()
        .await?;
    let repo = BookingRepository::new(db);

    let after = repo
        .find_resource_conflicts(resource.id, &window(at(11, 0), at(12, 0)), None)
        .await?;
    let before = repo
        .find_resource_conflicts(resource.id, &window(at(9, 0), at(10, 0)), None)
        .await?;

    assert!(after.is_empty());
    assert!(before.is_empty());

    Ok(())
}

/// Tests that rejected, cancelled and completed bookings free their slot.
///
/// Expected: No conflicts
#[tokio::test]
async fn ignores_bookings_that_are_not_live() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    for status in ["rejected", "cancelled", "completed"] {
        factory::booking::BookingFactory::new(db, resource.id, booker.id)
            .window(at(10, 0), at(11, 0))
            .status(status)
            .build()
            .await?;
    }

    let conflicts = BookingRepository::new(db)
        .find_resource_conflicts(resource.id, &window(at(10, 0), at(11, 0)), None)
        .await?;

    assert!(conflicts.is_empty());

    Ok(())
}

/// Tests excluding the booking being re-checked, as done on approval.
///
/// Expected: Pending booking does not conflict with itself
#[tokio::test]
async fn excludes_given_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    let pending = factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .window(at(10, 0), at(11, 0))
        .status("pending")
        .build()
        .await?;

    let conflicts = BookingRepository::new(db)
        .find_resource_conflicts(resource.id, &window(at(10, 0), at(11, 0)), Some(pending.id))
        .await?;

    assert!(conflicts.is_empty());

    Ok(())
}

/// Tests that bookings on other resources are not resource conflicts.
///
/// Expected: No conflicts
#[tokio::test]
async fn ignores_other_resources() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let other = factory::resource::create_resource(db, owner.id).await?;
    let booker = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, other.id, booker.id)
        .window(at(10, 0), at(11, 0))
        .build()
        .await?;

    let conflicts = BookingRepository::new(db)
        .find_resource_conflicts(resource.id, &window(at(10, 0), at(11, 0)), None)
        .await?;

    assert!(conflicts.is_empty());

    Ok(())
}
