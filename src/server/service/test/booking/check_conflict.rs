use super::*;

/// Tests the conflict pre-check for both scopes.
///
/// Expected: resource conflict counted and the caller's own overlapping booking listed
#[tokio::test]
async fn reports_resource_and_user_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (owner, room) = factory::helpers::create_resource_with_owner(db).await?;
    let lab = factory::resource::ResourceFactory::new(db, owner.id)
        .title("Chem Lab")
        .location("Science 2")
        .build()
        .await?;
    let other = factory::user::create_user(db).await?;
    let student = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, room.id, other.id)
        .window(at(9, 0), at(10, 0))
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, lab.id, student.id)
        .window(at(9, 30), at(11, 0))
        .build()
        .await?;

    let report = BookingService::new(db, &locks)
        .check_conflict(
            student.id,
            room.id,
            BookingWindow::new(at(9, 15), at(9, 45)).unwrap(),
        )
        .await?;

    assert!(report.has_resource_conflict());
    assert_eq!(report.resource_conflicts.len(), 1);
    assert!(report.has_user_conflict());
    assert_eq!(report.user_conflicts[0].resource_title, "Chem Lab");
    assert_eq!(report.user_conflicts[0].resource_location, "Science 2");

    Ok(())
}

/// Tests a free slot.
///
/// Expected: no conflicts
#[tokio::test]
async fn free_slot_has_no_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = BookingLocks::new();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;

    let report = BookingService::new(db, &locks)
        .check_conflict(
            student.id,
            resource.id,
            BookingWindow::new(at(9, 0), at(10, 0)).unwrap(),
        )
        .await?;

    assert!(!report.has_conflict());

    Ok(())
}
