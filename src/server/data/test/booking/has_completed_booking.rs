use super::*;

/// Tests that an approved booking in the past qualifies before the sweep runs.
///
/// Expected: Ok(true)
#[tokio::test]
async fn counts_ended_approved_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;
    let now = Utc::now();
    factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .window(now - Duration::days(2), now - Duration::days(2) + Duration::hours(1))
        .build()
        .await?;

    let eligible = BookingRepository::new(db)
        .has_completed_booking(booker.id, resource.id, now)
        .await?;

    assert!(eligible);

    Ok(())
}

/// Tests that future, cancelled and other users' bookings do not qualify.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_unfinished_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource, booker, _) = factory::helpers::create_booking_with_dependencies(db).await?;
    let now = Utc::now();
    factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .window(now - Duration::days(1), now - Duration::days(1) + Duration::hours(1))
        .status("cancelled")
        .build()
        .await?;
    let stranger = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, resource.id, stranger.id)
        .window(now - Duration::days(3), now - Duration::days(3) + Duration::hours(1))
        .status("completed")
        .build()
        .await?;

    let eligible = BookingRepository::new(db)
        .has_completed_booking(booker.id, resource.id, now)
        .await?;

    assert!(!eligible);

    Ok(())
}
