use super::*;

/// Tests rating and booking aggregates.
///
/// Verifies the average is rounded to one decimal and bookings in every status count.
///
/// Expected: avg 4.3 over 3 reviews, 2 bookings
#[tokio::test]
async fn aggregates_ratings_and_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    for rating in [5, 4, 4] {
        let reviewer = factory::user::create_user(db).await?;
        factory::review::ReviewFactory::new(db, resource.id, reviewer.id)
            .rating(rating)
            .build()
            .await?;
    }
    let booker = factory::user::create_user(db).await?;
    factory::booking::create_booking(db, resource.id, booker.id).await?;
    factory::booking::BookingFactory::new(db, resource.id, booker.id)
        .status("cancelled")
        .build()
        .await?;

    let stats = ResourceRepository::new(db).get_stats(&[resource.id]).await?;

    let entry = &stats[&resource.id];
    assert_eq!(entry.avg_rating, Some(4.3));
    assert_eq!(entry.review_count, 3);
    assert_eq!(entry.booking_count, 2);

    Ok(())
}

/// Tests that resources without activity still get an entry.
///
/// Expected: No average and zero counts
#[tokio::test]
async fn returns_empty_stats_for_quiet_resource() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;

    let stats = ResourceRepository::new(db).get_stats(&[resource.id]).await?;

    let entry = &stats[&resource.id];
    assert_eq!(entry.avg_rating, None);
    assert_eq!(entry.review_count, 0);
    assert_eq!(entry.booking_count, 0);

    Ok(())
}
