use super::*;

/// Tests ranking resources by booking count.
///
/// Expected: Most booked first, unbooked resources last with a count of zero
#[tokio::test]
async fn ranks_by_booking_count() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let booker = factory::user::create_user(db).await?;
    let busy = factory::resource::create_resource(db, owner.id).await?;
    let quiet = factory::resource::create_resource(db, owner.id).await?;
    let unbooked = factory::resource::create_resource(db, owner.id).await?;

    for _ in 0..3 {
        factory::booking::create_booking(db, busy.id, booker.id).await?;
    }
    factory::booking::create_booking(db, quiet.id, booker.id).await?;

    let top = ResourceRepository::new(db).top_by_bookings(5, None).await?;

    assert_eq!(top.len(), 3);
    assert_eq!(top[0].0.id, busy.id);
    assert_eq!(top[0].1, 3);
    assert_eq!(top[1].0.id, quiet.id);
    assert_eq!(top[1].1, 1);
    assert_eq!(top[2].0.id, unbooked.id);
    assert_eq!(top[2].1, 0);

    Ok(())
}

/// Tests restricting the ranking to published resources.
///
/// Expected: Archived resources skipped
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let booker = factory::user::create_user(db).await?;
    let archived = factory::resource::ResourceFactory::new(db, owner.id)
        .status("archived")
        .build()
        .await?;
    factory::booking::create_booking(db, archived.id, booker.id).await?;

    let top = ResourceRepository::new(db)
        .top_by_bookings(5, Some(ResourceStatus::Published))
        .await?;

    assert!(top.is_empty());

    Ok(())
}

/// Tests a site where nothing has been booked yet.
///
/// Expected: Published resources returned in ID order, truncated to the limit
#[tokio::test]
async fn includes_unbooked_resources_up_to_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let first = factory::resource::create_resource(db, owner.id).await?;
    let second = factory::resource::create_resource(db, owner.id).await?;
    factory::resource::create_resource(db, owner.id).await?;
    factory::resource::ResourceFactory::new(db, owner.id)
        .status("draft")
        .build()
        .await?;

    let top = ResourceRepository::new(db)
        .top_by_bookings(2, Some(ResourceStatus::Published))
        .await?;

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].0.id, first.id);
    assert_eq!(top[1].0.id, second.id);
    assert!(top.iter().all(|(_, count)| *count == 0));

    Ok(())
}
