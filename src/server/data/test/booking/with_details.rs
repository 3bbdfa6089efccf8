use super::*;

/// Tests attaching resource and holder names to bookings.
///
/// Expected: Details carry the resource title, location, owner and holder name
#[tokio::test]
async fn attaches_resource_and_user_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, resource, booker, _) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let repo = BookingRepository::new(db);
    let bookings = repo.get_by_user(booker.id).await?;

    let details = repo.with_details(bookings).await?;

    assert_eq!(details.len(), 1);
    assert_eq!(details[0].resource_title, resource.title);
    assert_eq!(details[0].resource_location, resource.location);
    assert_eq!(details[0].resource_owner_id, owner.id);
    assert_eq!(details[0].user_name, booker.name);

    Ok(())
}
