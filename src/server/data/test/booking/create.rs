use super::*;

/// Tests inserting a booking with an explicit initial status.
///
/// Expected: Ok with the requested status, window and notes
#[tokio::test]
async fn creates_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let booker = factory::user::create_user(db).await?;

    let booking = BookingRepository::new(db)
        .create(
            CreateBookingParam {
                resource_id: resource.id,
                user_id: booker.id,
                window: window(at(9, 0), at(10, 30)),
                notes: Some("Study group".to_string()),
                recurrence: Recurrence::Weekly,
            },
            BookingStatus::Pending,
        )
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.start_datetime, at(9, 0));
    assert_eq!(booking.end_datetime, at(10, 30));
    assert_eq!(booking.notes.as_deref(), Some("Study group"));
    assert_eq!(booking.recurrence, Recurrence::Weekly);

    Ok(())
}
