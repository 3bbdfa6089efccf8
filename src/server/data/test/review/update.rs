use super::*;

/// Tests editing a review's rating and comment.
///
/// Expected: Ok with new values
#[tokio::test]
async fn updates_rating_and_comment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource, booker, _) = factory::helpers::create_booking_with_dependencies(db).await?;
    let review = factory::review::create_review(db, resource.id, booker.id).await?;

    let updated = ReviewRepository::new(db)
        .update(review.id, content(2, "Projector was broken"))
        .await?;

    assert_eq!(updated.rating, 2);
    assert_eq!(updated.comment, "Projector was broken");

    Ok(())
}

/// Tests editing an unknown review.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_review() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ReviewRepository::new(db).update(8, content(3, "Fine")).await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}
