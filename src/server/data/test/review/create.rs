use super::*;

/// Tests creating a review.
///
/// Expected: Ok and findable by (resource, user)
#[tokio::test]
async fn creates_review() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource, booker, _) = factory::helpers::create_booking_with_dependencies(db).await?;
    let repo = ReviewRepository::new(db);

    let review = repo
        .create(resource.id, booker.id, content(4, "Quiet and clean"))
        .await?;

    assert_eq!(review.rating, 4);
    let found = repo.find_by_resource_and_user(resource.id, booker.id).await?;
    assert_eq!(found, Some(review));

    Ok(())
}

/// Tests the one-review-per-user-per-resource index.
///
/// Expected: Err on the second review
#[tokio::test]
async fn rejects_second_review_by_same_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource, booker, _) = factory::helpers::create_booking_with_dependencies(db).await?;
    let repo = ReviewRepository::new(db);
    repo.create(resource.id, booker.id, content(5, "Great"))
        .await?;

    let result = repo
        .create(resource.id, booker.id, content(1, "Changed my mind"))
        .await;

    assert!(result.is_err());

    Ok(())
}
