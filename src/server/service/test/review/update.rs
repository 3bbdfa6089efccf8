use super::*;

/// Tests the author editing their review.
///
/// Expected: Ok with new rating and comment
#[tokio::test]
async fn author_can_edit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let author = factory::user::create_user(db).await?;
    let review = factory::review::create_review(db, resource.id, author.id).await?;

    let updated = ReviewService::new(db)
        .update(review.id, &as_user(author), content(2, "Got noisy"))
        .await?;

    assert_eq!(updated.rating, 2);
    assert_eq!(updated.comment, "Got noisy");

    Ok(())
}

/// Tests someone else, even an admin, editing the review.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn only_author_can_edit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_review_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let author = factory::user::create_user(db).await?;
    let admin = factory::user::create_user_with_role(db, "admin").await?;
    let review = factory::review::create_review(db, resource.id, author.id).await?;

    let result = ReviewService::new(db)
        .update(review.id, &as_user(admin), content(1, "Edited"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
