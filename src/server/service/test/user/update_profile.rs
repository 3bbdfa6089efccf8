use super::*;

/// Tests updating name and department only.
///
/// Expected: Ok with changed fields, email untouched
#[tokio::test]
async fn updates_supplied_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let updated = UserService::new(db)
        .update_profile(
            user.id,
            UpdateProfileParam {
                name: Some("Grace".to_string()),
                department: Some("Mathematics".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "Grace");
    assert_eq!(updated.department.as_deref(), Some("Mathematics"));
    assert_eq!(updated.email, user.email);

    Ok(())
}

/// Tests keeping one's own email.
///
/// Expected: Ok, the user's current email does not count as taken
#[tokio::test]
async fn own_email_is_not_taken() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let updated = UserService::new(db)
        .update_profile(
            user.id,
            UpdateProfileParam {
                email: Some(user.email.clone()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.email, user.email);

    Ok(())
}

/// Tests switching to another account's email.
///
/// Expected: Err(EmailTaken)
#[tokio::test]
async fn rejects_email_of_other_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;

    let result = UserService::new(db)
        .update_profile(
            user.id,
            UpdateProfileParam {
                email: Some(other.email),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::EmailTaken))));

    Ok(())
}
