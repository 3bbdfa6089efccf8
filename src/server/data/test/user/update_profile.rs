use super::*;

/// Tests editing profile fields.
///
/// Expected: Ok with the updated user
#[tokio::test]
async fn updates_profile_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update_profile(
            user.id,
            UpdateProfileParam {
                name: Some("Renamed".to_string()),
                email: Some("renamed@campus.edu".to_string()),
                department: Some("Physics".to_string()),
                profile_image: Some("https://img.example/me.png".to_string()),
            },
        )
        .await?;

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "renamed@campus.edu");
    assert_eq!(updated.department.as_deref(), Some("Physics"));
    assert_eq!(
        updated.profile_image.as_deref(),
        Some("https://img.example/me.png")
    );

    Ok(())
}

/// Tests that omitted fields are left unchanged.
///
/// Expected: Ok with only the name changed
#[tokio::test]
async fn keeps_omitted_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .department("History")
        .build()
        .await?;

    let updated = UserRepository::new(db)
        .update_profile(
            user.id,
            UpdateProfileParam {
                name: Some("Only Name".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "Only Name");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.department.as_deref(), Some("History"));

    Ok(())
}

/// Tests editing a profile that does not exist.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update_profile(
            42,
            UpdateProfileParam {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}
