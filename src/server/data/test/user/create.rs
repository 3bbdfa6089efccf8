use super::*;

/// Tests creating a user account.
///
/// Verifies that the repository stores the account with a lowercased email and the
/// requested role.
///
/// Expected: Ok with the created user
#[tokio::test]
async fn creates_user_with_lowercased_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            email: "Ada.Lovelace@Campus.EDU".to_string(),
            password_hash: "hash".to_string(),
            name: "Ada".to_string(),
            role: Role::Staff,
            department: Some("Mathematics".to_string()),
        })
        .await?;

    assert_eq!(user.email, "ada.lovelace@campus.edu");
    assert_eq!(user.role, Role::Staff);
    assert_eq!(user.department.as_deref(), Some("Mathematics"));

    let found = repo.find_by_id(user.id).await?;
    assert_eq!(found, Some(user));

    Ok(())
}

/// Tests the unique email constraint.
///
/// Expected: Err on the second insert with the same email
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let param = CreateUserParam {
        email: "same@campus.edu".to_string(),
        password_hash: "hash".to_string(),
        name: "First".to_string(),
        role: Role::Student,
        department: None,
    };
    repo.create(param.clone()).await?;

    let result = repo.create(param).await;

    assert!(result.is_err());

    Ok(())
}
