use super::*;

/// Tests promoting a student to staff.
///
/// Expected: Ok and the stored role changes
#[tokio::test]
async fn changes_role_of_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = as_user(factory::user::create_user_with_role(db, "admin").await?);
    let student = factory::user::create_user(db).await?;

    AdminService::new(db)
        .update_role(&admin, student.id, Role::Staff)
        .await?;

    let stored = UserRepository::new(db).find_by_id(student.id).await?.unwrap();
    assert_eq!(stored.role, Role::Staff);

    Ok(())
}

/// Tests an admin demoting themselves.
///
/// Expected: Err(BadRequest) and role unchanged
#[tokio::test]
async fn cannot_demote_self() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = as_user(factory::user::create_user_with_role(db, "admin").await?);

    let result = AdminService::new(db)
        .update_role(&admin, admin.id, Role::Student)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    let stored = UserRepository::new(db).find_by_id(admin.id).await?.unwrap();
    assert!(stored.is_admin());

    Ok(())
}
