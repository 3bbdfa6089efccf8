use super::*;

/// Tests registering without an admin code.
///
/// Expected: Ok with a student account
#[tokio::test]
async fn creates_student_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let codes = AdminCodeService::new();

    let user = AuthService::new(db, &codes)
        .register(registration("ada@campus.test", None))
        .await?;

    assert_eq!(user.role, Role::Student);
    assert_eq!(user.email, "ada@campus.test");
    assert_eq!(user.department.as_deref(), Some("Computing"));

    Ok(())
}

/// Tests registering with the generated admin code, then reusing it.
///
/// Expected: first account is admin, second falls back to student
#[tokio::test]
async fn admin_code_is_single_use() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let codes = AdminCodeService::new();
    let code = codes.generate().await;
    let service = AuthService::new(db, &codes);

    let first = service
        .register(registration("first@campus.test", Some(code.clone())))
        .await?;
    let second = service
        .register(registration("second@campus.test", Some(code)))
        .await?;

    assert_eq!(first.role, Role::Admin);
    assert_eq!(second.role, Role::Student);

    Ok(())
}

/// Tests a wrong admin code.
///
/// Expected: Ok with a student account
#[tokio::test]
async fn wrong_admin_code_registers_student() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let codes = AdminCodeService::new();
    codes.generate().await;

    let user = AuthService::new(db, &codes)
        .register(registration("guess@campus.test", Some("guess".to_string())))
        .await?;

    assert_eq!(user.role, Role::Student);

    Ok(())
}

/// Tests registering an email that already exists.
///
/// Expected: Err(EmailTaken)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let codes = AdminCodeService::new();
    factory::user::UserFactory::new(db)
        .email("taken@campus.test")
        .build()
        .await?;

    let result = AuthService::new(db, &codes)
        .register(registration("taken@campus.test", None))
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::EmailTaken))));

    Ok(())
}

/// Tests two registrations for the same email racing each other, both holding the admin code.
///
/// Expected: one account created, the other Err(EmailTaken), and the code only used up
/// by the account that was created
#[tokio::test]
async fn concurrent_duplicate_email_reports_email_taken() -> Result<(), AppError> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let codes = AdminCodeService::new();
    let code = codes.generate().await;
    let service = AuthService::new(db, &codes);

    let (first, second) = tokio::join!(
        service.register(registration("race@campus.test", Some(code.clone()))),
        service.register(registration("race@campus.test", Some(code.clone()))),
    );

    let (winner, loser) = match (first, second) {
        (Ok(user), Err(e)) | (Err(e), Ok(user)) => (user, e),
        (first, second) => panic!("expected one success, got {first:?} and {second:?}"),
    };
    assert!(matches!(loser, AppError::AuthErr(AuthError::EmailTaken)));
    assert!(winner.role == Role::Admin || codes.has_valid_code().await);

    Ok(())
}
