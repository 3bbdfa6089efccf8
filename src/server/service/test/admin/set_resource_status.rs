use super::*;

/// Tests archiving a published resource.
///
/// Expected: Ok with the new status and it drops out of the published count
#[tokio::test]
async fn archives_resource() -> Result<(), AppError> {
    let test = TestBuilder::new().with_review_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let service = AdminService::new(db);

    let updated = service
        .set_resource_status(resource.id, ResourceStatus::Archived)
        .await?;

    assert_eq!(updated.status, ResourceStatus::Archived);
    assert_eq!(service.stats().await?.active_resources, 0);
    assert_eq!(service.resources().await?.len(), 1);

    Ok(())
}

/// Tests changing the status of a missing resource.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_resource_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_review_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = AdminService::new(db)
        .set_resource_status(42, ResourceStatus::Published)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
