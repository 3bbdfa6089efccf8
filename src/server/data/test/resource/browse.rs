use super::*;

/// Tests that browsing filters by status.
///
/// Expected: Only published resources returned
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_resource_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let published = factory::resource::create_resource(db, owner.id).await?;
    factory::resource::ResourceFactory::new(db, owner.id)
        .status("draft")
        .build()
        .await?;
    factory::resource::ResourceFactory::new(db, owner.id)
        .status("archived")
        .build()
        .await?;

    let resources = ResourceRepository::new(db)
        .browse(&BrowseResourcesParam {
            statuses: vec![ResourceStatus::Published],
            ..Default::default()
        })
        .await?;

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].id, published.id);

    Ok(())
}

/// Tests case-insensitive search over title, description and location.
///
/// Expected: Resources matching in any of the three fields
#[tokio::test]
async fn searches_title_description_and_location() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_resource_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let by_title = factory::resource::ResourceFactory::new(db, owner.id)
        .title("Oscilloscope Bench")
        .build()
        .await?;
    let by_location = factory::resource::ResourceFactory::new(db, owner.id)
        .location("Engineering Building, oscilloscope lab")
        .build()
        .await?;
    factory::resource::ResourceFactory::new(db, owner.id)
        .title("Piano Room")
        .location("Music Hall")
        .build()
        .await?;

    let resources = ResourceRepository::new(db)
        .browse(&BrowseResourcesParam {
            search: Some("OSCILLOSCOPE".to_string()),
            ..Default::default()
        })
        .await?;

    let ids: Vec<i32> = resources.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&by_title.id));
    assert!(ids.contains(&by_location.id));

    Ok(())
}

/// Tests filtering by category and owner together.
///
/// Expected: Only the owner's resource in that category
#[tokio::test]
async fn filters_by_category_and_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_resource_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user_with_role(db, "staff").await?;
    let other = factory::user::create_user_with_role(db, "staff").await?;
    let target = factory::resource::ResourceFactory::new(db, owner.id)
        .category("lab-equipment")
        .build()
        .await?;
    factory::resource::create_resource(db, owner.id).await?;
    factory::resource::ResourceFactory::new(db, other.id)
        .category("lab-equipment")
        .build()
        .await?;

    let resources = ResourceRepository::new(db)
        .browse(&BrowseResourcesParam {
            category: Some(ResourceCategory::LabEquipment),
            owner_id: Some(owner.id),
            ..Default::default()
        })
        .await?;

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].id, target.id);

    Ok(())
}
