use super::*;

/// Tests a requester writing to a resource owner.
///
/// Expected: Ok, addressed to the owner, owner gets a new_message notification
#[tokio::test]
async fn sends_to_other_participant_and_notifies() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = as_user(factory::user::create_user(db).await?);
    let thread = ThreadId::Resource {
        resource_id: resource.id,
        requester_id: student.id,
    };

    let message = MessageService::new(db)
        .send(thread, &student, "  Is the room free on Friday?  ".to_string())
        .await?;

    assert_eq!(message.receiver_id, owner.id);
    assert_eq!(message.content, "Is the room free on Friday?");
    assert_eq!(message.thread_id, thread.to_string());

    let notices = NotificationRepository::new(db)
        .get_for_user(owner.id, None)
        .await?;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, "new_message");
    assert_eq!(notices[0].link.as_deref(), Some(format!("/messages/{}", thread).as_str()));

    Ok(())
}

/// Tests the owner replying in the same thread.
///
/// Expected: Ok, addressed back to the requester
#[tokio::test]
async fn owner_reply_goes_to_requester() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;
    let thread = ThreadId::Resource {
        resource_id: resource.id,
        requester_id: student.id,
    };

    let reply = MessageService::new(db)
        .send(thread, &as_user(owner), "Yes it is".to_string())
        .await?;

    assert_eq!(reply.receiver_id, student.id);

    Ok(())
}

/// Tests sending an empty message.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_blank_content() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = as_user(factory::user::create_user(db).await?);
    let thread = ThreadId::Resource {
        resource_id: resource.id,
        requester_id: student.id,
    };

    let result = MessageService::new(db)
        .send(thread, &student, "   ".to_string())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a third user posting into someone else's thread.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn outsider_cannot_send() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;
    let outsider = as_user(factory::user::create_user(db).await?);
    let thread = ThreadId::Resource {
        resource_id: resource.id,
        requester_id: student.id,
    };

    let result = MessageService::new(db)
        .send(thread, &outsider, "Hi".to_string())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
