use super::*;

/// Tests viewing a thread as the receiver.
///
/// Expected: messages in order, other user resolved, incoming messages marked read
#[tokio::test]
async fn returns_messages_and_marks_incoming_read() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;
    let thread = ThreadId::Resource {
        resource_id: resource.id,
        requester_id: student.id,
    };
    let key = thread.to_string();
    factory::message::MessageFactory::new(db, &key, student.id, owner.id)
        .content("Question")
        .build()
        .await?;
    factory::message::MessageFactory::new(db, &key, owner.id, student.id)
        .content("Answer")
        .build()
        .await?;

    let service = MessageService::new(db);
    let view = service.view(thread, owner.id).await?;

    assert_eq!(view.other_user.id, student.id);
    let contents: Vec<&str> = view.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Question", "Answer"]);

    let again = service.view(thread, owner.id).await?;
    let question = &again.messages[0];
    let answer = &again.messages[1];
    assert!(question.read);
    assert!(!answer.read);

    Ok(())
}

/// Tests viewing a thread one is not part of.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn outsider_cannot_view() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, resource) = factory::helpers::create_resource_with_owner(db).await?;
    let student = factory::user::create_user(db).await?;
    let outsider = factory::user::create_user(db).await?;
    let thread = ThreadId::Resource {
        resource_id: resource.id,
        requester_id: student.id,
    };

    let result = MessageService::new(db).view(thread, outsider.id).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
