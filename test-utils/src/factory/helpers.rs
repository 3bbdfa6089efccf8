//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Monotonically increasing across all factories so generated emails and names never collide.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a staff user and a published resource they own.
///
/// # Returns
/// - `Ok((owner, resource))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_resource_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::resource::Model), DbErr> {
    let owner = crate::factory::user::UserFactory::new(db)
        .role("staff")
        .build()
        .await?;
    let resource = crate::factory::resource::create_resource(db, owner.id).await?;

    Ok((owner, resource))
}

/// Creates an owner, a published resource, a student and an approved booking by that student.
///
/// The booking starts one day from now and lasts one hour.
///
/// # Returns
/// - `Ok((owner, resource, booker, booking))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::resource::Model,
        entity::user::Model,
        entity::booking::Model,
    ),
    DbErr,
> {
    let (owner, resource) = create_resource_with_owner(db).await?;
    let booker = crate::factory::user::create_user(db).await?;
    let booking = crate::factory::booking::create_booking(db, resource.id, booker.id).await?;

    Ok((owner, resource, booker, booking))
}
