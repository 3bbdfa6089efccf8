//! Resource factory for creating bookable resources.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test resources owned by a given user.
pub struct ResourceFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    title: String,
    description: String,
    category: String,
    location: String,
    capacity: i32,
    requires_approval: bool,
    status: String,
}

impl<'a> ResourceFactory<'a> {
    /// Creates a new ResourceFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Room {id}"`
    /// - category: `"study-room"`
    /// - location: `"Library"`
    /// - capacity: `4`
    /// - requires_approval: `false`
    /// - status: `"published"`
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            title: format!("Room {}", id),
            description: "A quiet room for group study".to_string(),
            category: "study-room".to_string(),
            location: "Library".to_string(),
            capacity: 4,
            requires_approval: false,
            status: "published".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn requires_approval(mut self, requires_approval: bool) -> Self {
        self.requires_approval = requires_approval;
        self
    }

    /// Sets the lifecycle status, one of `draft`, `published` or `archived`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::resource::Model, DbErr> {
        let now = Utc::now();
        entity::resource::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            category: ActiveValue::Set(self.category),
            location: ActiveValue::Set(self.location),
            capacity: ActiveValue::Set(self.capacity),
            availability_rules: ActiveValue::Set(None),
            requires_approval: ActiveValue::Set(self.requires_approval),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a published resource with default values.
pub async fn create_resource(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::resource::Model, DbErr> {
    ResourceFactory::new(db, owner_id).build().await
}
