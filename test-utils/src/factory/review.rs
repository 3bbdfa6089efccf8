//! Review factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ReviewFactory<'a> {
    db: &'a DatabaseConnection,
    resource_id: i32,
    user_id: i32,
    rating: i32,
    comment: String,
}

impl<'a> ReviewFactory<'a> {
    /// Defaults to a 5-star rating with a short comment.
    pub fn new(db: &'a DatabaseConnection, resource_id: i32, user_id: i32) -> Self {
        Self {
            db,
            resource_id,
            user_id,
            rating: 5,
            comment: "Great space".to_string(),
        }
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub async fn build(self) -> Result<entity::review::Model, DbErr> {
        entity::review::ActiveModel {
            resource_id: ActiveValue::Set(self.resource_id),
            user_id: ActiveValue::Set(self.user_id),
            rating: ActiveValue::Set(self.rating),
            comment: ActiveValue::Set(self.comment),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_review(
    db: &DatabaseConnection,
    resource_id: i32,
    user_id: i32,
) -> Result<entity::review::Model, DbErr> {
    ReviewFactory::new(db, resource_id, user_id).build().await
}
