//! Review data repository.
//!
//! One review per (resource, user) pair is enforced by a unique index; eligibility
//! rules live in `ReviewService`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    data::user::UserRepository,
    model::review::{Review, ReviewContent, ReviewWithAuthor},
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a review.
    ///
    /// # Returns
    /// - `Ok(Review)` - The created review
    /// - `Err(DbErr)` - Database error, including a duplicate (resource, user) pair
    pub async fn create(
        &self,
        resource_id: i32,
        user_id: i32,
        content: ReviewContent,
    ) -> Result<Review, DbErr> {
        let entity = entity::review::ActiveModel {
            resource_id: ActiveValue::Set(resource_id),
            user_id: ActiveValue::Set(user_id),
            rating: ActiveValue::Set(content.rating),
            comment: ActiveValue::Set(content.comment),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Review::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Review>, DbErr> {
        let entity = entity::prelude::Review::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Review::from_entity))
    }

    /// Finds the review a user left on a resource, if any.
    pub async fn find_by_resource_and_user(
        &self,
        resource_id: i32,
        user_id: i32,
    ) -> Result<Option<Review>, DbErr> {
        let entity = entity::prelude::Review::find()
            .filter(entity::review::Column::ResourceId.eq(resource_id))
            .filter(entity::review::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Review::from_entity))
    }

    /// Gets reviews of a resource with author names, newest first.
    pub async fn get_by_resource(&self, resource_id: i32) -> Result<Vec<ReviewWithAuthor>, DbErr> {
        let entities = entity::prelude::Review::find()
            .filter(entity::review::Column::ResourceId.eq(resource_id))
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .all(self.db)
            .await?;

        self.with_authors(entities.into_iter().map(Review::from_entity).collect())
            .await
    }

    /// Gets every review with author names, newest first.
    pub async fn get_all(&self) -> Result<Vec<ReviewWithAuthor>, DbErr> {
        let entities = entity::prelude::Review::find()
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .all(self.db)
            .await?;

        self.with_authors(entities.into_iter().map(Review::from_entity).collect())
            .await
    }

    /// Replaces the rating and comment of an existing review.
    ///
    /// # Returns
    /// - `Ok(Review)` - The updated review
    /// - `Err(DbErr::RecordNotFound)` - No review with that ID
    pub async fn update(&self, id: i32, content: ReviewContent) -> Result<Review, DbErr> {
        let entity = entity::prelude::Review::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Review with id {} not found", id)))?;

        let mut active_model: entity::review::ActiveModel = entity.into();
        active_model.rating = ActiveValue::Set(content.rating);
        active_model.comment = ActiveValue::Set(content.comment);

        let entity = active_model.update(self.db).await?;

        Ok(Review::from_entity(entity))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Review::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    async fn with_authors(&self, reviews: Vec<Review>) -> Result<Vec<ReviewWithAuthor>, DbErr> {
        let users = UserRepository::new(self.db)
            .find_by_ids(reviews.iter().map(|r| r.user_id).collect())
            .await?;

        Ok(reviews
            .into_iter()
            .map(|review| {
                let author_name = users
                    .get(&review.user_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default();
                ReviewWithAuthor {
                    review,
                    author_name,
                }
            })
            .collect())
    }
}
