//! Review service enforcing the completed-booking eligibility gate.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::server::{
    data::{
        booking::BookingRepository, notification::NotificationRepository,
        resource::ResourceRepository, review::ReviewRepository,
    },
    error::{auth::AuthError, booking::BookingError, AppError},
    model::{
        notification::{CreateNotificationParam, NotificationKind},
        review::{Review, ReviewContent, ReviewWithAuthor},
        user::User,
    },
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether the user may review the resource now.
    ///
    /// Requires a completed booking (or an approved one that has ended) and no
    /// existing review by the user.
    pub async fn can_review(
        &self,
        user_id: i32,
        resource_id: i32,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let eligible = BookingRepository::new(self.db)
            .has_completed_booking(user_id, resource_id, now)
            .await?;
        if !eligible {
            return Ok(false);
        }

        let existing = ReviewRepository::new(self.db)
            .find_by_resource_and_user(resource_id, user_id)
            .await?;

        Ok(existing.is_none())
    }

    /// Creates a review and notifies the resource owner.
    ///
    /// # Returns
    /// - `Ok(Review)` - The created review
    /// - `Err(AppError::NotFound)` - Resource does not exist
    /// - `Err(BookingError::NotEligibleForReview)` - No completed booking of the resource
    /// - `Err(BookingError::AlreadyReviewed)` - The user already reviewed the resource
    pub async fn create(
        &self,
        author: &User,
        resource_id: i32,
        content: ReviewContent,
    ) -> Result<Review, AppError> {
        let resource = ResourceRepository::new(self.db)
            .find_by_id(resource_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;

        let eligible = BookingRepository::new(self.db)
            .has_completed_booking(author.id, resource_id, Utc::now())
            .await?;
        if !eligible {
            return Err(BookingError::NotEligibleForReview.into());
        }

        let review_repo = ReviewRepository::new(self.db);
        if review_repo
            .find_by_resource_and_user(resource_id, author.id)
            .await?
            .is_some()
        {
            return Err(BookingError::AlreadyReviewed.into());
        }

        let txn = self.db.begin().await?;
        let rating = content.rating;
        let review = ReviewRepository::new(&txn)
            .create(resource_id, author.id, content)
            .await
            .map_err(already_reviewed_on_unique_violation)?;

        NotificationRepository::new(&txn)
            .create(
                CreateNotificationParam::new(
                    resource.owner_id,
                    NotificationKind::ReviewReceived,
                    "New Review",
                    format!(
                        "{} left a {}-star review for {}.",
                        author.name, rating, resource.title
                    ),
                )
                .link(format!("/resources/{}", resource.id)),
            )
            .await?;

        txn.commit().await?;

        Ok(review)
    }

    /// Replaces the rating and comment of the author's own review.
    pub async fn update(
        &self,
        review_id: i32,
        author: &User,
        content: ReviewContent,
    ) -> Result<Review, AppError> {
        let repo = ReviewRepository::new(self.db);
        let review = repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        if review.user_id != author.id {
            return Err(AuthError::AccessDenied(
                author.id,
                format!("User did not write review {}", review_id),
            )
            .into());
        }

        Ok(repo.update(review_id, content).await?)
    }

    /// Deletes a review; allowed for its author and for admins.
    pub async fn delete(&self, review_id: i32, actor: &User) -> Result<(), AppError> {
        let repo = ReviewRepository::new(self.db);
        let review = repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        if review.user_id != actor.id && !actor.is_admin() {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User cannot delete review {}", review_id),
            )
            .into());
        }

        repo.delete(review_id).await?;

        Ok(())
    }

    /// Every review with author names, newest first.
    pub async fn list_all(&self) -> Result<Vec<ReviewWithAuthor>, AppError> {
        Ok(ReviewRepository::new(self.db).get_all().await?)
    }
}

/// Maps a lost race on the `(resource_id, user_id)` unique index to `AlreadyReviewed`.
fn already_reviewed_on_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => BookingError::AlreadyReviewed.into(),
        _ => err.into(),
    }
}
