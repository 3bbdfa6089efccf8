//! Review domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::review::{ReviewDto, ReviewInputDto},
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model) -> Self {
        Self {
            id: entity.id,
            resource_id: entity.resource_id,
            user_id: entity.user_id,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author_name: String,
}

impl ReviewWithAuthor {
    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.review.id,
            resource_id: self.review.resource_id,
            user_id: self.review.user_id,
            author_name: self.author_name,
            rating: self.review.rating,
            comment: self.review.comment,
            created_at: self.review.created_at,
        }
    }
}

/// Validated rating and comment.
#[derive(Debug, Clone)]
pub struct ReviewContent {
    pub rating: i32,
    pub comment: String,
}

impl TryFrom<ReviewInputDto> for ReviewContent {
    type Error = AppError;

    fn try_from(dto: ReviewInputDto) -> Result<Self, Self::Error> {
        if !(1..=5).contains(&dto.rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5.".to_string(),
            ));
        }

        let comment = dto.comment.trim().to_string();
        if comment.is_empty() {
            return Err(AppError::BadRequest("Comment is required.".to_string()));
        }

        Ok(Self {
            rating: dto.rating,
            comment,
        })
    }
}
