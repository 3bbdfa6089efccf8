use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{review::ReviewDto, user::UserDto};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ResourceDto {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub capacity: i32,
    pub availability_rules: Option<String>,
    pub requires_approval: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ResourceStatsDto {
    /// Mean rating rounded to one decimal, absent when unreviewed.
    pub avg_rating: Option<f64>,
    pub review_count: u64,
    pub booking_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ResourceSummaryDto {
    pub resource: ResourceDto,
    pub stats: ResourceStatsDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ResourceDetailDto {
    pub resource: ResourceDto,
    pub owner: UserDto,
    pub images: Vec<String>,
    pub equipment: Vec<String>,
    pub reviews: Vec<ReviewDto>,
    pub stats: ResourceStatsDto,
    pub can_review: bool,
}

/// Body for creating a resource, or fully replacing one on edit.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ResourceInputDto {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub capacity: i32,
    pub availability_rules: Option<String>,
    #[serde(default)]
    pub requires_approval: bool,
    /// Defaults to `draft`.
    pub status: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
pub struct BrowseQueryDto {
    pub search: Option<String>,
    pub category: Option<String>,
    /// `recent` (default), `rating` or `popular`.
    pub sort: Option<String>,
    /// Admin-only filter on lifecycle status.
    pub status: Option<String>,
    /// `mine` lists the caller's own resources in any status.
    pub scope: Option<String>,
}
