//! Resource domain models and parameters.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::resource::{
        BrowseQueryDto, ResourceDetailDto, ResourceDto, ResourceInputDto, ResourceStatsDto, ResourceSummaryDto,
    },
    server::{
        error::AppError,
        model::{review::ReviewWithAuthor, user::User},
    },
};

/// Kind of bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceCategory {
    #[default]
    StudyRoom,
    LabEquipment,
    EventSpace,
    AvEquipment,
    Tutoring,
    Other,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 6] = [
        Self::StudyRoom,
        Self::LabEquipment,
        Self::EventSpace,
        Self::AvEquipment,
        Self::Tutoring,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudyRoom => "study-room",
            Self::LabEquipment => "lab-equipment",
            Self::EventSpace => "event-space",
            Self::AvEquipment => "av-equipment",
            Self::Tutoring => "tutoring",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid category '{}'", s)))
    }
}

/// Publication lifecycle of a resource. Only published resources can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 3] = [Self::Draft, Self::Published, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(AppError::BadRequest(format!("Invalid status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub category: ResourceCategory,
    pub location: String,
    pub capacity: i32,
    pub availability_rules: Option<String>,
    pub requires_approval: bool,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn is_published(&self) -> bool {
        self.status == ResourceStatus::Published
    }

    pub fn into_dto(self) -> ResourceDto {
        ResourceDto {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            category: self.category.to_string(),
            location: self.location,
            capacity: self.capacity,
            availability_rules: self.availability_rules,
            requires_approval: self.requires_approval,
            status: self.status.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn from_entity(entity: entity::resource::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            title: entity.title,
            description: entity.description,
            category: entity.category.parse().unwrap_or(ResourceCategory::Other),
            location: entity.location,
            capacity: entity.capacity,
            availability_rules: entity.availability_rules,
            requires_approval: entity.requires_approval,
            status: entity.status.parse().unwrap_or_default(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Aggregates shown next to a resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceStats {
    /// Mean rating rounded to one decimal place.
    pub avg_rating: Option<f64>,
    pub review_count: u64,
    pub booking_count: u64,
}

impl ResourceStats {
    pub fn into_dto(self) -> ResourceStatsDto {
        ResourceStatsDto {
            avg_rating: self.avg_rating,
            review_count: self.review_count,
            booking_count: self.booking_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSummary {
    pub resource: Resource,
    pub stats: ResourceStats,
}

impl ResourceSummary {
    pub fn into_dto(self) -> ResourceSummaryDto {
        ResourceSummaryDto {
            resource: self.resource.into_dto(),
            stats: self.stats.into_dto(),
        }
    }
}

/// Everything shown on a resource's page.
#[derive(Debug, Clone)]
pub struct ResourceDetail {
    pub resource: Resource,
    pub owner: User,
    pub images: Vec<String>,
    pub equipment: Vec<String>,
    pub reviews: Vec<ReviewWithAuthor>,
    pub stats: ResourceStats,
    /// Whether the viewing user may submit a review now.
    pub can_review: bool,
}

impl ResourceDetail {
    pub fn into_dto(self) -> ResourceDetailDto {
        ResourceDetailDto {
            resource: self.resource.into_dto(),
            owner: self.owner.into_dto(),
            images: self.images,
            equipment: self.equipment,
            reviews: self.reviews.into_iter().map(|r| r.into_dto()).collect(),
            stats: self.stats.into_dto(),
            can_review: self.can_review,
        }
    }
}

/// Validated resource fields shared by create and edit.
#[derive(Debug, Clone)]
pub struct ResourceFields {
    pub title: String,
    pub description: String,
    pub category: ResourceCategory,
    pub location: String,
    pub capacity: i32,
    pub availability_rules: Option<String>,
    pub requires_approval: bool,
    pub status: ResourceStatus,
    pub images: Vec<String>,
    pub equipment: Vec<String>,
}

impl TryFrom<ResourceInputDto> for ResourceFields {
    type Error = AppError;

    /// Validates required text fields, capacity and enumerations.
    ///
    /// Blank image URLs and equipment names are dropped.
    fn try_from(dto: ResourceInputDto) -> Result<Self, Self::Error> {
        let title = dto.title.trim().to_string();
        let description = dto.description.trim().to_string();
        let location = dto.location.trim().to_string();

        if title.is_empty() || description.is_empty() || location.is_empty() {
            return Err(AppError::BadRequest(
                "Title, description, category and location are required.".to_string(),
            ));
        }
        if dto.capacity < 1 {
            return Err(AppError::BadRequest(
                "Capacity must be at least 1.".to_string(),
            ));
        }

        let status = match dto.status.as_deref() {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => ResourceStatus::Draft,
        };

        Ok(Self {
            title,
            description,
            category: dto.category.parse()?,
            location,
            capacity: dto.capacity,
            availability_rules: dto
                .availability_rules
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            requires_approval: dto.requires_approval,
            status,
            images: clean_list(dto.images),
            equipment: clean_list(dto.equipment),
        })
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct CreateResourceParam {
    pub owner_id: i32,
    pub fields: ResourceFields,
}

#[derive(Debug, Clone)]
pub struct UpdateResourceParam {
    pub id: i32,
    pub fields: ResourceFields,
}

/// Ordering applied when browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceSort {
    /// Newest first.
    #[default]
    Recent,
    /// Highest average rating first; unrated last.
    Rating,
    /// Most bookings first.
    Popular,
}

impl FromStr for ResourceSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(Self::Recent),
            "rating" => Ok(Self::Rating),
            "popular" => Ok(Self::Popular),
            other => Err(AppError::BadRequest(format!("Invalid sort '{}'", other))),
        }
    }
}

/// Filters for listing resources.
#[derive(Debug, Clone, Default)]
pub struct BrowseResourcesParam {
    /// Case-insensitive substring over title, description and location.
    pub search: Option<String>,
    pub category: Option<ResourceCategory>,
    /// Statuses to include.
    pub statuses: Vec<ResourceStatus>,
    pub owner_id: Option<i32>,
    pub sort: ResourceSort,
}

/// Browse request as supplied by the caller, before visibility rules apply.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub search: Option<String>,
    pub category: Option<ResourceCategory>,
    pub sort: ResourceSort,
    pub status: Option<ResourceStatus>,
    /// List only the caller's own resources, in any status.
    pub mine: bool,
}

impl TryFrom<BrowseQueryDto> for ResourceQuery {
    type Error = AppError;

    /// Parses enumerations; empty strings count as absent.
    fn try_from(dto: BrowseQueryDto) -> Result<Self, Self::Error> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Ok(Self {
            search: present(dto.search),
            category: present(dto.category).map(|c| c.parse()).transpose()?,
            sort: present(dto.sort)
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or_default(),
            status: present(dto.status).map(|s| s.parse()).transpose()?,
            mine: dto.scope.as_deref() == Some("mine"),
        })
    }
}
