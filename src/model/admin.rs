use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{booking::BookingDetailDto, resource::ResourceDto};

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CategoryCountDto {
    pub category: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TopResourceDto {
    pub resource: ResourceDto,
    pub booking_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AdminStatsDto {
    pub total_users: u64,
    pub active_resources: u64,
    pub pending_bookings: u64,
    pub total_bookings: u64,
    pub categories: Vec<CategoryCountDto>,
    pub recent_bookings: Vec<BookingDetailDto>,
    pub top_resources: Vec<TopResourceDto>,
}
