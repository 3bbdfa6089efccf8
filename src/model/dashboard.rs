use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{booking::BookingDetailDto, resource::ResourceSummaryDto};

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct DashboardDto {
    pub upcoming_bookings: Vec<BookingDetailDto>,
    pub popular_resources: Vec<ResourceSummaryDto>,
    pub active_bookings: u64,
    pub resources_available: u64,
    pub pending_bookings: u64,
}
