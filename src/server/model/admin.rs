use crate::{
    model::admin::{AdminStatsDto, CategoryCountDto, TopResourceDto},
    server::model::{booking::BookingDetail, resource::Resource},
};

/// Site-wide figures for the admin dashboard.
#[derive(Debug, Clone)]
pub struct AdminStats {
    pub total_users: u64,
    pub active_resources: u64,
    pub pending_bookings: u64,
    pub total_bookings: u64,
    /// Resource count per category, every category listed.
    pub categories: Vec<(String, u64)>,
    pub recent_bookings: Vec<BookingDetail>,
    pub top_resources: Vec<(Resource, u64)>,
}

impl AdminStats {
    pub fn into_dto(self) -> AdminStatsDto {
        AdminStatsDto {
            total_users: self.total_users,
            active_resources: self.active_resources,
            pending_bookings: self.pending_bookings,
            total_bookings: self.total_bookings,
            categories: self
                .categories
                .into_iter()
                .map(|(category, count)| CategoryCountDto { category, count })
                .collect(),
            recent_bookings: self
                .recent_bookings
                .into_iter()
                .map(|b| b.into_dto())
                .collect(),
            top_resources: self
                .top_resources
                .into_iter()
                .map(|(resource, booking_count)| TopResourceDto {
                    resource: resource.into_dto(),
                    booking_count,
                })
                .collect(),
        }
    }
}
