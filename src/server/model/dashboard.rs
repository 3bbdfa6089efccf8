use crate::{
    model::dashboard::DashboardDto,
    server::model::{booking::BookingDetail, resource::ResourceSummary},
};

/// Personal landing page data.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Up to five live bookings that have not started yet, soonest first.
    pub upcoming_bookings: Vec<BookingDetail>,
    /// Up to four published resources with the most bookings.
    pub popular_resources: Vec<ResourceSummary>,
    /// Approved bookings that have not started yet.
    pub active_bookings: u64,
    pub resources_available: u64,
    pub pending_bookings: u64,
}

impl Dashboard {
    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            upcoming_bookings: self
                .upcoming_bookings
                .into_iter()
                .map(|b| b.into_dto())
                .collect(),
            popular_resources: self
                .popular_resources
                .into_iter()
                .map(|r| r.into_dto())
                .collect(),
            active_bookings: self.active_bookings,
            resources_available: self.resources_available,
            pending_bookings: self.pending_bookings,
        }
    }
}
