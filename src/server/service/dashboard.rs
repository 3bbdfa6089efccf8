//! Personal dashboard.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{booking::BookingRepository, resource::ResourceRepository},
    error::AppError,
    model::{
        booking::BookingStatus,
        dashboard::Dashboard,
        resource::{ResourceStatus, ResourceSummary},
    },
};

const UPCOMING_LIMIT: u64 = 5;
const POPULAR_LIMIT: usize = 4;

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, user_id: i32) -> Result<Dashboard, AppError> {
        let now = Utc::now();
        let bookings = BookingRepository::new(self.db);
        let resources = ResourceRepository::new(self.db);

        let upcoming = bookings
            .get_upcoming_for_user(user_id, now, UPCOMING_LIMIT)
            .await?;
        let upcoming_bookings = bookings.with_details(upcoming).await?;

        let top = resources
            .top_by_bookings(POPULAR_LIMIT, Some(ResourceStatus::Published))
            .await?;
        let ids: Vec<i32> = top.iter().map(|(r, _)| r.id).collect();
        let mut stats = resources.get_stats(&ids).await?;
        let popular_resources = top
            .into_iter()
            .map(|(resource, _)| ResourceSummary {
                stats: stats.remove(&resource.id).unwrap_or_default(),
                resource,
            })
            .collect();

        Ok(Dashboard {
            upcoming_bookings,
            popular_resources,
            active_bookings: bookings
                .count(Some(user_id), Some(BookingStatus::Approved), Some(now))
                .await?,
            resources_available: resources
                .count_by_status(ResourceStatus::Published)
                .await?,
            pending_bookings: bookings
                .count(Some(user_id), Some(BookingStatus::Pending), None)
                .await?,
        })
    }
}
