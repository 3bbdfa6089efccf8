use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::booking::{BookingLocks, BookingService},
};

/// Starts the booking completion scheduler.
///
/// Runs every minute and marks approved bookings whose end time has passed as completed.
/// The sweep is idempotent, so an overlapping run from a read path is harmless.
///
/// # Arguments
/// - `db`: Database connection
/// - `locks`: Booking locks shared with request handlers
pub async fn start_scheduler(db: DatabaseConnection, locks: BookingLocks) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let locks = locks.clone();

        Box::pin(async move {
            if let Err(e) = BookingService::new(&db, &locks).complete_past(Utc::now()).await {
                tracing::error!("Error completing past bookings: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Booking completion scheduler started");

    Ok(())
}
