use super::as_user;
use crate::server::{
    error::{booking::BookingError, AppError},
    model::booking::{BookingStatus, BookingWindow, CreateBookingParam, Recurrence},
    service::booking::{BookingLocks, BookingService},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod cancel;
mod check_conflict;
mod create;
mod reject;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2035, 3, 14, hour, minute, 0).unwrap()
}

fn request(
    resource_id: i32,
    user_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> CreateBookingParam {
    CreateBookingParam {
        resource_id,
        user_id,
        window: BookingWindow::new(start, end).unwrap(),
        notes: None,
        recurrence: Recurrence::None,
    }
}

/// Notification kinds addressed to a user, oldest first.
async fn kinds_for(db: &sea_orm::DatabaseConnection, user_id: i32) -> Vec<String> {
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

    entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(user_id))
        .order_by_asc(entity::notification::Column::Id)
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.kind)
        .collect()
}
