//! Booking data repository for database operations.
//!
//! This module provides the `BookingRepository`, which owns the interval-overlap queries
//! used for conflict detection, compare-and-set status transitions, the completion sweep
//! and the listing queries behind booking pages and dashboards.
//!
//! Overlap is the half-open test `existing.start < proposed.end AND existing.end > proposed.start`
//! restricted to live (`pending`/`approved`) bookings, so back-to-back bookings never conflict.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::server::{
    data::{resource::ResourceRepository, user::UserRepository},
    model::booking::{Booking, BookingDetail, BookingStatus, BookingWindow, CreateBookingParam},
};

/// Repository providing database operations for bookings.
pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    /// Creates a new BookingRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a booking with the given initial status.
    ///
    /// Does not check for conflicts; `BookingService` runs the checks in the same
    /// transaction before calling this.
    ///
    /// # Returns
    /// - `Ok(Booking)` - The created booking with generated ID
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        param: CreateBookingParam,
        status: BookingStatus,
    ) -> Result<Booking, DbErr> {
        let now = Utc::now();
        let entity = entity::booking::ActiveModel {
            resource_id: ActiveValue::Set(param.resource_id),
            user_id: ActiveValue::Set(param.user_id),
            start_datetime: ActiveValue::Set(param.window.start),
            end_datetime: ActiveValue::Set(param.window.end),
            status: ActiveValue::Set(status.as_str().to_string()),
            notes: ActiveValue::Set(param.notes),
            recurrence: ActiveValue::Set(param.recurrence.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Booking::from_entity(entity))
    }

    /// Finds a booking by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Booking))` - Booking found
    /// - `Ok(None)` - No booking with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, DbErr> {
        let entity = entity::prelude::Booking::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Booking::from_entity))
    }

    /// Live bookings overlapping `window` with an optional booking excluded.
    fn overlapping(window: &BookingWindow, exclude: Option<i32>) -> Select<entity::booking::Entity> {
        let live: Vec<&str> = BookingStatus::LIVE.iter().map(|s| s.as_str()).collect();
        let mut query = entity::prelude::Booking::find()
            .filter(entity::booking::Column::Status.is_in(live))
            .filter(entity::booking::Column::StartDatetime.lt(window.end))
            .filter(entity::booking::Column::EndDatetime.gt(window.start));

        if let Some(id) = exclude {
            query = query.filter(entity::booking::Column::Id.ne(id));
        }

        query.order_by_asc(entity::booking::Column::StartDatetime)
    }

    /// Finds live bookings on a resource that overlap the proposed window.
    ///
    /// # Arguments
    /// - `resource_id` - Resource being booked
    /// - `window` - Proposed half-open interval
    /// - `exclude` - Booking to ignore, used when re-checking an existing booking
    ///
    /// # Returns
    /// - `Ok(Vec<Booking>)` - Conflicting bookings, empty when the slot is free
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_resource_conflicts(
        &self,
        resource_id: i32,
        window: &BookingWindow,
        exclude: Option<i32>,
    ) -> Result<Vec<Booking>, DbErr> {
        let entities = Self::overlapping(window, exclude)
            .filter(entity::booking::Column::ResourceId.eq(resource_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Finds the user's live bookings on any resource that overlap the proposed window.
    pub async fn find_user_conflicts(
        &self,
        user_id: i32,
        window: &BookingWindow,
        exclude: Option<i32>,
    ) -> Result<Vec<Booking>, DbErr> {
        let entities = Self::overlapping(window, exclude)
            .filter(entity::booking::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Moves a booking to `to` if its current status permits the transition.
    ///
    /// The status guard is part of the UPDATE's WHERE clause, so a concurrent transition
    /// that got there first makes this one a no-op instead of overwriting it.
    ///
    /// # Returns
    /// - `Ok(Some(Booking))` - Transition applied, returns the updated booking
    /// - `Ok(None)` - Booking missing or not in a status that allows the transition
    /// - `Err(DbErr)` - Database error during update
    pub async fn transition(&self, id: i32, to: BookingStatus) -> Result<Option<Booking>, DbErr> {
        let sources: Vec<&str> = BookingStatus::sources_for(to)
            .iter()
            .map(|s| s.as_str())
            .collect();

        let result = entity::prelude::Booking::update_many()
            .col_expr(entity::booking::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::Status.is_in(sources))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Marks every approved booking that ended before `now` as completed.
    ///
    /// Idempotent: a second run with the same `now` changes nothing.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings completed by this call
    /// - `Err(DbErr)` - Database error during update
    pub async fn complete_past(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .col_expr(
                entity::booking::Column::Status,
                Expr::value(BookingStatus::Completed.as_str()),
            )
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(now))
            .filter(entity::booking::Column::Status.eq(BookingStatus::Approved.as_str()))
            .filter(entity::booking::Column::EndDatetime.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets a user's bookings, latest start first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Booking>, DbErr> {
        let entities = entity::prelude::Booking::find()
            .filter(entity::booking::Column::UserId.eq(user_id))
            .order_by_desc(entity::booking::Column::StartDatetime)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Gets bookings on resources owned by `owner_id`, latest start first.
    pub async fn get_by_resource_owner(&self, owner_id: i32) -> Result<Vec<Booking>, DbErr> {
        let entities = entity::prelude::Booking::find()
            .inner_join(entity::prelude::Resource)
            .filter(entity::resource::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::booking::Column::StartDatetime)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Gets all pending bookings, oldest request first.
    pub async fn get_pending(&self) -> Result<Vec<Booking>, DbErr> {
        let entities = entity::prelude::Booking::find()
            .filter(entity::booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .order_by_asc(entity::booking::Column::CreatedAt)
            .order_by_asc(entity::booking::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Gets the most recently created bookings.
    pub async fn get_recent(&self, limit: u64) -> Result<Vec<Booking>, DbErr> {
        let entities = entity::prelude::Booking::find()
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Gets a user's live bookings starting after `now`, soonest first.
    pub async fn get_upcoming_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Booking>, DbErr> {
        let live: Vec<&str> = BookingStatus::LIVE.iter().map(|s| s.as_str()).collect();
        let entities = entity::prelude::Booking::find()
            .filter(entity::booking::Column::UserId.eq(user_id))
            .filter(entity::booking::Column::Status.is_in(live))
            .filter(entity::booking::Column::StartDatetime.gt(now))
            .order_by_asc(entity::booking::Column::StartDatetime)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Booking::from_entity).collect())
    }

    /// Counts bookings, optionally filtered by holder, status and a minimum start.
    pub async fn count(
        &self,
        user_id: Option<i32>,
        status: Option<BookingStatus>,
        starting_after: Option<DateTime<Utc>>,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Booking::find();

        if let Some(user_id) = user_id {
            query = query.filter(entity::booking::Column::UserId.eq(user_id));
        }
        if let Some(status) = status {
            query = query.filter(entity::booking::Column::Status.eq(status.as_str()));
        }
        if let Some(after) = starting_after {
            query = query.filter(entity::booking::Column::StartDatetime.gt(after));
        }

        query.count(self.db).await
    }

    /// Whether the user holds a booking of the resource that counts as completed at `now`.
    ///
    /// Approved bookings that already ended qualify even if the completion sweep has not
    /// reclassified them yet.
    pub async fn has_completed_booking(
        &self,
        user_id: i32,
        resource_id: i32,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(entity::booking::Column::UserId.eq(user_id))
            .filter(entity::booking::Column::ResourceId.eq(resource_id))
            .filter(
                Condition::any()
                    .add(entity::booking::Column::Status.eq(BookingStatus::Completed.as_str()))
                    .add(
                        Condition::all()
                            .add(
                                entity::booking::Column::Status
                                    .eq(BookingStatus::Approved.as_str()),
                            )
                            .add(entity::booking::Column::EndDatetime.lt(now)),
                    ),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Attaches resource and holder display fields to bookings, preserving order.
    ///
    /// Bookings whose resource or user has vanished are dropped.
    pub async fn with_details(&self, bookings: Vec<Booking>) -> Result<Vec<BookingDetail>, DbErr> {
        let resource_ids = bookings.iter().map(|b| b.resource_id).collect();
        let user_ids = bookings.iter().map(|b| b.user_id).collect();

        let resources = ResourceRepository::new(self.db)
            .find_by_ids(resource_ids)
            .await?;
        let users = UserRepository::new(self.db).find_by_ids(user_ids).await?;

        Ok(bookings
            .into_iter()
            .filter_map(|booking| {
                let resource = resources.get(&booking.resource_id)?;
                let user = users.get(&booking.user_id)?;
                Some(BookingDetail {
                    resource_title: resource.title.clone(),
                    resource_location: resource.location.clone(),
                    resource_owner_id: resource.owner_id,
                    user_name: user.name.clone(),
                    booking,
                })
            })
            .collect())
    }
}
