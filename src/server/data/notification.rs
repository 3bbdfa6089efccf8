//! Notification data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::notification::{CreateNotificationParam, Notification};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an unread notification.
    pub async fn create(&self, param: CreateNotificationParam) -> Result<Notification, DbErr> {
        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            title: ActiveValue::Set(param.title),
            message: ActiveValue::Set(param.message),
            read: ActiveValue::Set(false),
            link: ActiveValue::Set(param.link),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// Inserts several notifications in order.
    pub async fn create_many(&self, params: Vec<CreateNotificationParam>) -> Result<(), DbErr> {
        for param in params {
            self.create(param).await?;
        }

        Ok(())
    }

    /// Gets a user's notifications, newest first, optionally capped at `limit`.
    pub async fn get_for_user(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Notification>, DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let entities = query.all(self.db).await?;

        Ok(entities
            .into_iter()
            .map(Notification::from_entity)
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Notification>, DbErr> {
        let entity = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Notification::from_entity))
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .count(self.db)
            .await
    }

    /// Marks every unread notification of a user as read.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications changed
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(
                entity::notification::Column::Read,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn mark_read(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Notification::update_many()
            .col_expr(
                entity::notification::Column::Read,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(entity::notification::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
