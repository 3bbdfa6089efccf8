//! Resource data repository for database operations.
//!
//! This module provides the `ResourceRepository` for managing bookable resources together
//! with their image and equipment child rows, plus the aggregate queries backing resource
//! stats, browsing and admin reporting.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::resource::{
    BrowseResourcesParam, CreateResourceParam, Resource, ResourceFields, ResourceStats,
    ResourceStatus, UpdateResourceParam,
};

/// Repository providing database operations for resources.
pub struct ResourceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResourceRepository<'a, C> {
    /// Creates a new ResourceRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a resource along with its images and equipment.
    ///
    /// Callers wanting the child rows written atomically pass a transaction.
    ///
    /// # Returns
    /// - `Ok(Resource)` - The created resource with generated ID
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateResourceParam) -> Result<Resource, DbErr> {
        let now = Utc::now();
        let fields = param.fields;

        let entity = entity::resource::ActiveModel {
            owner_id: ActiveValue::Set(param.owner_id),
            title: ActiveValue::Set(fields.title),
            description: ActiveValue::Set(fields.description),
            category: ActiveValue::Set(fields.category.as_str().to_string()),
            location: ActiveValue::Set(fields.location),
            capacity: ActiveValue::Set(fields.capacity),
            availability_rules: ActiveValue::Set(fields.availability_rules),
            requires_approval: ActiveValue::Set(fields.requires_approval),
            status: ActiveValue::Set(fields.status.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.insert_children(entity.id, fields.images, fields.equipment)
            .await?;

        Ok(Resource::from_entity(entity))
    }

    /// Finds a resource by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Resource))` - Resource found
    /// - `Ok(None)` - No resource with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Resource>, DbErr> {
        let entity = entity::prelude::Resource::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Resource::from_entity))
    }

    /// Loads resources by ID into a map keyed by ID. Unknown IDs are skipped.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<HashMap<i32, Resource>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::Resource::find()
            .filter(entity::resource::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|e| (e.id, Resource::from_entity(e)))
            .collect())
    }

    /// Replaces a resource's fields, images and equipment.
    ///
    /// # Returns
    /// - `Ok(Resource)` - The updated resource
    /// - `Err(DbErr::RecordNotFound)` - No resource exists with the specified ID
    /// - `Err(DbErr)` - Other database error during update
    pub async fn update(&self, param: UpdateResourceParam) -> Result<Resource, DbErr> {
        let resource = entity::prelude::Resource::find_by_id(param.id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Resource with id {} not found",
                param.id
            )))?;

        let ResourceFields {
            title,
            description,
            category,
            location,
            capacity,
            availability_rules,
            requires_approval,
            status,
            images,
            equipment,
        } = param.fields;

        let mut active_model: entity::resource::ActiveModel = resource.into();
        active_model.title = ActiveValue::Set(title);
        active_model.description = ActiveValue::Set(description);
        active_model.category = ActiveValue::Set(category.as_str().to_string());
        active_model.location = ActiveValue::Set(location);
        active_model.capacity = ActiveValue::Set(capacity);
        active_model.availability_rules = ActiveValue::Set(availability_rules);
        active_model.requires_approval = ActiveValue::Set(requires_approval);
        active_model.status = ActiveValue::Set(status.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        entity::prelude::ResourceImage::delete_many()
            .filter(entity::resource_image::Column::ResourceId.eq(param.id))
            .exec(self.db)
            .await?;
        entity::prelude::ResourceEquipment::delete_many()
            .filter(entity::resource_equipment::Column::ResourceId.eq(param.id))
            .exec(self.db)
            .await?;
        self.insert_children(param.id, images, equipment).await?;

        Ok(Resource::from_entity(entity))
    }

    async fn insert_children(
        &self,
        resource_id: i32,
        images: Vec<String>,
        equipment: Vec<String>,
    ) -> Result<(), DbErr> {
        for image_url in images {
            entity::resource_image::ActiveModel {
                resource_id: ActiveValue::Set(resource_id),
                image_url: ActiveValue::Set(image_url),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        for equipment_name in equipment {
            entity::resource_equipment::ActiveModel {
                resource_id: ActiveValue::Set(resource_id),
                equipment_name: ActiveValue::Set(equipment_name),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Sets a resource's lifecycle status.
    ///
    /// # Returns
    /// - `Ok(true)` - Status updated
    /// - `Ok(false)` - No resource with that ID
    pub async fn set_status(&self, id: i32, status: ResourceStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::Resource::update_many()
            .col_expr(
                entity::resource::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .col_expr(
                entity::resource::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::resource::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a resource. Images, equipment, bookings and reviews cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Resource::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Lists resources matching the browse filters, newest first.
    ///
    /// Sorting by rating or popularity needs aggregate stats and is applied by the
    /// service on top of this ordering.
    pub async fn browse(&self, param: &BrowseResourcesParam) -> Result<Vec<Resource>, DbErr> {
        let mut query = entity::prelude::Resource::find();

        if !param.statuses.is_empty() {
            let statuses: Vec<&str> = param.statuses.iter().map(|s| s.as_str()).collect();
            query = query.filter(entity::resource::Column::Status.is_in(statuses));
        }
        if let Some(owner_id) = param.owner_id {
            query = query.filter(entity::resource::Column::OwnerId.eq(owner_id));
        }
        if let Some(category) = param.category {
            query = query.filter(entity::resource::Column::Category.eq(category.as_str()));
        }
        if let Some(search) = param.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::resource::Column::Title.contains(search))
                    .add(entity::resource::Column::Description.contains(search))
                    .add(entity::resource::Column::Location.contains(search)),
            );
        }

        let entities = query
            .order_by_desc(entity::resource::Column::CreatedAt)
            .order_by_desc(entity::resource::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Resource::from_entity).collect())
    }

    pub async fn get_images(&self, resource_id: i32) -> Result<Vec<String>, DbErr> {
        let entities = entity::prelude::ResourceImage::find()
            .filter(entity::resource_image::Column::ResourceId.eq(resource_id))
            .order_by_asc(entity::resource_image::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|e| e.image_url).collect())
    }

    pub async fn get_equipment(&self, resource_id: i32) -> Result<Vec<String>, DbErr> {
        let entities = entity::prelude::ResourceEquipment::find()
            .filter(entity::resource_equipment::Column::ResourceId.eq(resource_id))
            .order_by_asc(entity::resource_equipment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|e| e.equipment_name).collect())
    }

    /// Computes rating and booking aggregates for the given resources.
    ///
    /// Every requested ID gets an entry; resources without reviews have no average.
    /// Booking counts include bookings in every status.
    pub async fn get_stats(&self, ids: &[i32]) -> Result<HashMap<i32, ResourceStats>, DbErr> {
        let mut stats: HashMap<i32, ResourceStats> = ids
            .iter()
            .map(|id| (*id, ResourceStats::default()))
            .collect();
        if ids.is_empty() {
            return Ok(stats);
        }

        let ratings: Vec<(i32, i32)> = entity::prelude::Review::find()
            .select_only()
            .column(entity::review::Column::ResourceId)
            .column(entity::review::Column::Rating)
            .filter(entity::review::Column::ResourceId.is_in(ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut rating_sums: HashMap<i32, i64> = HashMap::new();
        for (resource_id, rating) in ratings {
            *rating_sums.entry(resource_id).or_default() += rating as i64;
            if let Some(entry) = stats.get_mut(&resource_id) {
                entry.review_count += 1;
            }
        }
        for (resource_id, sum) in rating_sums {
            if let Some(entry) = stats.get_mut(&resource_id) {
                let avg = sum as f64 / entry.review_count as f64;
                entry.avg_rating = Some((avg * 10.0).round() / 10.0);
            }
        }

        for (resource_id, count) in self.booking_counts(Some(ids.to_vec())).await? {
            if let Some(entry) = stats.get_mut(&resource_id) {
                entry.booking_count = count;
            }
        }

        Ok(stats)
    }

    /// Booking counts per resource, optionally restricted to `ids`.
    async fn booking_counts(&self, ids: Option<Vec<i32>>) -> Result<Vec<(i32, u64)>, DbErr> {
        let mut query = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::ResourceId)
            .column_as(entity::booking::Column::Id.count(), "booking_count")
            .group_by(entity::booking::Column::ResourceId);

        if let Some(ids) = ids {
            query = query.filter(entity::booking::Column::ResourceId.is_in(ids));
        }

        let rows: Vec<(i32, i64)> = query.into_tuple().all(self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, count.max(0) as u64))
            .collect())
    }

    /// Resources with the most bookings, most booked first, ties broken by lower ID.
    ///
    /// Unbooked resources count as zero and still fill the list.
    pub async fn top_by_bookings(
        &self,
        limit: usize,
        status: Option<ResourceStatus>,
    ) -> Result<Vec<(Resource, u64)>, DbErr> {
        let mut query = entity::prelude::Resource::find();
        if let Some(status) = status {
            query = query.filter(entity::resource::Column::Status.eq(status.as_str()));
        }
        let resources = query.all(self.db).await?;

        let counts: HashMap<i32, u64> = self.booking_counts(None).await?.into_iter().collect();

        let mut ranked: Vec<(Resource, u64)> = resources
            .into_iter()
            .map(|e| {
                let count = counts.get(&e.id).copied().unwrap_or(0);
                (Resource::from_entity(e), count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
        ranked.truncate(limit);

        Ok(ranked)
    }

    pub async fn count_by_status(&self, status: ResourceStatus) -> Result<u64, DbErr> {
        entity::prelude::Resource::find()
            .filter(entity::resource::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await
    }

    /// Number of resources per stored category value.
    pub async fn count_by_category(&self) -> Result<HashMap<String, u64>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::Resource::find()
            .select_only()
            .column(entity::resource::Column::Category)
            .column_as(entity::resource::Column::Id.count(), "resource_count")
            .group_by(entity::resource::Column::Category)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| (category, count.max(0) as u64))
            .collect())
    }
}
