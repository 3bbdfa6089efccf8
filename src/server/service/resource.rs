//! Resource catalogue: browsing, detail pages and owner management.
//!
//! Ownership checks for edit and delete happen in the guard before these methods run.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::cmp::Ordering;

use crate::server::{
    data::{resource::ResourceRepository, review::ReviewRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        resource::{
            BrowseResourcesParam, CreateResourceParam, Resource, ResourceDetail, ResourceFields,
            ResourceQuery, ResourceSort, ResourceStatus, ResourceSummary, UpdateResourceParam,
        },
        user::User,
    },
    service::review::ReviewService,
};

pub struct ResourceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResourceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists resources visible to the viewer with stats, in the requested order.
    ///
    /// Published resources are listed unless `mine` is set (the viewer's own resources in
    /// any status) or an admin asks for a specific status. A status filter from anyone else
    /// is ignored.
    pub async fn browse(
        &self,
        viewer: Option<&User>,
        query: ResourceQuery,
    ) -> Result<Vec<ResourceSummary>, AppError> {
        let (statuses, owner_id) = match (viewer, query.mine, query.status) {
            (None, true, _) => return Err(AuthError::UserNotInSession.into()),
            (Some(user), true, _) => (ResourceStatus::ALL.to_vec(), Some(user.id)),
            (Some(user), false, Some(status)) if user.is_admin() => (vec![status], None),
            _ => (vec![ResourceStatus::Published], None),
        };

        let param = BrowseResourcesParam {
            search: query.search,
            category: query.category,
            statuses,
            owner_id,
            sort: query.sort,
        };

        let repo = ResourceRepository::new(self.db);
        let resources = repo.browse(&param).await?;
        let mut summaries = self.summarize(resources).await?;
        sort_summaries(&mut summaries, param.sort);

        Ok(summaries)
    }

    /// Resources owned by the user in any status.
    pub async fn my_resources(&self, owner_id: i32) -> Result<Vec<ResourceSummary>, AppError> {
        let resources = ResourceRepository::new(self.db)
            .browse(&BrowseResourcesParam {
                statuses: ResourceStatus::ALL.to_vec(),
                owner_id: Some(owner_id),
                ..Default::default()
            })
            .await?;

        self.summarize(resources).await
    }

    /// Loads everything shown on a resource's page.
    ///
    /// # Returns
    /// - `Ok(ResourceDetail)` - Resource with owner, images, equipment, reviews and stats
    /// - `Err(AppError::NotFound)` - Resource missing, or not published and the viewer is
    ///   neither its owner nor an admin
    pub async fn detail(&self, id: i32, viewer: Option<&User>) -> Result<ResourceDetail, AppError> {
        let not_found = || AppError::NotFound("Resource not found".to_string());
        let repo = ResourceRepository::new(self.db);

        let resource = repo.find_by_id(id).await?.ok_or_else(not_found)?;
        if !resource.is_published() && !viewer.is_some_and(|u| can_manage(u, &resource)) {
            return Err(not_found());
        }

        let owner = UserRepository::new(self.db)
            .find_by_id(resource.owner_id)
            .await?
            .ok_or_else(not_found)?;

        let can_review = match viewer {
            Some(user) => {
                ReviewService::new(self.db)
                    .can_review(user.id, id, Utc::now())
                    .await?
            }
            None => false,
        };

        let stats = repo.get_stats(&[id]).await?.remove(&id).unwrap_or_default();

        Ok(ResourceDetail {
            images: repo.get_images(id).await?,
            equipment: repo.get_equipment(id).await?,
            reviews: ReviewRepository::new(self.db).get_by_resource(id).await?,
            resource,
            owner,
            stats,
            can_review,
        })
    }

    pub async fn create(&self, owner_id: i32, fields: ResourceFields) -> Result<Resource, AppError> {
        let txn = self.db.begin().await?;
        let resource = ResourceRepository::new(&txn)
            .create(CreateResourceParam { owner_id, fields })
            .await?;
        txn.commit().await?;

        tracing::info!("User {} created resource {}", owner_id, resource.id);

        Ok(resource)
    }

    /// Replaces a resource's fields; images and equipment are replaced wholesale.
    pub async fn update(&self, id: i32, fields: ResourceFields) -> Result<Resource, AppError> {
        let txn = self.db.begin().await?;
        let resource = ResourceRepository::new(&txn)
            .update(UpdateResourceParam { id, fields })
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotFound(_) => {
                    AppError::NotFound("Resource not found".to_string())
                }
                e => e.into(),
            })?;
        txn.commit().await?;

        Ok(resource)
    }

    /// Deletes a resource with its images, equipment, bookings and reviews.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = ResourceRepository::new(self.db);
        if repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }

        repo.delete(id).await?;
        tracing::info!("Deleted resource {}", id);

        Ok(())
    }

    async fn summarize(&self, resources: Vec<Resource>) -> Result<Vec<ResourceSummary>, AppError> {
        let ids: Vec<i32> = resources.iter().map(|r| r.id).collect();
        let mut stats = ResourceRepository::new(self.db).get_stats(&ids).await?;

        Ok(resources
            .into_iter()
            .map(|resource| ResourceSummary {
                stats: stats.remove(&resource.id).unwrap_or_default(),
                resource,
            })
            .collect())
    }
}

fn can_manage(user: &User, resource: &Resource) -> bool {
    user.is_admin() || resource.owner_id == user.id
}

/// Reorders newest-first summaries; stable, so ties keep the newest first.
fn sort_summaries(summaries: &mut [ResourceSummary], sort: ResourceSort) {
    match sort {
        ResourceSort::Recent => {}
        ResourceSort::Rating => summaries.sort_by(|a, b| {
            match (a.stats.avg_rating, b.stats.avg_rating) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
        ResourceSort::Popular => {
            summaries.sort_by(|a, b| b.stats.booking_count.cmp(&a.stats.booking_count))
        }
    }
}
