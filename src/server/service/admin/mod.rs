//! Site administration: statistics, user management and resource moderation.
//!
//! Booking approvals go through [`BookingService`](super::booking::BookingService) and review
//! moderation through [`ReviewService`](super::review::ReviewService) so admins follow the
//! same rules as owners and authors.

pub mod code;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{booking::BookingRepository, resource::ResourceRepository, user::UserRepository},
    error::AppError,
    model::{
        admin::AdminStats,
        booking::BookingStatus,
        resource::{
            BrowseResourcesParam, Resource, ResourceCategory, ResourceStatus, ResourceSummary,
        },
        user::{Role, User},
    },
};

const RECENT_BOOKINGS: u64 = 5;
const TOP_RESOURCES: usize = 5;

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gathers the admin dashboard figures.
    ///
    /// Every category appears in the breakdown, with zero when it has no resources.
    pub async fn stats(&self) -> Result<AdminStats, AppError> {
        let users = UserRepository::new(self.db);
        let resources = ResourceRepository::new(self.db);
        let bookings = BookingRepository::new(self.db);

        let by_category = resources.count_by_category().await?;
        let categories = ResourceCategory::ALL
            .iter()
            .map(|c| {
                let key = c.as_str().to_string();
                let count = by_category.get(&key).copied().unwrap_or(0);
                (key, count)
            })
            .collect();

        let recent = bookings.get_recent(RECENT_BOOKINGS).await?;

        Ok(AdminStats {
            total_users: users.count().await?,
            active_resources: resources.count_by_status(ResourceStatus::Published).await?,
            pending_bookings: bookings
                .count(None, Some(BookingStatus::Pending), None)
                .await?,
            total_bookings: bookings.count(None, None, None).await?,
            categories,
            recent_bookings: bookings.with_details(recent).await?,
            top_resources: resources.top_by_bookings(TOP_RESOURCES, None).await?,
        })
    }

    pub async fn users(&self) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_all().await?)
    }

    /// Deletes another user's account along with everything they own.
    pub async fn delete_user(&self, actor: &User, user_id: i32) -> Result<(), AppError> {
        if actor.id == user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account.".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);
        let user = repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        repo.delete(user_id).await?;
        tracing::info!("Admin {} deleted user {} ({})", actor.id, user.id, user.email);

        Ok(())
    }

    /// Changes a user's role. Admins cannot demote themselves.
    pub async fn update_role(&self, actor: &User, user_id: i32, role: Role) -> Result<(), AppError> {
        if actor.id == user_id && role != Role::Admin {
            return Err(AppError::BadRequest(
                "You cannot change your own role from admin.".to_string(),
            ));
        }

        let updated = UserRepository::new(self.db).set_role(user_id, role).await?;
        if !updated {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("Admin {} set role of user {} to {}", actor.id, user_id, role);

        Ok(())
    }

    /// Every resource in any status, newest first, with stats.
    pub async fn resources(&self) -> Result<Vec<ResourceSummary>, AppError> {
        let repo = ResourceRepository::new(self.db);
        let resources = repo
            .browse(&BrowseResourcesParam {
                statuses: ResourceStatus::ALL.to_vec(),
                ..Default::default()
            })
            .await?;

        let ids: Vec<i32> = resources.iter().map(|r| r.id).collect();
        let mut stats = repo.get_stats(&ids).await?;

        Ok(resources
            .into_iter()
            .map(|resource| ResourceSummary {
                stats: stats.remove(&resource.id).unwrap_or_default(),
                resource,
            })
            .collect())
    }

    /// Sets a resource's status, used for archive and publish.
    pub async fn set_resource_status(
        &self,
        resource_id: i32,
        status: ResourceStatus,
    ) -> Result<Resource, AppError> {
        let repo = ResourceRepository::new(self.db);
        if !repo.set_status(resource_id, status).await? {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }

        repo.find_by_id(resource_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))
    }
}
