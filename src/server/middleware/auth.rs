//! Permission checks for request handlers.
//!
//! `AuthGuard` resolves the session's user and verifies a list of permissions in order,
//! failing on the first one that is not met. Admins pass every check.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{booking::BookingRepository, resource::ResourceRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

pub enum Permission {
    /// Administrator role.
    Admin,
    /// Staff or administrator role.
    Staff,
    /// Owner of the resource.
    ManageResource(i32),
    /// Owner of the booked resource; approves and rejects requests.
    ManageBooking(i32),
    /// Holder of the booking.
    CancelBooking(i32),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the logged-in user if every permission holds.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user satisfying all permissions
    /// - `Err(AuthError::UserNotInSession)` - No user logged in
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user
    /// - `Err(AuthError::AccessDenied)` - A permission is not met
    /// - `Err(AppError::NotFound)` - A referenced resource or booking does not exist
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            self.check(&user, permission).await?;
        }

        Ok(user)
    }

    /// Returns the logged-in user, or `None` for anonymous requests and stale sessions.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }

    async fn check(&self, user: &User, permission: &Permission) -> Result<(), AppError> {
        if user.is_admin() {
            return Ok(());
        }

        match permission {
            Permission::Admin => Err(AuthError::AccessDenied(
                user.id,
                "Administrator role required".to_string(),
            )
            .into()),
            Permission::Staff => {
                if user.is_staff() {
                    Ok(())
                } else {
                    Err(AuthError::AccessDenied(user.id, "Staff role required".to_string()).into())
                }
            }
            Permission::ManageResource(resource_id) => {
                let resource = ResourceRepository::new(self.db)
                    .find_by_id(*resource_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;

                if resource.owner_id == user.id {
                    Ok(())
                } else {
                    Err(AuthError::AccessDenied(
                        user.id,
                        format!("User does not own resource {}", resource_id),
                    )
                    .into())
                }
            }
            Permission::ManageBooking(booking_id) => {
                let booking = BookingRepository::new(self.db)
                    .find_by_id(*booking_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
                let resource = ResourceRepository::new(self.db)
                    .find_by_id(booking.resource_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;

                if resource.owner_id == user.id {
                    Ok(())
                } else {
                    Err(AuthError::AccessDenied(
                        user.id,
                        format!("User cannot manage booking {}", booking_id),
                    )
                    .into())
                }
            }
            Permission::CancelBooking(booking_id) => {
                let booking = BookingRepository::new(self.db)
                    .find_by_id(*booking_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

                if booking.user_id == user.id {
                    Ok(())
                } else {
                    Err(AuthError::AccessDenied(
                        user.id,
                        format!("User does not hold booking {}", booking_id),
                    )
                    .into())
                }
            }
        }
    }
}
