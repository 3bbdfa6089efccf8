//! Profile management for the signed-in user.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpdateProfileParam, User},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Updates the supplied profile fields.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated profile
    /// - `Err(AuthError::EmailTaken)` - New email belongs to another account
    /// - `Err(AppError::NotFound)` - User no longer exists
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if let Some(email) = param.email.as_deref() {
            if repo.email_taken(email, Some(user_id)).await? {
                return Err(AuthError::EmailTaken.into());
            }
        }

        repo.update_profile(user_id, param).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => AppError::NotFound("User not found".to_string()),
            e => e.into(),
        })
    }
}
