//! Email and password accounts.
//!
//! Session handling lives in the controller; this service only creates and checks accounts.

pub mod password;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, RegisterParam, Role, User},
    service::admin::code::AdminCodeService,
};

use self::password::{hash_password, verify_password};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    admin_code_service: &'a AdminCodeService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, admin_code_service: &'a AdminCodeService) -> Self {
        Self {
            db,
            admin_code_service,
        }
    }

    /// Creates a student account, or an admin account when a valid admin code is supplied.
    ///
    /// An invalid admin code is not an error; the account is created as a student. The code
    /// is handed back when the insert fails, so only a created account uses it up.
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AuthError::EmailTaken)` - Another account uses the email, including one
    ///   registered concurrently
    pub async fn register(&self, param: RegisterParam) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        if repo.email_taken(&param.email, None).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let claimed = match param.admin_code.as_deref() {
            Some(code) => self.admin_code_service.claim(code).await,
            None => None,
        };
        let role = if claimed.is_some() {
            Role::Admin
        } else {
            Role::Student
        };

        let created: Result<User, AppError> = async {
            let password_hash = hash_password(param.password).await?;
            repo.create(CreateUserParam {
                email: param.email,
                password_hash,
                name: param.name,
                role,
                department: param.department,
            })
            .await
            .map_err(email_taken_on_unique_violation)
        }
        .await;

        let user = match created {
            Ok(user) => user,
            Err(e) => {
                if let Some(claimed) = claimed {
                    self.admin_code_service.restore(claimed).await;
                }
                return Err(e);
            }
        };

        tracing::info!("Registered user {} with role {}", user.id, user.role);

        Ok(user)
    }

    /// Checks an email and password pair.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: String) -> Result<User, AppError> {
        let (user, password_hash) = UserRepository::new(self.db)
            .find_credentials_by_email(email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

/// Maps a lost race on the unique email index to `EmailTaken`.
fn email_taken_on_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::EmailTaken.into(),
        _ => err.into(),
    }
}
