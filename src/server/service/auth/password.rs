//! bcrypt hashing off the async runtime.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::server::error::AppError;

#[cfg(not(test))]
const COST: u32 = DEFAULT_COST;
#[cfg(test)]
const COST: u32 = 4;

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, COST))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password check task failed: {}", e)))?
        .map_err(AppError::from)
}
