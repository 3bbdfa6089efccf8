//! One-time code granting the admin role at registration.
//!
//! Generated at startup while no admin account exists and logged to the console.
//! The first registration presenting it becomes an admin and the code is consumed.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Lifetime of a generated code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(600);

const CODE_LENGTH: usize = 32;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

struct PendingCode {
    code: String,
    expires_at: Instant,
}

/// A code removed from the service by a matching [`AdminCodeService::claim`].
pub struct ClaimedCode(PendingCode);

/// In-memory holder of at most one pending admin code.
#[derive(Clone)]
pub struct AdminCodeService {
    ttl: Duration,
    pending: Arc<RwLock<Option<PendingCode>>>,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces any pending code with a fresh 32-character alphanumeric one.
    pub async fn generate(&self) -> String {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();

        *self.pending.write().await = Some(PendingCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        code
    }

    /// Takes the pending code if `input` matches and it has not expired.
    ///
    /// Expired codes are discarded on inspection. A wrong guess leaves a valid code in place.
    pub async fn claim(&self, input: &str) -> Option<ClaimedCode> {
        let mut pending = self.pending.write().await;

        match pending.as_ref() {
            Some(p) if Instant::now() >= p.expires_at => {
                *pending = None;
                None
            }
            Some(p) if p.code == input => pending.take().map(ClaimedCode),
            _ => None,
        }
    }

    /// Puts a claimed code back after the registration using it failed.
    ///
    /// Keeps the original expiry and never replaces a code generated in the meantime.
    pub async fn restore(&self, claimed: ClaimedCode) {
        let mut pending = self.pending.write().await;
        if pending.is_none() && Instant::now() < claimed.0.expires_at {
            *pending = Some(claimed.0);
        }
    }

    #[cfg(test)]
    pub async fn has_valid_code(&self) -> bool {
        self.pending
            .read()
            .await
            .as_ref()
            .is_some_and(|p| Instant::now() < p.expires_at)
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}
