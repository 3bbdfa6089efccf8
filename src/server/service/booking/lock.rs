//! In-process keyed locks serializing booking writes.
//!
//! SQLite has no row-level locks, so the conflict check and the write that depends on
//! it are serialized per resource (and per user on creation) before the transaction
//! begins. Locks are always taken resource first, then user.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
struct KeyedLocks {
    locks: Arc<Mutex<HashMap<i32, Arc<Mutex<()>>>>>,
}

impl KeyedLocks {
    async fn lock(&self, key: i32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Drop entries nobody holds or waits on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key).or_default().clone()
        };

        lock.lock_owned().await
    }
}

/// Held for the duration of a booking check-and-write.
pub struct BookingGuard {
    _resource: OwnedMutexGuard<()>,
    _user: Option<OwnedMutexGuard<()>>,
}

/// Shared lock table stored in application state.
#[derive(Clone, Default)]
pub struct BookingLocks {
    resources: KeyedLocks,
    users: KeyedLocks,
}

impl BookingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks a resource's schedule, used when changing an existing booking's status.
    pub async fn lock_resource(&self, resource_id: i32) -> BookingGuard {
        BookingGuard {
            _resource: self.resources.lock(resource_id).await,
            _user: None,
        }
    }

    /// Locks a resource's schedule and then the user's, used when creating a booking.
    pub async fn lock_resource_and_user(&self, resource_id: i32, user_id: i32) -> BookingGuard {
        let resource = self.resources.lock(resource_id).await;
        let user = self.users.lock(user_id).await;

        BookingGuard {
            _resource: resource,
            _user: Some(user),
        }
    }
}
