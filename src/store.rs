//! In-memory user store.
//!
//! An ordered `Vec` plus an id counter behind one mutex. Every operation takes
//! the lock for its whole duration, so each is a single atomic step and no
//! reader can see a half-applied write. Lookups scan linearly.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::user::{User, UserInput};

/// Errors returned by [`UserStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no user with id {0}")]
    NotFound(u64),
}

/// The authority for user record lifecycle.
///
/// Constructed by the entry point and shared with handlers through the
/// router state; there is no global instance.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    users: Vec<User>,
    next_id: u64,
}

impl Default for Inner {
    fn default() -> Self {
        Self { users: Vec::new(), next_id: 1 }
    }
}

impl Inner {
    fn position(&self, id: u64) -> Result<usize, StoreError> {
        self.users.iter().position(|u| u.id == id).ok_or(StoreError::NotFound(id))
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    // No operation panics while holding the lock, so a poisoned guard still
    // protects consistent data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All users, in creation order.
    pub fn list(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn get(&self, id: u64) -> Result<User, StoreError> {
        let inner = self.lock();
        let idx = inner.position(id)?;
        Ok(inner.users[idx].clone())
    }

    /// Stores a new user under the next id and returns it.
    pub fn create(&self, input: UserInput) -> User {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let user = User { id, name: input.name, email: input.email };
        inner.users.push(user.clone());
        debug!(id, total = inner.users.len(), "user created");
        user
    }

    /// Replaces both `name` and `email` of an existing user.
    pub fn update(&self, id: u64, input: UserInput) -> Result<User, StoreError> {
        let mut inner = self.lock();
        let idx = inner.position(id)?;
        let user = &mut inner.users[idx];
        user.name = input.name;
        user.email = input.email;
        debug!(id, "user updated");
        Ok(user.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let idx = inner.position(id)?;
        inner.users.remove(idx);
        debug!(id, total = inner.users.len(), "user deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
