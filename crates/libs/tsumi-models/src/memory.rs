//! In-process user store.

use std::sync::Mutex;

use chrono::Utc;

use crate::prelude::*;
use crate::store::UserStore;
use crate::user::{NewUser, User};

/// Keeps users in a vector behind a mutex, handing out sequential IDs from 1.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&[User]) -> T) -> Result<T> {
        let users = self.users.lock().map_err(|_| Error::Poisoned)?;
        Ok(f(&users))
    }
}

impl UserStore for MemoryUserStore {
    fn fetch_by_email(&self, email: &str) -> Result<Option<User>> {
        self.read(|users| users.iter().find(|u| u.email == email).cloned())
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<User>> {
        self.read(|users| users.iter().find(|u| u.id == id).cloned())
    }

    fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().map_err(|_| Error::Poisoned)?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::DuplicateEmail);
        }
        let id = users.last().map_or(1, |u| u.id + 1);
        let user = User {
            id,
            email: user.email,
            name: user.name,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
