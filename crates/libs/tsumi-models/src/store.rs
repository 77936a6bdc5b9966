//! Data-store seam used by the HTTP handlers.

use std::sync::Arc;

use crate::prelude::*;
use crate::user::{NewUser, User};

/// Minimal user query interface.
///
/// Implementations must be shareable across request tasks.
pub trait UserStore: Send + Sync {
    /// Looks a user up by email, `None` when absent.
    fn fetch_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Looks a user up by ID, `None` when absent.
    fn fetch_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Inserts a user. Fails with [`Error::DuplicateEmail`] if the email is taken.
    fn create(&self, user: NewUser) -> Result<User>;
}

impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    fn fetch_by_email(&self, email: &str) -> Result<Option<User>> {
        (**self).fetch_by_email(email)
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<User>> {
        (**self).fetch_by_id(id)
    }

    fn create(&self, user: NewUser) -> Result<User> {
        (**self).create(user)
    }
}
