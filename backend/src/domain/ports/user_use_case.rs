//! Driving port for user management.
//!
//! Inbound adapters pass raw identifiers; implementations wrap them in
//! [`crate::domain::UserId`] and report non-positive values as invalid
//! requests.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserPatch};

/// Use-case port for creating, reading, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// Register a user.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Fetch a user by raw id.
    async fn get_user_by_id(&self, id: i64) -> Result<User, Error>;

    /// List every user.
    async fn get_all_users(&self) -> Result<Vec<User>, Error>;

    /// Merge `patch` into the stored user.
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, Error>;

    /// Delete a user and everything it owns.
    async fn delete_user(&self, id: i64) -> Result<(), Error>;
}
