//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user storage adapters.
    pub enum UserPersistenceError {
        /// Storage could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The write collides with an existing username or email.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Storage contract for [`User`] records.
///
/// Adapters never validate; callers run [`User::validate`] first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPort: Send + Sync {
    /// Insert `user` when it has no id, otherwise update the stored row.
    ///
    /// Returns the stored user with its id populated.
    async fn save(&self, user: User) -> Result<User, UserPersistenceError>;

    /// Fetch a user by id; `None` when no row matches.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a user together with its workouts and their exercises.
    ///
    /// Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
