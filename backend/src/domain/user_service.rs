//! User management service.
//!
//! Implements [`UserUseCase`] over any [`UserPort`]: it stamps timestamps,
//! validates before every write, and turns missing rows into not-found
//! errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::port_error_mapping::map_user_error;
use super::ports::{UserPort, UserUseCase};
use super::{Error, NewUser, ResourceKind, User, UserId, UserPatch};

/// Service implementing [`UserUseCase`].
#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserService<U> {
    /// Create the service from its storage port and clock.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> UserService<U>
where
    U: UserPort,
{
    async fn load(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::resource_not_found(ResourceKind::User, id))
    }

    async fn store(&self, user: User) -> Result<User, Error> {
        user.validate()?;
        self.users.save(user).await.map_err(map_user_error)
    }
}

#[async_trait]
impl<U> UserUseCase for UserService<U>
where
    U: UserPort,
{
    async fn create_user(&self, draft: NewUser) -> Result<User, Error> {
        self.store(User::new(draft, self.clock.utc())).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, Error> {
        self.load(UserId::new(id)?).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>, Error> {
        self.users.find_all().await.map_err(map_user_error)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, Error> {
        let mut user = self.load(UserId::new(id)?).await?;
        user.apply(patch, self.clock.utc());
        self.store(user).await
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        let user_id = UserId::new(id)?;
        self.load(user_id).await?;
        self.users
            .delete_by_id(user_id)
            .await
            .map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
