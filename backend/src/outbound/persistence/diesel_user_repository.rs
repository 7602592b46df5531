//! PostgreSQL-backed `UserPort` implementation using Diesel ORM.
//!
//! Deleting a user relies on the `ON DELETE CASCADE` foreign keys declared in
//! the migrations to remove its workouts and their exercises.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserPort};
use crate::domain::{User, UserId};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{UserRow, UserValues};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserPort`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(error)
}

fn to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from(row).map_err(map_corrupt_row)
}

#[async_trait]
impl UserPort for DieselUserRepository {
    async fn save(&self, user: User) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let values = UserValues::from(&user);

        let row = match user.id {
            None => diesel::insert_into(users::table)
                .values(&values)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(diesel_error)?,
            Some(id) => diesel::update(users::table.find(id.get()))
                .set(&values)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?
                .ok_or_else(|| UserPersistenceError::query(format!("user {id} no longer exists")))?,
        };

        to_user(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(to_user).collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
