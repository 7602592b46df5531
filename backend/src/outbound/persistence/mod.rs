//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories implement the domain's driven ports on top of `diesel-async`
//! and a `bb8` pool. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; only the repositories, the pool,
//! and the migration runner are exported.
//!
//! Cascading deletes come from the foreign keys declared in `migrations/`.
//!
//! # Example
//!
//! ```no_run
//! use gym_buddy::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), gym_buddy::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/gym_buddy")).await?;
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_exercise_repository;
mod diesel_user_repository;
mod diesel_workout_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_exercise_repository::DieselExerciseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_workout_repository::DieselWorkoutRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
