//! Driven port for workout persistence.

use async_trait::async_trait;

use crate::domain::{UserId, Workout, WorkoutId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by workout storage adapters.
    pub enum WorkoutPersistenceError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "workout repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "workout repository query failed: {message}",
        /// The write violates a storage constraint, such as a missing owner.
        Conflict { message: String } => "workout repository conflict: {message}",
    }
}

/// Storage contract for [`Workout`] records.
///
/// Reads return workouts with their exercises loaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutPort: Send + Sync {
    /// Insert `workout` when it has no id, otherwise update the stored row.
    ///
    /// Only the workout row is written; exercises are stored through
    /// [`super::ExercisePort`].
    async fn save(&self, workout: Workout) -> Result<Workout, WorkoutPersistenceError>;

    /// Fetch a workout by id; `None` when no row matches.
    async fn find_by_id(&self, id: WorkoutId) -> Result<Option<Workout>, WorkoutPersistenceError>;

    /// Fetch every workout, ordered by id.
    async fn find_all(&self) -> Result<Vec<Workout>, WorkoutPersistenceError>;

    /// Fetch the workouts owned by `user_id`; empty when there are none.
    async fn find_by_user_id(&self, user_id: UserId)
    -> Result<Vec<Workout>, WorkoutPersistenceError>;

    /// Delete a workout and its exercises. Missing ids are ignored.
    async fn delete_by_id(&self, id: WorkoutId) -> Result<(), WorkoutPersistenceError>;
}
