//! Driven port for exercise persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Exercise, ExerciseId, WorkoutId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by exercise storage adapters.
    pub enum ExercisePersistenceError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "exercise repository query failed: {message}",
        /// The write violates a storage constraint, such as a missing workout.
        Conflict { message: String } => "exercise repository conflict: {message}",
    }
}

/// Storage contract for [`Exercise`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExercisePort: Send + Sync {
    /// Insert `exercise` when it has no id, otherwise update the stored row.
    async fn save(&self, exercise: Exercise) -> Result<Exercise, ExercisePersistenceError>;

    /// Fetch an exercise by id; `None` when no row matches.
    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExercisePersistenceError>;

    /// Fetch the exercises of `workout_id` ordered by position then id.
    async fn find_by_workout_id(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError>;

    /// Delete an exercise. Missing ids are ignored.
    async fn delete_by_id(&self, id: ExerciseId) -> Result<(), ExercisePersistenceError>;

    /// Insert a new exercise and refresh its workout's `exercise_count` and
    /// `updated_at` (set to `touched_at`) in one atomic write.
    ///
    /// Nothing is stored when any part fails.
    async fn attach_to_workout(
        &self,
        exercise: Exercise,
        touched_at: DateTime<Utc>,
    ) -> Result<Exercise, ExercisePersistenceError>;

    /// Delete an exercise and refresh its workout's `exercise_count` and
    /// `updated_at` in one atomic write. Missing ids are ignored.
    async fn detach_from_workout(
        &self,
        id: ExerciseId,
        touched_at: DateTime<Utc>,
    ) -> Result<(), ExercisePersistenceError>;
}
