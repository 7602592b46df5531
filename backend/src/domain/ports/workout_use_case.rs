//! Driving port for workout management.

use async_trait::async_trait;

use crate::domain::{Error, NewWorkout, Workout, WorkoutPatch};

/// Use-case port for workouts. Identifiers are raw and validated by the
/// implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutUseCase: Send + Sync {
    /// Plan a workout for an existing user.
    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, Error>;

    /// Fetch a workout by raw id.
    async fn get_workout_by_id(&self, id: i64) -> Result<Workout, Error>;

    /// List every workout.
    async fn get_all_workouts(&self) -> Result<Vec<Workout>, Error>;

    /// List the workouts owned by a user.
    async fn get_workouts_by_user_id(&self, user_id: i64) -> Result<Vec<Workout>, Error>;

    /// Merge `patch` into the stored workout.
    async fn update_workout(&self, id: i64, patch: WorkoutPatch) -> Result<Workout, Error>;

    /// Delete a workout and its exercises.
    async fn delete_workout(&self, id: i64) -> Result<(), Error>;
}
