//! Driving port for exercise management.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, ExercisePatch, NewExercise};

/// Use-case port for exercises within a workout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseUseCase: Send + Sync {
    /// Add an exercise to an existing workout.
    async fn create_exercise(
        &self,
        workout_id: i64,
        exercise: NewExercise,
    ) -> Result<Exercise, Error>;

    /// Fetch an exercise by raw id.
    async fn get_exercise_by_id(&self, id: i64) -> Result<Exercise, Error>;

    /// List the exercises of an existing workout.
    async fn get_exercises_by_workout_id(&self, workout_id: i64) -> Result<Vec<Exercise>, Error>;

    /// Merge `patch` into the stored exercise.
    async fn update_exercise(&self, id: i64, patch: ExercisePatch) -> Result<Exercise, Error>;

    /// Delete an exercise and shrink its workout's count.
    async fn delete_exercise(&self, id: i64) -> Result<(), Error>;
}
