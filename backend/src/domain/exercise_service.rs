//! Exercise management service.
//!
//! Exercises follow the workout pattern: validate, stamp, persist. Adding or
//! removing one also refreshes the parent workout's stored `exercise_count`;
//! the port performs both writes as one unit so a failure leaves neither.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::port_error_mapping::{map_exercise_error, map_workout_error};
use super::ports::{ExercisePort, ExerciseUseCase, WorkoutPort};
use super::{Error, Exercise, ExerciseId, ExercisePatch, NewExercise, ResourceKind, WorkoutId};

/// Service implementing [`ExerciseUseCase`].
#[derive(Clone)]
pub struct ExerciseService<E, W> {
    exercises: Arc<E>,
    workouts: Arc<W>,
    clock: Arc<dyn Clock>,
}

impl<E, W> ExerciseService<E, W> {
    /// Create the service from the exercise and workout ports.
    pub fn new(exercises: Arc<E>, workouts: Arc<W>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exercises,
            workouts,
            clock,
        }
    }
}

impl<E, W> ExerciseService<E, W>
where
    E: ExercisePort,
    W: WorkoutPort,
{
    async fn ensure_workout_exists(&self, id: WorkoutId) -> Result<(), Error> {
        self.workouts
            .find_by_id(id)
            .await
            .map_err(map_workout_error)?
            .map(|_| ())
            .ok_or_else(|| Error::resource_not_found(ResourceKind::Workout, id))
    }

    async fn load(&self, id: ExerciseId) -> Result<Exercise, Error> {
        self.exercises
            .find_by_id(id)
            .await
            .map_err(map_exercise_error)?
            .ok_or_else(|| Error::resource_not_found(ResourceKind::Exercise, id))
    }

    async fn store(&self, exercise: Exercise) -> Result<Exercise, Error> {
        exercise.validate()?;
        self.exercises
            .save(exercise)
            .await
            .map_err(map_exercise_error)
    }
}

#[async_trait]
impl<E, W> ExerciseUseCase for ExerciseService<E, W>
where
    E: ExercisePort,
    W: WorkoutPort,
{
    async fn create_exercise(
        &self,
        workout_id: i64,
        draft: NewExercise,
    ) -> Result<Exercise, Error> {
        let parent = WorkoutId::new(workout_id)?;
        self.ensure_workout_exists(parent).await?;
        let now = self.clock.utc();
        let exercise = Exercise::new(parent, draft, now);
        exercise.validate()?;
        self.exercises
            .attach_to_workout(exercise, now)
            .await
            .map_err(map_exercise_error)
    }

    async fn get_exercise_by_id(&self, id: i64) -> Result<Exercise, Error> {
        self.load(ExerciseId::new(id)?).await
    }

    async fn get_exercises_by_workout_id(&self, workout_id: i64) -> Result<Vec<Exercise>, Error> {
        let parent = WorkoutId::new(workout_id)?;
        self.ensure_workout_exists(parent).await?;
        self.exercises
            .find_by_workout_id(parent)
            .await
            .map_err(map_exercise_error)
    }

    async fn update_exercise(&self, id: i64, patch: ExercisePatch) -> Result<Exercise, Error> {
        let mut exercise = self.load(ExerciseId::new(id)?).await?;
        exercise.apply(patch);
        self.store(exercise).await
    }

    async fn delete_exercise(&self, id: i64) -> Result<(), Error> {
        let exercise_id = ExerciseId::new(id)?;
        self.load(exercise_id).await?;
        self.exercises
            .detach_from_workout(exercise_id, self.clock.utc())
            .await
            .map_err(map_exercise_error)
    }
}

#[cfg(test)]
#[path = "exercise_service_tests.rs"]
mod tests;
