//! Workout management service.
//!
//! Creating a workout is the one place where an aggregate refers to another:
//! the owning user must exist before anything is written. The check is a
//! plain lookup through [`UserPort`] followed by the save, not a transaction.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::port_error_mapping::{map_user_error, map_workout_error};
use super::ports::{UserPort, WorkoutPort, WorkoutUseCase};
use super::{Error, NewWorkout, ResourceKind, UserId, Workout, WorkoutId, WorkoutPatch};

/// Service implementing [`WorkoutUseCase`].
#[derive(Clone)]
pub struct WorkoutService<W, U> {
    workouts: Arc<W>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<W, U> WorkoutService<W, U> {
    /// Create the service from the workout and user ports.
    pub fn new(workouts: Arc<W>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            workouts,
            users,
            clock,
        }
    }
}

impl<W, U> WorkoutService<W, U>
where
    W: WorkoutPort,
    U: UserPort,
{
    async fn ensure_user_exists(&self, id: UserId) -> Result<(), Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(|| Error::resource_not_found(ResourceKind::User, id))
    }

    async fn load(&self, id: WorkoutId) -> Result<Workout, Error> {
        self.workouts
            .find_by_id(id)
            .await
            .map_err(map_workout_error)?
            .ok_or_else(|| Error::resource_not_found(ResourceKind::Workout, id))
    }

    async fn store(&self, workout: Workout) -> Result<Workout, Error> {
        workout.validate()?;
        self.workouts.save(workout).await.map_err(map_workout_error)
    }
}

#[async_trait]
impl<W, U> WorkoutUseCase for WorkoutService<W, U>
where
    W: WorkoutPort,
    U: UserPort,
{
    async fn create_workout(&self, draft: NewWorkout) -> Result<Workout, Error> {
        let owner = UserId::new(draft.user_id)?;
        self.ensure_user_exists(owner).await?;
        self.store(Workout::new(owner, draft, self.clock.utc()))
            .await
    }

    async fn get_workout_by_id(&self, id: i64) -> Result<Workout, Error> {
        self.load(WorkoutId::new(id)?).await
    }

    async fn get_all_workouts(&self) -> Result<Vec<Workout>, Error> {
        self.workouts.find_all().await.map_err(map_workout_error)
    }

    async fn get_workouts_by_user_id(&self, user_id: i64) -> Result<Vec<Workout>, Error> {
        let owner = UserId::new(user_id)?;
        self.workouts
            .find_by_user_id(owner)
            .await
            .map_err(map_workout_error)
    }

    async fn update_workout(&self, id: i64, patch: WorkoutPatch) -> Result<Workout, Error> {
        let mut workout = self.load(WorkoutId::new(id)?).await?;
        workout.apply(patch, self.clock.utc());
        self.store(workout).await
    }

    async fn delete_workout(&self, id: i64) -> Result<(), Error> {
        let workout_id = WorkoutId::new(id)?;
        self.load(workout_id).await?;
        self.workouts
            .delete_by_id(workout_id)
            .await
            .map_err(map_workout_error)
    }
}

#[cfg(test)]
#[path = "workout_service_tests.rs"]
mod tests;
