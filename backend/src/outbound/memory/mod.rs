//! In-process storage implementing every persistence port.
//!
//! [`InMemoryStore`] keeps users, workouts, and exercises in ordered maps
//! behind one mutex. It mirrors the PostgreSQL schema's constraints: unique
//! usernames and emails, owners that must exist, and cascading deletes, which
//! are performed explicitly here.
//!
//! The server falls back to this store when no database URL is configured;
//! contents are lost on restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ExercisePersistenceError, ExercisePort, UserPersistenceError, UserPort,
    WorkoutPersistenceError, WorkoutPort,
};
use crate::domain::{Exercise, ExerciseId, User, UserId, Workout, WorkoutId};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    workouts: BTreeMap<WorkoutId, Workout>,
    exercises: BTreeMap<ExerciseId, Exercise>,
    sequences: Sequences,
}

/// Last issued id per table, like a `BIGSERIAL` column.
#[derive(Debug, Default)]
struct Sequences {
    users: i64,
    workouts: i64,
    exercises: i64,
}

fn advance(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

impl Tables {
    fn username_or_email_taken(&self, candidate: &User) -> Option<&'static str> {
        self.users
            .values()
            .filter(|existing| existing.id != candidate.id)
            .find_map(|existing| {
                if existing.username == candidate.username {
                    Some("username already exists")
                } else if existing.email == candidate.email {
                    Some("email already exists")
                } else {
                    None
                }
            })
    }

    /// Attach the stored exercises, ordered like the SQL adapter orders them.
    fn hydrate(&self, stored: &Workout) -> Workout {
        let mut children: Vec<Exercise> = self
            .exercises
            .values()
            .filter(|exercise| Some(exercise.workout_id) == stored.id)
            .cloned()
            .collect();
        children.sort_by_key(|exercise| {
            (exercise.order_index.is_none(), exercise.order_index)
        });

        let mut workout = stored.clone();
        workout.exercises.clear();
        workout.exercise_count = 0;
        for child in children {
            workout.add_exercise(child);
        }
        workout
    }

    fn stamp_count(&mut self, workout_id: WorkoutId, count: i32, touched_at: DateTime<Utc>) {
        if let Some(row) = self.workouts.get_mut(&workout_id) {
            row.exercise_count = count;
            row.updated_at = touched_at;
        }
    }

    /// Insert an exercise and store its parent's new count.
    fn attach_exercise(
        &mut self,
        exercise: Exercise,
        touched_at: DateTime<Utc>,
    ) -> Result<Exercise, ExercisePersistenceError> {
        let saved = self.insert_exercise(exercise)?;
        let count = self
            .workouts
            .get(&saved.workout_id)
            .map_or(0, |stored| self.hydrate(stored).exercise_count);
        self.stamp_count(saved.workout_id, count, touched_at);
        Ok(saved)
    }

    /// Remove an exercise and store its parent's new count.
    fn detach_exercise(&mut self, id: ExerciseId, touched_at: DateTime<Utc>) {
        let Some(workout_id) = self.exercises.get(&id).map(|exercise| exercise.workout_id) else {
            return;
        };
        let remaining = self.workouts.get(&workout_id).map(|stored| {
            let mut workout = self.hydrate(stored);
            workout.remove_exercise(id);
            workout.exercise_count
        });
        self.exercises.remove(&id);
        if let Some(count) = remaining {
            self.stamp_count(workout_id, count, touched_at);
        }
    }

    fn insert_exercise(
        &mut self,
        mut exercise: Exercise,
    ) -> Result<Exercise, ExercisePersistenceError> {
        if !self.workouts.contains_key(&exercise.workout_id) {
            return Err(ExercisePersistenceError::conflict(
                "referenced workout does not exist",
            ));
        }
        let id = match exercise.id {
            Some(id) if self.exercises.contains_key(&id) => id,
            Some(id) => {
                return Err(ExercisePersistenceError::query(format!(
                    "exercise {id} no longer exists"
                )));
            }
            None => {
                let raw = advance(&mut self.sequences.exercises);
                ExerciseId::new(raw)
                    .map_err(|err| ExercisePersistenceError::query(err.to_string()))?
            }
        };
        exercise.id = Some(id);
        self.exercises.insert(id, exercise.clone());
        Ok(exercise)
    }

    fn remove_workout(&mut self, id: WorkoutId) {
        if self.workouts.remove(&id).is_some() {
            self.exercises
                .retain(|_, exercise| exercise.workout_id != id);
        }
    }
}

/// Thread-safe in-memory implementation of the persistence ports.
///
/// Each table draws ids from its own sequence starting at 1, and ids are
/// never reused after a delete.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use gym_buddy::outbound::memory::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::default());
/// let users = Arc::clone(&store);
/// let workouts = store;
/// # let _ = (users, workouts);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(
        &self,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<MutexGuard<'_, Tables>, E> {
        self.tables.lock().map_err(|_| poisoned(POISONED))
    }
}

#[async_trait]
impl UserPort for InMemoryStore {
    async fn save(&self, mut user: User) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock(UserPersistenceError::query)?;
        if let Some(message) = tables.username_or_email_taken(&user) {
            return Err(UserPersistenceError::conflict(message));
        }
        let id = match user.id {
            Some(id) if tables.users.contains_key(&id) => id,
            Some(id) => {
                return Err(UserPersistenceError::query(format!(
                    "user {id} no longer exists"
                )));
            }
            None => {
                let raw = advance(&mut tables.sequences.users);
                UserId::new(raw).map_err(|err| UserPersistenceError::query(err.to_string()))?
            }
        };
        user.id = Some(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock(UserPersistenceError::query)?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.lock(UserPersistenceError::query)?;
        Ok(tables.users.values().cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock(UserPersistenceError::query)?;
        if tables.users.remove(&id).is_none() {
            return Ok(());
        }
        let owned: Vec<WorkoutId> = tables
            .workouts
            .values()
            .filter(|workout| workout.user_id == id)
            .filter_map(|workout| workout.id)
            .collect();
        for workout_id in owned {
            tables.remove_workout(workout_id);
        }
        Ok(())
    }
}

#[async_trait]
impl WorkoutPort for InMemoryStore {
    async fn save(&self, mut workout: Workout) -> Result<Workout, WorkoutPersistenceError> {
        let mut tables = self.lock(WorkoutPersistenceError::query)?;
        if !tables.users.contains_key(&workout.user_id) {
            return Err(WorkoutPersistenceError::conflict(
                "referenced user does not exist",
            ));
        }
        let id = match workout.id {
            Some(id) if tables.workouts.contains_key(&id) => id,
            Some(id) => {
                return Err(WorkoutPersistenceError::query(format!(
                    "workout {id} no longer exists"
                )));
            }
            None => {
                let raw = advance(&mut tables.sequences.workouts);
                WorkoutId::new(raw)
                    .map_err(|err| WorkoutPersistenceError::query(err.to_string()))?
            }
        };
        workout.id = Some(id);
        let mut row = workout.clone();
        row.exercises.clear();
        tables.workouts.insert(id, row);
        Ok(workout)
    }

    async fn find_by_id(&self, id: WorkoutId) -> Result<Option<Workout>, WorkoutPersistenceError> {
        let tables = self.lock(WorkoutPersistenceError::query)?;
        Ok(tables
            .workouts
            .get(&id)
            .map(|stored| tables.hydrate(stored)))
    }

    async fn find_all(&self) -> Result<Vec<Workout>, WorkoutPersistenceError> {
        let tables = self.lock(WorkoutPersistenceError::query)?;
        Ok(tables
            .workouts
            .values()
            .map(|stored| tables.hydrate(stored))
            .collect())
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Workout>, WorkoutPersistenceError> {
        let tables = self.lock(WorkoutPersistenceError::query)?;
        Ok(tables
            .workouts
            .values()
            .filter(|stored| stored.user_id == user_id)
            .map(|stored| tables.hydrate(stored))
            .collect())
    }

    async fn delete_by_id(&self, id: WorkoutId) -> Result<(), WorkoutPersistenceError> {
        let mut tables = self.lock(WorkoutPersistenceError::query)?;
        tables.remove_workout(id);
        Ok(())
    }
}

#[async_trait]
impl ExercisePort for InMemoryStore {
    async fn save(&self, exercise: Exercise) -> Result<Exercise, ExercisePersistenceError> {
        let mut tables = self.lock(ExercisePersistenceError::query)?;
        tables.insert_exercise(exercise)
    }

    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExercisePersistenceError> {
        let tables = self.lock(ExercisePersistenceError::query)?;
        Ok(tables.exercises.get(&id).cloned())
    }

    async fn find_by_workout_id(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let tables = self.lock(ExercisePersistenceError::query)?;
        Ok(tables
            .workouts
            .get(&workout_id)
            .map(|stored| tables.hydrate(stored).exercises)
            .unwrap_or_default())
    }

    async fn delete_by_id(&self, id: ExerciseId) -> Result<(), ExercisePersistenceError> {
        let mut tables = self.lock(ExercisePersistenceError::query)?;
        tables.exercises.remove(&id);
        Ok(())
    }

    async fn attach_to_workout(
        &self,
        exercise: Exercise,
        touched_at: DateTime<Utc>,
    ) -> Result<Exercise, ExercisePersistenceError> {
        let mut tables = self.lock(ExercisePersistenceError::query)?;
        tables.attach_exercise(exercise, touched_at)
    }

    async fn detach_from_workout(
        &self,
        id: ExerciseId,
        touched_at: DateTime<Utc>,
    ) -> Result<(), ExercisePersistenceError> {
        let mut tables = self.lock(ExercisePersistenceError::query)?;
        tables.detach_exercise(id, touched_at);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
