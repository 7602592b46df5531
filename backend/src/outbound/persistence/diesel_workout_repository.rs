//! PostgreSQL-backed `WorkoutPort` implementation using Diesel ORM.
//!
//! Reads load each workout's exercises with one extra query per call,
//! regardless of how many workouts are returned.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{WorkoutPersistenceError, WorkoutPort};
use crate::domain::{Exercise, UserId, Workout, WorkoutId};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{ExerciseRow, WorkoutRow, WorkoutValues};
use super::pool::{DbPool, PoolError};
use super::schema::{exercises, workouts};

/// Diesel-backed implementation of the [`WorkoutPort`].
#[derive(Clone)]
pub struct DieselWorkoutRepository {
    pool: DbPool,
}

impl DieselWorkoutRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> WorkoutPersistenceError {
    map_pool_error(error)
}

fn diesel_error(error: diesel::result::Error) -> WorkoutPersistenceError {
    map_diesel_error(error)
}

/// Load the exercises for `rows` and assemble domain workouts in row order.
async fn assemble(
    conn: &mut AsyncPgConnection,
    rows: Vec<WorkoutRow>,
) -> Result<Vec<Workout>, WorkoutPersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let exercise_rows: Vec<ExerciseRow> = exercises::table
        .filter(exercises::workout_id.eq_any(ids))
        .select(ExerciseRow::as_select())
        .order_by((exercises::order_index.asc(), exercises::id.asc()))
        .load(conn)
        .await
        .map_err(diesel_error)?;

    let mut by_workout: HashMap<i64, Vec<Exercise>> = HashMap::new();
    for row in exercise_rows {
        let workout_id = row.workout_id;
        let exercise = Exercise::try_from(row).map_err(map_corrupt_row)?;
        by_workout.entry(workout_id).or_default().push(exercise);
    }

    rows.into_iter()
        .map(|row| {
            let children = by_workout.remove(&row.id).unwrap_or_default();
            row.into_workout(children).map_err(map_corrupt_row)
        })
        .collect()
}

#[async_trait]
impl WorkoutPort for DieselWorkoutRepository {
    async fn save(&self, workout: Workout) -> Result<Workout, WorkoutPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let values = WorkoutValues::from(&workout);

        let row = match workout.id {
            None => diesel::insert_into(workouts::table)
                .values(&values)
                .returning(WorkoutRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(diesel_error)?,
            Some(id) => diesel::update(workouts::table.find(id.get()))
                .set(&values)
                .returning(WorkoutRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?
                .ok_or_else(|| {
                    WorkoutPersistenceError::query(format!("workout {id} no longer exists"))
                })?,
        };

        row.into_workout(workout.exercises).map_err(map_corrupt_row)
    }

    async fn find_by_id(&self, id: WorkoutId) -> Result<Option<Workout>, WorkoutPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<WorkoutRow> = workouts::table
            .find(id.get())
            .select(WorkoutRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        let Some(found) = row else {
            return Ok(None);
        };
        Ok(assemble(&mut conn, vec![found]).await?.pop())
    }

    async fn find_all(&self) -> Result<Vec<Workout>, WorkoutPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<WorkoutRow> = workouts::table
            .select(WorkoutRow::as_select())
            .order_by(workouts::id.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        assemble(&mut conn, rows).await
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Workout>, WorkoutPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<WorkoutRow> = workouts::table
            .filter(workouts::user_id.eq(user_id.get()))
            .select(WorkoutRow::as_select())
            .order_by(workouts::id.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        assemble(&mut conn, rows).await
    }

    async fn delete_by_id(&self, id: WorkoutId) -> Result<(), WorkoutPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(workouts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
