//! PostgreSQL-backed `ExercisePort` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ExercisePersistenceError, ExercisePort};
use crate::domain::{Exercise, ExerciseId, WorkoutId};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{ExerciseRow, ExerciseValues};
use super::pool::{DbPool, PoolError};
use super::schema::{exercises, workouts};

/// Diesel-backed implementation of the [`ExercisePort`].
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ExercisePersistenceError {
    map_pool_error(error)
}

fn diesel_error(error: diesel::result::Error) -> ExercisePersistenceError {
    map_diesel_error(error)
}

fn to_exercise(row: ExerciseRow) -> Result<Exercise, ExercisePersistenceError> {
    Exercise::try_from(row).map_err(map_corrupt_row)
}

/// Recompute `exercise_count` for one workout from its child rows.
async fn refresh_workout_count(
    conn: &mut AsyncPgConnection,
    workout_id: i64,
    touched_at: DateTime<Utc>,
) -> QueryResult<()> {
    let count: i64 = exercises::table
        .filter(exercises::workout_id.eq(workout_id))
        .count()
        .get_result(conn)
        .await?;
    let count = i32::try_from(count).unwrap_or(i32::MAX);

    diesel::update(workouts::table.find(workout_id))
        .set((
            workouts::exercise_count.eq(count),
            workouts::updated_at.eq(touched_at),
        ))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ExercisePort for DieselExerciseRepository {
    async fn save(&self, exercise: Exercise) -> Result<Exercise, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let values = ExerciseValues::from(&exercise);

        let row = match exercise.id {
            None => diesel::insert_into(exercises::table)
                .values(&values)
                .returning(ExerciseRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(diesel_error)?,
            Some(id) => diesel::update(exercises::table.find(id.get()))
                .set(&values)
                .returning(ExerciseRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?
                .ok_or_else(|| {
                    ExercisePersistenceError::query(format!("exercise {id} no longer exists"))
                })?,
        };

        to_exercise(row)
    }

    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        exercises::table
            .find(id.get())
            .select(ExerciseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_exercise)
            .transpose()
    }

    async fn find_by_workout_id(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ExerciseRow> = exercises::table
            .filter(exercises::workout_id.eq(workout_id.get()))
            .select(ExerciseRow::as_select())
            .order_by((exercises::order_index.asc(), exercises::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(to_exercise).collect()
    }

    async fn delete_by_id(&self, id: ExerciseId) -> Result<(), ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(exercises::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn attach_to_workout(
        &self,
        exercise: Exercise,
        touched_at: DateTime<Utc>,
    ) -> Result<Exercise, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let values = ExerciseValues::from(&exercise);

        let row = conn
            .transaction(|conn| {
                async move {
                    let row: ExerciseRow = diesel::insert_into(exercises::table)
                        .values(&values)
                        .returning(ExerciseRow::as_returning())
                        .get_result(conn)
                        .await?;
                    refresh_workout_count(conn, row.workout_id, touched_at).await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        to_exercise(row)
    }

    async fn detach_from_workout(
        &self,
        id: ExerciseId,
        touched_at: DateTime<Utc>,
    ) -> Result<(), ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                let parent: Option<i64> = diesel::delete(exercises::table.find(id.get()))
                    .returning(exercises::workout_id)
                    .get_result(conn)
                    .await
                    .optional()?;
                if let Some(workout_id) = parent {
                    refresh_workout_count(conn, workout_id, touched_at).await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }
}
