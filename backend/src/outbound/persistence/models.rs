//! Internal Diesel row structs and their conversions to domain entities.
//!
//! Rows never leave the persistence module. Reading a row back into the
//! domain re-wraps its identifiers, which can only fail if the database holds
//! a non-positive key.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Exercise, ExerciseId, IdValidationError, User, UserId, Workout, WorkoutId};

use super::schema::{exercises, users, workouts};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written to `users` on insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserValues<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for UserValues<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = IdValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(UserId::new(row.id)?),
            username: row.username,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row read from `workouts`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workouts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WorkoutRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub exercise_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written to `workouts`.
///
/// `None` writes `NULL` so an update mirrors the domain value exactly.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = workouts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct WorkoutValues<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub duration_minutes: Option<i32>,
    pub exercise_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Workout> for WorkoutValues<'a> {
    fn from(workout: &'a Workout) -> Self {
        Self {
            user_id: workout.user_id.get(),
            name: &workout.name,
            description: workout.description.as_deref(),
            duration_minutes: workout.duration_minutes,
            exercise_count: workout.exercise_count,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
        }
    }
}

impl WorkoutRow {
    /// Combine the row with its already-converted exercises.
    pub(crate) fn into_workout(
        self,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, IdValidationError> {
        Ok(Workout {
            id: Some(WorkoutId::new(self.id)?),
            user_id: UserId::new(self.user_id)?,
            name: self.name,
            description: self.description,
            duration_minutes: self.duration_minutes,
            exercise_count: self.exercise_count,
            exercises,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row read from `exercises`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub order_index: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Column values written to `exercises`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = exercises)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ExerciseValues<'a> {
    pub workout_id: i64,
    pub name: &'a str,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub notes: Option<&'a str>,
    pub order_index: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Exercise> for ExerciseValues<'a> {
    fn from(exercise: &'a Exercise) -> Self {
        Self {
            workout_id: exercise.workout_id.get(),
            name: &exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            weight_kg: exercise.weight_kg,
            notes: exercise.notes.as_deref(),
            order_index: exercise.order_index,
            created_at: exercise.created_at,
        }
    }
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = IdValidationError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ExerciseId::new(row.id)?),
            workout_id: WorkoutId::new(row.workout_id)?,
            name: row.name,
            sets: row.sets,
            reps: row.reps,
            weight_kg: row.weight_kg,
            notes: row.notes,
            order_index: row.order_index,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; the SQL itself is exercised against a live
    //! database only.
    use super::*;
    use rstest::rstest;

    fn timestamp() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    fn workout_row() -> WorkoutRow {
        WorkoutRow {
            id: 3,
            user_id: 1,
            name: "Leg Day".to_owned(),
            description: None,
            duration_minutes: Some(45),
            exercise_count: 0,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[rstest]
    fn user_row_converts_to_saved_user() {
        let user = User::try_from(UserRow {
            id: 9,
            username: "alice".to_owned(),
            email: "alice@x.com".to_owned(),
            created_at: timestamp(),
            updated_at: timestamp(),
        })
        .expect("valid row");

        assert_eq!(user.id.map(UserId::get), Some(9));
        assert_eq!(UserValues::from(&user).username, "alice");
    }

    #[rstest]
    fn workout_row_keeps_stored_count_and_exercises() {
        let exercise = Exercise::try_from(ExerciseRow {
            id: 5,
            workout_id: 3,
            name: "Squat".to_owned(),
            sets: Some(5),
            reps: Some(5),
            weight_kg: Some(100.0),
            notes: Some("belt".to_owned()),
            order_index: Some(1),
            created_at: timestamp(),
        })
        .expect("valid row");

        let mut row = workout_row();
        row.exercise_count = 1;
        let workout = row.into_workout(vec![exercise]).expect("valid row");

        assert_eq!(workout.exercise_count, 1);
        assert_eq!(workout.exercises.len(), 1);
        let values = ExerciseValues::from(&workout.exercises[0]);
        assert_eq!(values.workout_id, 3);
        assert_eq!(values.notes, Some("belt"));
    }

    #[rstest]
    fn non_positive_keys_are_rejected() {
        let mut row = workout_row();
        row.user_id = 0;
        let err = row
            .into_workout(Vec::new())
            .expect_err("owner key is invalid");
        assert_eq!(err.kind, crate::domain::ResourceKind::User);
    }
}
