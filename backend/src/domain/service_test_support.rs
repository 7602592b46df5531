//! Shared fixtures for service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{Exercise, ExerciseId, NewExercise, User, UserId, Workout, WorkoutId};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("fixture timestamp is valid")
}

pub(crate) fn earlier_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 7, 0, 0)
        .single()
        .expect("fixture timestamp is valid")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("fixture ids are positive")
}

pub(crate) fn workout_id(raw: i64) -> WorkoutId {
    WorkoutId::new(raw).expect("fixture ids are positive")
}

pub(crate) fn exercise_id(raw: i64) -> ExerciseId {
    ExerciseId::new(raw).expect("fixture ids are positive")
}

/// A saved user created before the fixture clock's "now".
pub(crate) fn stored_user(raw_id: i64, username: &str) -> User {
    User {
        id: Some(user_id(raw_id)),
        username: username.to_owned(),
        email: format!("{username}@x.com"),
        created_at: earlier_timestamp(),
        updated_at: earlier_timestamp(),
    }
}

/// A saved workout with no exercises.
pub(crate) fn stored_workout(raw_id: i64, owner: i64, name: &str) -> Workout {
    Workout {
        id: Some(workout_id(raw_id)),
        user_id: user_id(owner),
        name: name.to_owned(),
        description: None,
        duration_minutes: None,
        exercise_count: 0,
        exercises: Vec::new(),
        created_at: earlier_timestamp(),
        updated_at: earlier_timestamp(),
    }
}

/// A saved exercise belonging to `workout`.
pub(crate) fn stored_exercise(raw_id: i64, workout: i64, name: &str) -> Exercise {
    let mut exercise = Exercise::new(
        workout_id(workout),
        NewExercise {
            name: name.to_owned(),
            sets: Some(3),
            reps: Some(10),
            ..NewExercise::default()
        },
        earlier_timestamp(),
    );
    exercise.id = Some(exercise_id(raw_id));
    exercise
}
