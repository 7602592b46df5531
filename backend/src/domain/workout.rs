//! Workout aggregate and its exercise collection.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::Error;
use super::exercise::Exercise;
use super::ids::{ExerciseId, UserId, WorkoutId};
use super::text::{is_blank, supplied};

/// Validation failures reported by [`Workout::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WorkoutValidationError {
    /// Name is missing or whitespace.
    #[error("Workout name cannot be empty")]
    EmptyName,
}

impl From<WorkoutValidationError> for Error {
    fn from(err: WorkoutValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
    }
}

/// Fields supplied when planning a workout.
///
/// `user_id` stays raw here; the service wraps it in a [`UserId`] and checks
/// that the user exists before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWorkout {
    /// Raw identifier of the owning user.
    pub user_id: i64,
    /// Display name, such as "Leg Day".
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Planned duration.
    pub duration_minutes: Option<i32>,
}

/// Partial update for a workout. The owner cannot change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutPatch {
    /// Replacement name; blank values are ignored.
    pub name: Option<String>,
    /// Replacement description; blank values are ignored.
    pub description: Option<String>,
    /// Replacement duration.
    pub duration_minutes: Option<i32>,
}

/// A training session belonging to one user.
///
/// ## Invariants
/// - `exercise_count == exercises.len()` after every
///   [`Workout::add_exercise`] or [`Workout::remove_exercise`].
/// - `user_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Storage-assigned identifier.
    pub id: Option<WorkoutId>,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Planned duration.
    pub duration_minutes: Option<i32>,
    /// Number of exercises in the workout.
    pub exercise_count: i32,
    /// Exercises in the workout.
    pub exercises: Vec<Exercise>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Build an empty, unsaved workout for `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, draft: NewWorkout, now: DateTime<Utc>) -> Self {
        let NewWorkout {
            name,
            description,
            duration_minutes,
            ..
        } = draft;
        Self {
            id: None,
            user_id,
            name,
            description,
            duration_minutes,
            exercise_count: 0,
            exercises: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the structural invariants.
    ///
    /// The owner id is positive by construction of [`UserId`]; whether that
    /// user exists is a storage question answered by the service.
    ///
    /// # Errors
    /// Returns [`WorkoutValidationError::EmptyName`] for a blank name.
    pub fn validate(&self) -> Result<(), WorkoutValidationError> {
        if is_blank(&self.name) {
            return Err(WorkoutValidationError::EmptyName);
        }
        Ok(())
    }

    /// Merge supplied fields and refresh `updated_at`.
    pub fn apply(&mut self, patch: WorkoutPatch, now: DateTime<Utc>) {
        if let Some(name) = supplied(patch.name) {
            self.name = name;
        }
        if let Some(description) = supplied(patch.description) {
            self.description = Some(description);
        }
        if let Some(minutes) = patch.duration_minutes {
            self.duration_minutes = Some(minutes);
        }
        self.updated_at = now;
    }

    /// Add `exercise` unless the workout already holds it.
    ///
    /// Returns `true` when the collection grew.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use gym_buddy::domain::{Exercise, NewExercise, NewWorkout, UserId, Workout, WorkoutId};
    ///
    /// let now = Utc::now();
    /// let mut workout = Workout::new(
    ///     UserId::new(1).unwrap(),
    ///     NewWorkout { name: "Leg Day".into(), ..NewWorkout::default() },
    ///     now,
    /// );
    /// let squat = Exercise::new(
    ///     WorkoutId::new(1).unwrap(),
    ///     NewExercise { name: "Squat".into(), ..NewExercise::default() },
    ///     now,
    /// );
    /// assert!(workout.add_exercise(squat.clone()));
    /// assert!(!workout.add_exercise(squat));
    /// assert_eq!(workout.exercise_count, 1);
    /// ```
    pub fn add_exercise(&mut self, exercise: Exercise) -> bool {
        if self
            .exercises
            .iter()
            .any(|existing| existing.same_identity(&exercise))
        {
            return false;
        }
        self.exercises.push(exercise);
        self.recount();
        true
    }

    /// Remove the exercise with `id`, returning it when present.
    pub fn remove_exercise(&mut self, id: ExerciseId) -> Option<Exercise> {
        let position = self
            .exercises
            .iter()
            .position(|exercise| exercise.id == Some(id))?;
        let removed = self.exercises.remove(position);
        self.recount();
        Some(removed)
    }

    fn recount(&mut self) {
        self.exercise_count = i32::try_from(self.exercises.len()).unwrap_or(i32::MAX);
    }
}
