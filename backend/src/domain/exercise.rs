//! Exercise entity, always owned by exactly one workout.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::Error;
use super::ids::{ExerciseId, WorkoutId};
use super::text::{is_blank, supplied};

/// Validation failures reported by [`Exercise::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    /// Name is missing or whitespace.
    #[error("Exercise name cannot be empty")]
    EmptyName,
}

impl From<ExerciseValidationError> for Error {
    fn from(err: ExerciseValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
    }
}

/// Fields supplied when adding an exercise to a workout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewExercise {
    /// Movement name, such as "Squat".
    pub name: String,
    /// Planned number of sets.
    pub sets: Option<i32>,
    /// Repetitions per set.
    pub reps: Option<i32>,
    /// Working weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Position within the workout.
    pub order_index: Option<i32>,
}

/// Partial update for an exercise. The owning workout cannot change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExercisePatch {
    /// Replacement name; blank values are ignored.
    pub name: Option<String>,
    /// Replacement set count.
    pub sets: Option<i32>,
    /// Replacement repetition count.
    pub reps: Option<i32>,
    /// Replacement weight.
    pub weight_kg: Option<f64>,
    /// Replacement notes; blank values are ignored.
    pub notes: Option<String>,
    /// Replacement position.
    pub order_index: Option<i32>,
}

/// One movement performed as part of a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    /// Storage-assigned identifier.
    pub id: Option<ExerciseId>,
    /// Owning workout.
    pub workout_id: WorkoutId,
    /// Movement name.
    pub name: String,
    /// Planned number of sets.
    pub sets: Option<i32>,
    /// Repetitions per set.
    pub reps: Option<i32>,
    /// Working weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Position within the workout.
    pub order_index: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Build an unsaved exercise attached to `workout_id`.
    #[must_use]
    pub fn new(workout_id: WorkoutId, draft: NewExercise, now: DateTime<Utc>) -> Self {
        let NewExercise {
            name,
            sets,
            reps,
            weight_kg,
            notes,
            order_index,
        } = draft;
        Self {
            id: None,
            workout_id,
            name,
            sets,
            reps,
            weight_kg,
            notes,
            order_index,
            created_at: now,
        }
    }

    /// Check the structural invariants.
    ///
    /// The owning workout id is positive by construction of [`WorkoutId`].
    ///
    /// # Errors
    /// Returns [`ExerciseValidationError::EmptyName`] for a blank name.
    pub fn validate(&self) -> Result<(), ExerciseValidationError> {
        if is_blank(&self.name) {
            return Err(ExerciseValidationError::EmptyName);
        }
        Ok(())
    }

    /// Merge the supplied fields.
    pub fn apply(&mut self, patch: ExercisePatch) {
        if let Some(name) = supplied(patch.name) {
            self.name = name;
        }
        if let Some(notes) = supplied(patch.notes) {
            self.notes = Some(notes);
        }
        self.sets = patch.sets.or(self.sets);
        self.reps = patch.reps.or(self.reps);
        self.weight_kg = patch.weight_kg.or(self.weight_kg);
        self.order_index = patch.order_index.or(self.order_index);
    }

    /// Whether `other` denotes the same exercise.
    ///
    /// Saved exercises compare by id; unsaved ones compare field by field.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => self == other,
        }
    }
}
