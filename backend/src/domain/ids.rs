//! Strongly typed entity identifiers.
//!
//! Storage assigns positive 64-bit integers to users, workouts, and exercises.
//! Wrapping each in its own newtype keeps a workout id from ever being passed
//! where a user id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity kinds addressed by identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A [`crate::domain::User`].
    User,
    /// A [`crate::domain::Workout`].
    Workout,
    /// A [`crate::domain::Exercise`].
    Exercise,
}

impl ResourceKind {
    /// Human-readable entity name used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Workout => "Workout",
            Self::Exercise => "Exercise",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a raw value cannot become an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ID must be a positive number")]
pub struct IdValidationError {
    /// Identifier kind that rejected the value.
    pub kind: ResourceKind,
    /// Rejected raw value.
    pub value: i64,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Entity kind this identifier addresses.
            pub const KIND: ResourceKind = $kind;

            /// Validate and wrap a raw identifier.
            ///
            /// # Errors
            /// Returns [`IdValidationError`] when `raw` is zero or negative.
            pub const fn new(raw: i64) -> Result<Self, IdValidationError> {
                if raw <= 0 {
                    return Err(IdValidationError {
                        kind: $kind,
                        value: raw,
                    });
                }
                Ok(Self(raw))
            }

            /// Raw numeric value for storage adapters.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`crate::domain::User`].
    ///
    /// # Examples
    /// ```
    /// use gym_buddy::domain::UserId;
    ///
    /// let id = UserId::new(7).expect("positive ids are valid");
    /// assert_eq!(id.get(), 7);
    /// assert!(UserId::new(0).is_err());
    /// ```
    UserId,
    ResourceKind::User
);

define_id!(
    /// Identifier of a [`crate::domain::Workout`].
    WorkoutId,
    ResourceKind::Workout
);

define_id!(
    /// Identifier of a [`crate::domain::Exercise`].
    ExerciseId,
    ResourceKind::Exercise
);
