//! Domain entities, identifiers, ports, and use-case services.
//!
//! Purpose: hold the gym-buddy business rules independent of transport and
//! storage. Entities validate themselves; services orchestrate validation,
//! timestamps, and cross-aggregate checks; ports describe what the domain
//! needs from adapters.
//!
//! Public surface:
//! - `User`, `Workout`, `Exercise` with their draft (`New*`) and patch
//!   (`*Patch`) companions.
//! - `UserId`, `WorkoutId`, `ExerciseId` and `ResourceKind`.
//! - `Error` / `ErrorCode`, the transport-agnostic failure payload.
//! - `UserService`, `WorkoutService`, `ExerciseService`.

pub mod error;
pub mod exercise;
mod exercise_service;
pub mod ids;
mod port_error_mapping;
pub mod ports;
#[cfg(test)]
mod service_test_support;
mod text;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod workout;
mod workout_service;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::exercise::{Exercise, ExercisePatch, ExerciseValidationError, NewExercise};
pub use self::exercise_service::ExerciseService;
pub use self::ids::{ExerciseId, IdValidationError, ResourceKind, UserId, WorkoutId};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserPatch, UserValidationError};
pub use self::user_service::UserService;
pub use self::workout::{NewWorkout, Workout, WorkoutPatch, WorkoutValidationError};
pub use self::workout_service::WorkoutService;
