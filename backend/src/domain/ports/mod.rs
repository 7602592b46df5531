//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Port`) describe what the domain needs from storage.
//! Driving ports (`*UseCase`) describe what inbound adapters may ask of the
//! domain.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_port;
mod exercise_use_case;
mod user_port;
mod user_use_case;
mod workout_port;
mod workout_use_case;

#[cfg(test)]
pub use exercise_port::MockExercisePort;
pub use exercise_port::{ExercisePersistenceError, ExercisePort};
#[cfg(test)]
pub use exercise_use_case::MockExerciseUseCase;
pub use exercise_use_case::ExerciseUseCase;
#[cfg(test)]
pub use user_port::MockUserPort;
pub use user_port::{UserPersistenceError, UserPort};
#[cfg(test)]
pub use user_use_case::MockUserUseCase;
pub use user_use_case::UserUseCase;
#[cfg(test)]
pub use workout_port::MockWorkoutPort;
pub use workout_port::{WorkoutPersistenceError, WorkoutPort};
#[cfg(test)]
pub use workout_use_case::MockWorkoutUseCase;
pub use workout_use_case::WorkoutUseCase;
