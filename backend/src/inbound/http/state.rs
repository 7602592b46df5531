//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports (use cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseUseCase, UserUseCase, WorkoutUseCase};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserUseCase>,
    pub workouts: Arc<dyn WorkoutUseCase>,
    pub exercises: Arc<dyn ExerciseUseCase>,
}

impl HttpState {
    /// Bundle the three use cases.
    pub fn new(
        users: Arc<dyn UserUseCase>,
        workouts: Arc<dyn WorkoutUseCase>,
        exercises: Arc<dyn ExerciseUseCase>,
    ) -> Self {
        Self {
            users,
            workouts,
            exercises,
        }
    }
}
