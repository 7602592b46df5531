//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `service_unavailable`, constraint violations
//! become `conflict`, and everything else is an internal error whose message
//! the HTTP adapter redacts.

use tracing::warn;

use super::Error;
use super::ports::{ExercisePersistenceError, UserPersistenceError, WorkoutPersistenceError};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    warn!(%error, "user persistence failed");
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { message } => Error::conflict(message),
    }
}

pub(crate) fn map_workout_error(error: WorkoutPersistenceError) -> Error {
    warn!(%error, "workout persistence failed");
    match error {
        WorkoutPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("workout repository unavailable: {message}"))
        }
        WorkoutPersistenceError::Query { message } => {
            Error::internal(format!("workout repository error: {message}"))
        }
        WorkoutPersistenceError::Conflict { message } => Error::conflict(message),
    }
}

pub(crate) fn map_exercise_error(error: ExercisePersistenceError) -> Error {
    warn!(%error, "exercise persistence failed");
    match error {
        ExercisePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("exercise repository unavailable: {message}"))
        }
        ExercisePersistenceError::Query { message } => {
            Error::internal(format!("exercise repository error: {message}"))
        }
        ExercisePersistenceError::Conflict { message } => Error::conflict(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(
        UserPersistenceError::connection("refused"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::conflict("username taken"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(map_user_error(error).code(), code);
    }

    #[rstest]
    fn conflict_message_is_passed_through() {
        let err = map_workout_error(WorkoutPersistenceError::conflict("owner missing"));
        assert_eq!(err.message(), "owner missing");
    }

    #[rstest]
    fn connection_failures_name_the_repository() {
        let err = map_exercise_error(ExercisePersistenceError::connection("pool timed out"));
        assert_eq!(
            err.message(),
            "exercise repository unavailable: pool timed out"
        );
    }
}
