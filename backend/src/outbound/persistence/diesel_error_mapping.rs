//! Shared Diesel error mapping for the gym repositories.
//!
//! Each port error exposes connection, query, and conflict constructors. The
//! [`PortErrorKinds`] trait lets one mapping function serve all three
//! repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{ExercisePersistenceError, UserPersistenceError, WorkoutPersistenceError};

use super::pool::PoolError;

/// Constructors shared by the persistence port errors.
pub(crate) trait PortErrorKinds: Sized {
    fn connection_failure(message: String) -> Self;
    fn query_failure(message: String) -> Self;
    fn constraint_conflict(message: String) -> Self;
}

macro_rules! impl_port_error_kinds {
    ($($error:ty),* $(,)?) => {
        $(
            impl PortErrorKinds for $error {
                fn connection_failure(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failure(message: String) -> Self {
                    Self::query(message)
                }

                fn constraint_conflict(message: String) -> Self {
                    Self::conflict(message)
                }
            }
        )*
    };
}

impl_port_error_kinds!(
    UserPersistenceError,
    WorkoutPersistenceError,
    ExercisePersistenceError,
);

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error<E: PortErrorKinds>(error: PoolError) -> E {
    E::connection_failure(error.into_message())
}

/// Map a Diesel error, turning constraint violations into conflicts.
pub(crate) fn map_diesel_error<E: PortErrorKinds>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => E::query_failure("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failure("database query error".to_owned()),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                E::constraint_conflict(unique_violation_message(info.constraint_name()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                E::constraint_conflict(foreign_key_message(info.constraint_name()))
            }
            DatabaseErrorKind::ClosedConnection => {
                E::connection_failure("database connection error".to_owned())
            }
            _ => E::query_failure("database error".to_owned()),
        },
        _ => E::query_failure("database error".to_owned()),
    }
}

/// Map a stored row whose key fails identifier validation.
pub(crate) fn map_corrupt_row<E: PortErrorKinds>(error: impl std::fmt::Display) -> E {
    E::query_failure(format!("stored row is invalid: {error}"))
}

fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some(name) if name.contains("username") => "username already exists".to_owned(),
        Some(name) if name.contains("email") => "email already exists".to_owned(),
        _ => "record already exists".to_owned(),
    }
}

fn foreign_key_message(constraint: Option<&str>) -> String {
    match constraint {
        Some(name) if name.contains("user_id") => "referenced user does not exist".to_owned(),
        Some(name) if name.contains("workout_id") => {
            "referenced workout does not exist".to_owned()
        }
        _ => "referenced record does not exist".to_owned(),
    }
}
