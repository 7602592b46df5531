//! User aggregate.
//!
//! A user owns zero or more workouts. Deleting a user removes its workouts
//! and their exercises; storage adapters are responsible for that cascade.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::Error;
use super::ids::UserId;
use super::text::{is_blank, supplied};

/// Validation failures reported by [`User::validate`].
///
/// Variants are listed in the order the rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username is missing or whitespace.
    #[error("Username cannot be empty")]
    EmptyUsername,
    /// Email is missing or whitespace.
    #[error("Email cannot be empty")]
    EmptyEmail,
    /// Email lacks an `@`.
    #[error("Email must be valid")]
    InvalidEmail,
}

impl UserValidationError {
    const fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyEmail | Self::InvalidEmail => "email",
        }
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
    }
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Requested unique username.
    pub username: String,
    /// Contact email address.
    pub email: String,
}

/// Partial update for a user.
///
/// `None` and blank strings both leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement username.
    pub username: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
}

/// A registered gym-goer.
///
/// ## Invariants
/// - `id` is `None` until storage assigns one and never changes afterwards.
/// - After [`User::validate`] succeeds, `username` and `email` are non-blank
///   and `email` contains `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: Option<UserId>,
    /// Unique login handle.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user stamped with `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use gym_buddy::domain::{NewUser, User};
    ///
    /// let now = Utc::now();
    /// let user = User::new(
    ///     NewUser { username: "alice".into(), email: "alice@x.com".into() },
    ///     now,
    /// );
    /// assert!(user.id.is_none());
    /// assert_eq!(user.created_at, user.updated_at);
    /// ```
    #[must_use]
    pub fn new(draft: NewUser, now: DateTime<Utc>) -> Self {
        let NewUser { username, email } = draft;
        Self {
            id: None,
            username,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the structural invariants, reporting the first rule broken.
    ///
    /// # Errors
    /// Returns the [`UserValidationError`] for the first failing rule.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if is_blank(&self.username) {
            return Err(UserValidationError::EmptyUsername);
        }
        if is_blank(&self.email) {
            return Err(UserValidationError::EmptyEmail);
        }
        if !self.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Merge supplied fields and refresh `updated_at`.
    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(username) = supplied(patch.username) {
            self.username = username;
        }
        if let Some(email) = supplied(patch.email) {
            self.email = email;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    //! Validation order and merge rules.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn alice(created: DateTime<Utc>) -> User {
        User::new(
            NewUser {
                username: "alice".to_owned(),
                email: "alice@x.com".to_owned(),
            },
            created,
        )
    }

    #[rstest]
    fn accepts_well_formed_user(alice: User) {
        assert_eq!(alice.validate(), Ok(()));
    }

    #[rstest]
    #[case("", "alice@x.com", UserValidationError::EmptyUsername)]
    #[case("  ", "", UserValidationError::EmptyUsername)]
    #[case("alice", " ", UserValidationError::EmptyEmail)]
    #[case("alice", "alice.x.com", UserValidationError::InvalidEmail)]
    fn reports_first_broken_rule(
        mut alice: User,
        #[case] username: &str,
        #[case] email: &str,
        #[case] expected: UserValidationError,
    ) {
        alice.username = username.to_owned();
        alice.email = email.to_owned();
        assert_eq!(alice.validate(), Err(expected));
    }

    #[rstest]
    fn validation_error_maps_to_invalid_request() {
        let err = Error::from(UserValidationError::InvalidEmail);
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Email must be valid");
        assert_eq!(err.details(), Some(&json!({ "field": "email" })));
    }

    #[rstest]
    fn apply_changes_only_supplied_fields(mut alice: User, created: DateTime<Utc>) {
        let later = created + chrono::Duration::hours(1);
        alice.apply(
            UserPatch {
                username: Some("   ".to_owned()),
                email: Some("new@x.com".to_owned()),
            },
            later,
        );
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.email, "new@x.com");
        assert_eq!(alice.created_at, created);
        assert_eq!(alice.updated_at, later);
    }
}
