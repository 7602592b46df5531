//! Tests for the user service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockUserPort, UserPersistenceError};
use crate::domain::service_test_support::{
    earlier_timestamp, fixture_clock, fixture_timestamp, stored_user, user_id,
};

fn service(port: MockUserPort) -> UserService<MockUserPort> {
    UserService::new(Arc::new(port), fixture_clock())
}

fn alice_draft() -> NewUser {
    NewUser {
        username: "alice".to_owned(),
        email: "alice@x.com".to_owned(),
    }
}

#[tokio::test]
async fn create_user_stamps_timestamps_and_saves() {
    let mut port = MockUserPort::new();
    port.expect_save()
        .withf(|user| {
            user.id.is_none()
                && user.created_at == fixture_timestamp()
                && user.updated_at == fixture_timestamp()
        })
        .times(1)
        .returning(|mut user| {
            user.id = Some(user_id(1));
            Ok(user)
        });

    let created = service(port)
        .create_user(alice_draft())
        .await
        .expect("create succeeds");

    assert_eq!(created.id, Some(user_id(1)));
    assert_eq!(created.username, "alice");
    assert_eq!(created.created_at, created.updated_at);
}

#[rstest]
#[case("", "alice@x.com", "Username cannot be empty")]
#[case("alice", "", "Email cannot be empty")]
#[case("alice", "alice.x.com", "Email must be valid")]
#[tokio::test]
async fn create_user_rejects_invalid_users_without_saving(
    #[case] username: &str,
    #[case] email: &str,
    #[case] message: &str,
) {
    let mut port = MockUserPort::new();
    port.expect_save().times(0);

    let err = service(port)
        .create_user(NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
        })
        .await
        .expect_err("validation fails");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), message);
}

#[tokio::test]
async fn create_user_reports_duplicate_username_as_conflict() {
    let mut port = MockUserPort::new();
    port.expect_save()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::conflict("username already exists")));

    let err = service(port)
        .create_user(alice_draft())
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn get_user_by_id_reports_missing_user() {
    let mut port = MockUserPort::new();
    port.expect_find_by_id()
        .with(eq(user_id(7)))
        .times(1)
        .return_once(|_| Ok(None));

    let err = service(port)
        .get_user_by_id(7)
        .await
        .expect_err("user is missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found with ID: 7");
}

#[rstest]
#[case(0)]
#[case(-4)]
#[tokio::test]
async fn get_user_by_id_rejects_non_positive_ids(#[case] raw: i64) {
    let mut port = MockUserPort::new();
    port.expect_find_by_id().times(0);

    let err = service(port)
        .get_user_by_id(raw)
        .await
        .expect_err("id rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "User ID must be a positive number");
}

#[tokio::test]
async fn get_all_users_maps_connection_failures() {
    let mut port = MockUserPort::new();
    port.expect_find_all()
        .times(1)
        .return_once(|| Err(UserPersistenceError::connection("pool exhausted")));

    let err = service(port)
        .get_all_users()
        .await
        .expect_err("storage unavailable");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn update_user_changes_only_supplied_fields() {
    let mut port = MockUserPort::new();
    port.expect_find_by_id()
        .with(eq(user_id(1)))
        .return_once(|_| Ok(Some(stored_user(1, "alice"))));
    port.expect_save().times(1).returning(Ok);

    let updated = service(port)
        .update_user(
            1,
            UserPatch {
                username: None,
                email: Some("new@x.com".to_owned()),
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.id, Some(user_id(1)));
    assert_eq!(updated.username, "alice");
    assert_eq!(updated.email, "new@x.com");
    assert_eq!(updated.created_at, earlier_timestamp());
    assert_eq!(updated.updated_at, fixture_timestamp());
}

#[tokio::test]
async fn update_user_revalidates_the_merged_user() {
    let mut port = MockUserPort::new();
    port.expect_find_by_id()
        .return_once(|_| Ok(Some(stored_user(1, "alice"))));
    port.expect_save().times(0);

    let err = service(port)
        .update_user(
            1,
            UserPatch {
                username: None,
                email: Some("no-at-sign".to_owned()),
            },
        )
        .await
        .expect_err("merged email is invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Email must be valid");
}

#[tokio::test]
async fn update_user_reports_missing_user() {
    let mut port = MockUserPort::new();
    port.expect_find_by_id().return_once(|_| Ok(None));
    port.expect_save().times(0);

    let err = service(port)
        .update_user(3, UserPatch::default())
        .await
        .expect_err("user is missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found with ID: 3");
}

#[tokio::test]
async fn delete_user_requires_existing_user() {
    let mut port = MockUserPort::new();
    port.expect_find_by_id().return_once(|_| Ok(None));
    port.expect_delete_by_id().times(0);

    let err = service(port)
        .delete_user(42)
        .await
        .expect_err("user is missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_user_removes_existing_user() {
    let mut port = MockUserPort::new();
    port.expect_find_by_id()
        .return_once(|_| Ok(Some(stored_user(5, "bob"))));
    port.expect_delete_by_id()
        .with(eq(user_id(5)))
        .times(1)
        .return_once(|_| Ok(()));

    service(port).delete_user(5).await.expect("delete succeeds");
}
