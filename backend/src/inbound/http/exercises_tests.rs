//! Tests for exercise API handlers.

use super::*;
use crate::domain::{ExerciseId, WorkoutId};
use crate::inbound::http::test_utils::{MockUseCases, fixture_timestamp, send};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn stored_exercise(raw_id: i64, workout: i64, name: &str) -> Exercise {
    let mut exercise = Exercise::new(
        WorkoutId::new(workout).expect("positive id"),
        NewExercise {
            name: name.to_owned(),
            sets: Some(5),
            reps: Some(5),
            weight_kg: Some(100.0),
            ..NewExercise::default()
        },
        fixture_timestamp(),
    );
    exercise.id = Some(ExerciseId::new(raw_id).expect("positive id"));
    exercise
}

#[rstest]
#[actix_web::test]
async fn create_exercise_uses_workout_id_from_path() {
    let mut mocks = MockUseCases::default();
    mocks
        .exercises
        .expect_create_exercise()
        .withf(|workout_id, draft| {
            *workout_id == 7 && draft.name == "Squat" && draft.weight_kg == Some(100.0)
        })
        .times(1)
        .return_once(|_, _| Ok(stored_exercise(3, 7, "Squat")));

    let (status, body) = send(
        mocks,
        actix_test::TestRequest::post()
            .uri("/api/v1/workouts/7/exercises")
            .set_json(json!({"name": "Squat", "sets": 5, "reps": 5, "weightKg": 100.0})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!(3));
    assert_eq!(body["workoutId"], json!(7));
    assert_eq!(body["weightKg"], json!(100.0));
}

#[rstest]
#[actix_web::test]
async fn create_exercise_for_missing_workout_is_not_found() {
    let mut mocks = MockUseCases::default();
    mocks
        .exercises
        .expect_create_exercise()
        .times(1)
        .return_once(|_, _| Err(Error::not_found("Workout not found with ID: 99")));

    let (status, body) = send(
        mocks,
        actix_test::TestRequest::post()
            .uri("/api/v1/workouts/99/exercises")
            .set_json(json!({"name": "Squat"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Workout not found with ID: 99"));
}

#[rstest]
#[actix_web::test]
async fn list_workout_exercises_preserves_order() {
    let mut mocks = MockUseCases::default();
    mocks
        .exercises
        .expect_get_exercises_by_workout_id()
        .withf(|id| *id == 7)
        .times(1)
        .return_once(|_| {
            Ok(vec![
                stored_exercise(1, 7, "Squat"),
                stored_exercise(2, 7, "Deadlift"),
            ])
        });

    let (status, body) = send(
        mocks,
        actix_test::TestRequest::get().uri("/api/v1/workouts/7/exercises"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], json!("Squat"));
    assert_eq!(body[1]["name"], json!("Deadlift"));
}

#[rstest]
#[actix_web::test]
async fn update_exercise_forwards_patch() {
    let mut mocks = MockUseCases::default();
    mocks
        .exercises
        .expect_update_exercise()
        .withf(|id, patch| *id == 3 && patch.name.is_none() && patch.weight_kg == Some(102.5))
        .times(1)
        .return_once(|_, _| {
            let mut exercise = stored_exercise(3, 7, "Squat");
            exercise.weight_kg = Some(102.5);
            Ok(exercise)
        });

    let (status, body) = send(
        mocks,
        actix_test::TestRequest::put()
            .uri("/api/v1/exercises/3")
            .set_json(json!({"weightKg": 102.5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weightKg"], json!(102.5));
}

#[rstest]
#[actix_web::test]
async fn delete_exercise_returns_no_content() {
    let mut mocks = MockUseCases::default();
    mocks
        .exercises
        .expect_delete_exercise()
        .withf(|id| *id == 3)
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = send(
        mocks,
        actix_test::TestRequest::delete().uri("/api/v1/exercises/3"),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn storage_outage_is_service_unavailable() {
    let mut mocks = MockUseCases::default();
    mocks
        .exercises
        .expect_get_exercise_by_id()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("exercise repository unavailable")));

    let (status, _) = send(
        mocks,
        actix_test::TestRequest::get().uri("/api/v1/exercises/1"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
