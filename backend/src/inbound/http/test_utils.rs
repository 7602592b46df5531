//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::domain::ports::{MockExerciseUseCase, MockUserUseCase, MockWorkoutUseCase};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Use-case mocks handed to [`test_app`]. Unset mocks reject every call.
#[derive(Default)]
pub struct MockUseCases {
    pub users: MockUserUseCase,
    pub workouts: MockWorkoutUseCase,
    pub exercises: MockExerciseUseCase,
}

/// Timestamp stamped on every fixture entity.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("fixture timestamp is valid")
}

/// Build an app exposing every resource handler over the given mocks.
pub fn test_app(
    mocks: MockUseCases,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(mocks.users),
        Arc::new(mocks.workouts),
        Arc::new(mocks.exercises),
    );
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

/// Run one request against [`test_app`] and decode the JSON body.
///
/// Empty bodies decode as [`Value::Null`].
pub async fn send(mocks: MockUseCases, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(mocks)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}
