//! Shared helpers for HTTP integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory app wiring
//! lives here instead of being repeated in every test file.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use gym_buddy::Trace;
use gym_buddy::domain::{ExerciseService, UserService, WorkoutService};
use gym_buddy::inbound::http::configure;
use gym_buddy::inbound::http::state::HttpState;
use gym_buddy::outbound::memory::InMemoryStore;
use mockable::{Clock, DefaultClock};
use serde_json::Value;

/// Decoded response: status, optional `trace-id` header, and JSON body.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// State wired over one empty [`InMemoryStore`].
pub fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState::new(
        Arc::new(UserService::new(Arc::clone(&store), Arc::clone(&clock))),
        Arc::new(WorkoutService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&clock))),
        Arc::new(ExerciseService::new(Arc::clone(&store), store, clock)),
    )
}

/// Initialise the full API over fresh in-memory storage.
pub async fn memory_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Send `request` and decode the reply. Empty bodies decode as `Value::Null`.
pub async fn call<S>(app: &S, request: test::TestRequest) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}
