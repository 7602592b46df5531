//! Health endpoints: liveness and readiness probes for orchestration, plus
//! an application status document under the API scope.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const APPLICATION_NAME: &str = "gym-buddy";

/// Shared readiness flag; liveness needs no state.
#[derive(Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a new health state starting as not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once the server is initialised, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 whenever the process can answer.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Server is alive"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HealthState::probe_response(true)
}

/// Application status document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "UP")]
    pub status: String,
    #[schema(example = "gym-buddy")]
    pub application: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Report that the application is up, with its name and version.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tags = ["health"],
    operation_id = "applicationStatus",
    responses((status = 200, description = "Application status", body = StatusResponse))
)]
#[get("/health")]
pub async fn status() -> web::Json<StatusResponse> {
    web::Json(StatusResponse {
        status: "UP".to_owned(),
        application: APPLICATION_NAME.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}
