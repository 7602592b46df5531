//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer and the
//! schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe the
//! domain error without coupling domain types to utoipa.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "gym-buddy backend API",
        description = "Users, their workouts, and the exercises inside them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::workouts::create_workout,
        crate::inbound::http::workouts::list_workouts,
        crate::inbound::http::workouts::list_user_workouts,
        crate::inbound::http::workouts::get_workout,
        crate::inbound::http::workouts::update_workout,
        crate::inbound::http::workouts::delete_workout,
        crate::inbound::http::exercises::create_exercise,
        crate::inbound::http::exercises::list_workout_exercises,
        crate::inbound::http::exercises::get_exercise,
        crate::inbound::http::exercises::update_exercise,
        crate::inbound::http::exercises::delete_exercise,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::health::status,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Registered users"),
        (name = "workouts", description = "Workouts owned by users"),
        (name = "exercises", description = "Exercises performed within a workout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
