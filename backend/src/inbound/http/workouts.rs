//! Workout API handlers.
//!
//! ```text
//! POST   /api/v1/workouts {"userId":1,"name":"Leg Day","durationMinutes":60}
//! GET    /api/v1/workouts
//! GET    /api/v1/workouts/{id}
//! GET    /api/v1/workouts/user/{userId}
//! PUT    /api/v1/workouts/{id} {"description":"Heavy"}
//! DELETE /api/v1/workouts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewWorkout, Workout, WorkoutPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::exercises::{self, ExerciseResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/workouts`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateWorkoutRequest {
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "Leg Day")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 60)]
    pub duration_minutes: Option<i32>,
}

impl From<CreateWorkoutRequest> for NewWorkout {
    fn from(value: CreateWorkoutRequest) -> Self {
        Self {
            user_id: value.user_id,
            name: value.name,
            description: value.description,
            duration_minutes: value.duration_minutes,
        }
    }
}

/// Request body for `PUT /api/v1/workouts/{id}`. Absent fields are left as is.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
}

impl From<UpdateWorkoutRequest> for WorkoutPatch {
    fn from(value: UpdateWorkoutRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            duration_minutes: value.duration_minutes,
        }
    }
}

/// Workout representation including its exercises.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub exercise_count: i32,
    pub exercises: Vec<ExerciseResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Workout> for WorkoutResponse {
    type Error = Error;

    fn try_from(workout: Workout) -> Result<Self, Self::Error> {
        let id = workout
            .id
            .ok_or_else(|| Error::internal("stored workout is missing its id"))?;
        Ok(Self {
            id: id.get(),
            user_id: workout.user_id.get(),
            name: workout.name,
            description: workout.description,
            duration_minutes: workout.duration_minutes,
            exercise_count: workout.exercise_count,
            exercises: exercises::to_responses(workout.exercises)?,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
        })
    }
}

fn to_responses(workouts: Vec<Workout>) -> ApiResult<Vec<WorkoutResponse>> {
    workouts
        .into_iter()
        .map(WorkoutResponse::try_from)
        .collect()
}

/// Create a workout for an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Owning user not found", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "createWorkout"
)]
#[post("/workouts")]
pub async fn create_workout(
    state: web::Data<HttpState>,
    payload: web::Json<CreateWorkoutRequest>,
) -> ApiResult<HttpResponse> {
    let workout = state
        .workouts
        .create_workout(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(WorkoutResponse::try_from(workout)?))
}

/// List every workout.
#[utoipa::path(
    get,
    path = "/api/v1/workouts",
    responses(
        (status = 200, description = "Workouts", body = [WorkoutResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "listWorkouts"
)]
#[get("/workouts")]
pub async fn list_workouts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<WorkoutResponse>>> {
    let workouts = state.workouts.get_all_workouts().await?;
    Ok(web::Json(to_responses(workouts)?))
}

/// List the workouts owned by a user. Unknown users yield an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/workouts/user/{userId}",
    params(("userId" = i64, Path, description = "Owning user identifier")),
    responses(
        (status = 200, description = "Workouts", body = [WorkoutResponse]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "listUserWorkouts"
)]
#[get("/workouts/user/{userId}")]
pub async fn list_user_workouts(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<WorkoutResponse>>> {
    let workouts = state
        .workouts
        .get_workouts_by_user_id(path.into_inner())
        .await?;
    Ok(web::Json(to_responses(workouts)?))
}

/// Fetch one workout with its exercises.
#[utoipa::path(
    get,
    path = "/api/v1/workouts/{id}",
    params(("id" = i64, Path, description = "Workout identifier")),
    responses(
        (status = 200, description = "Workout", body = WorkoutResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Workout not found", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "getWorkout"
)]
#[get("/workouts/{id}")]
pub async fn get_workout(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<WorkoutResponse>> {
    let workout = state.workouts.get_workout_by_id(path.into_inner()).await?;
    Ok(web::Json(WorkoutResponse::try_from(workout)?))
}

/// Update a workout's name, description, or duration.
#[utoipa::path(
    put,
    path = "/api/v1/workouts/{id}",
    params(("id" = i64, Path, description = "Workout identifier")),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Workout not found", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "updateWorkout"
)]
#[put("/workouts/{id}")]
pub async fn update_workout(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateWorkoutRequest>,
) -> ApiResult<web::Json<WorkoutResponse>> {
    let workout = state
        .workouts
        .update_workout(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(WorkoutResponse::try_from(workout)?))
}

/// Delete a workout and its exercises.
#[utoipa::path(
    delete,
    path = "/api/v1/workouts/{id}",
    params(("id" = i64, Path, description = "Workout identifier")),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Workout not found", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "deleteWorkout"
)]
#[delete("/workouts/{id}")]
pub async fn delete_workout(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.workouts.delete_workout(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the workout handlers on a scope.
///
/// `/workouts/user/{userId}` is registered ahead of `/workouts/{id}` so the
/// literal segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_workout)
        .service(list_workouts)
        .service(list_user_workouts)
        .service(get_workout)
        .service(update_workout)
        .service(delete_workout);
}

#[cfg(test)]
#[path = "workouts_tests.rs"]
mod tests;
