//! Exercise API handlers.
//!
//! ```text
//! POST   /api/v1/workouts/{id}/exercises {"name":"Squat","sets":5,"reps":5}
//! GET    /api/v1/workouts/{id}/exercises
//! GET    /api/v1/exercises/{id}
//! PUT    /api/v1/exercises/{id} {"weightKg":102.5}
//! DELETE /api/v1/exercises/{id}
//! ```
//!
//! Exercises are created under their workout's path; the workout id in the
//! URL is authoritative.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Exercise, ExercisePatch, NewExercise};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/workouts/{id}/exercises`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateExerciseRequest {
    #[schema(example = "Back squat")]
    pub name: String,
    #[schema(example = 5)]
    pub sets: Option<i32>,
    #[schema(example = 5)]
    pub reps: Option<i32>,
    #[schema(example = 100.0)]
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub order_index: Option<i32>,
}

impl From<CreateExerciseRequest> for NewExercise {
    fn from(value: CreateExerciseRequest) -> Self {
        Self {
            name: value.name,
            sets: value.sets,
            reps: value.reps,
            weight_kg: value.weight_kg,
            notes: value.notes,
            order_index: value.order_index,
        }
    }
}

/// Request body for `PUT /api/v1/exercises/{id}`. Absent fields are left as is.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub order_index: Option<i32>,
}

impl From<UpdateExerciseRequest> for ExercisePatch {
    fn from(value: UpdateExerciseRequest) -> Self {
        Self {
            name: value.name,
            sets: value.sets,
            reps: value.reps,
            weight_kg: value.weight_kg,
            notes: value.notes,
            order_index: value.order_index,
        }
    }
}

/// Exercise representation, also embedded in workout responses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub order_index: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Exercise> for ExerciseResponse {
    type Error = Error;

    fn try_from(exercise: Exercise) -> Result<Self, Self::Error> {
        let id = exercise
            .id
            .ok_or_else(|| Error::internal("stored exercise is missing its id"))?;
        Ok(Self {
            id: id.get(),
            workout_id: exercise.workout_id.get(),
            name: exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            weight_kg: exercise.weight_kg,
            notes: exercise.notes,
            order_index: exercise.order_index,
            created_at: exercise.created_at,
        })
    }
}

pub(crate) fn to_responses(exercises: Vec<Exercise>) -> ApiResult<Vec<ExerciseResponse>> {
    exercises
        .into_iter()
        .map(ExerciseResponse::try_from)
        .collect()
}

/// Add an exercise to a workout.
#[utoipa::path(
    post,
    path = "/api/v1/workouts/{id}/exercises",
    params(("id" = i64, Path, description = "Workout identifier")),
    request_body = CreateExerciseRequest,
    responses(
        (status = 201, description = "Exercise created", body = ExerciseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Workout not found", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "createExercise"
)]
#[post("/workouts/{id}/exercises")]
pub async fn create_exercise(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CreateExerciseRequest>,
) -> ApiResult<HttpResponse> {
    let exercise = state
        .exercises
        .create_exercise(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ExerciseResponse::try_from(exercise)?))
}

/// List a workout's exercises in display order.
#[utoipa::path(
    get,
    path = "/api/v1/workouts/{id}/exercises",
    params(("id" = i64, Path, description = "Workout identifier")),
    responses(
        (status = 200, description = "Exercises", body = [ExerciseResponse]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Workout not found", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "listWorkoutExercises"
)]
#[get("/workouts/{id}/exercises")]
pub async fn list_workout_exercises(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<ExerciseResponse>>> {
    let exercises = state
        .exercises
        .get_exercises_by_workout_id(path.into_inner())
        .await?;
    Ok(web::Json(to_responses(exercises)?))
}

/// Fetch one exercise.
#[utoipa::path(
    get,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise identifier")),
    responses(
        (status = 200, description = "Exercise", body = ExerciseResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Exercise not found", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExercise"
)]
#[get("/exercises/{id}")]
pub async fn get_exercise(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ExerciseResponse>> {
    let exercise = state.exercises.get_exercise_by_id(path.into_inner()).await?;
    Ok(web::Json(ExerciseResponse::try_from(exercise)?))
}

/// Update an exercise. The owning workout cannot change.
#[utoipa::path(
    put,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise identifier")),
    request_body = UpdateExerciseRequest,
    responses(
        (status = 200, description = "Exercise updated", body = ExerciseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Exercise not found", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "updateExercise"
)]
#[put("/exercises/{id}")]
pub async fn update_exercise(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateExerciseRequest>,
) -> ApiResult<web::Json<ExerciseResponse>> {
    let exercise = state
        .exercises
        .update_exercise(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(ExerciseResponse::try_from(exercise)?))
}

/// Delete an exercise and drop it from its workout's count.
#[utoipa::path(
    delete,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise identifier")),
    responses(
        (status = 204, description = "Exercise deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Exercise not found", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "deleteExercise"
)]
#[delete("/exercises/{id}")]
pub async fn delete_exercise(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.exercises.delete_exercise(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the exercise handlers on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_exercise)
        .service(list_workout_exercises)
        .service(get_exercise)
        .service(update_exercise)
        .service(delete_exercise);
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
