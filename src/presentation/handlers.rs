// HTTP request handlers
use crate::domain::dashboard::DashboardData;
use crate::domain::fitness::{
    AiRecommendation, DashboardLayoutRecord, FitnessMetrics, Goal, GoalPatch, NewAiRecommendation,
    NewFitnessMetrics, NewGoal, NewNutrition, NewWorkout, Nutrition, Workout,
};
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLayoutPayload {
    pub user_id: i32,
    pub layout_data: serde_json::Value,
}

/// Ids arrive as free text; anything that is not an integer names no record
fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn body<T>(payload: Result<Json<T>, JsonRejection>, message: &'static str) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection);
        ApiError::Validation(message)
    })
}

fn query<T>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query
        .map(|Query(value)| value)
        .map_err(|_| ApiError::Validation("Invalid query parameters"))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Everything the dashboard page needs for one user
pub async fn get_dashboard(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardData>> {
    let Some(user_id) = parse_id(&user_id) else {
        return Err(ApiError::NotFound("User not found"));
    };

    state
        .dashboard_service
        .get_dashboard(user_id)
        .await
        .map_err(ApiError::internal("Failed to fetch dashboard data"))?
        .map(Json)
        .ok_or(ApiError::NotFound("User not found"))
}

pub async fn list_fitness_metrics(
    Path(user_id): Path<String>,
    days: Result<Query<DaysQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FitnessMetrics>>> {
    let days = query(days)?.days;
    let Some(user_id) = parse_id(&user_id) else {
        return Ok(Json(Vec::new()));
    };

    let metrics = state
        .activity_service
        .fitness_metrics(user_id, days)
        .await
        .map_err(ApiError::internal("Failed to fetch fitness metrics"))?;
    Ok(Json(metrics))
}

pub async fn create_fitness_metrics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewFitnessMetrics>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FitnessMetrics>)> {
    let new = body(payload, "Invalid fitness metrics data")?;
    let metrics = state
        .activity_service
        .record_fitness_metrics(new)
        .await
        .map_err(|_| ApiError::Validation("Invalid fitness metrics data"))?;
    Ok((StatusCode::CREATED, Json(metrics)))
}

pub async fn list_workouts(
    Path(user_id): Path<String>,
    limit: Result<Query<LimitQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Workout>>> {
    let limit = query(limit)?.limit;
    let Some(user_id) = parse_id(&user_id) else {
        return Ok(Json(Vec::new()));
    };

    let workouts = state
        .activity_service
        .workouts(user_id, limit)
        .await
        .map_err(ApiError::internal("Failed to fetch workouts"))?;
    Ok(Json(workouts))
}

pub async fn create_workout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewWorkout>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Workout>)> {
    let new = body(payload, "Invalid workout data")?;
    let workout = state
        .activity_service
        .record_workout(new)
        .await
        .map_err(|_| ApiError::Validation("Invalid workout data"))?;
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn list_nutrition(
    Path(user_id): Path<String>,
    days: Result<Query<DaysQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Nutrition>>> {
    let days = query(days)?.days;
    let Some(user_id) = parse_id(&user_id) else {
        return Ok(Json(Vec::new()));
    };

    let nutrition = state
        .activity_service
        .nutrition(user_id, days)
        .await
        .map_err(ApiError::internal("Failed to fetch nutrition data"))?;
    Ok(Json(nutrition))
}

pub async fn create_nutrition(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewNutrition>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Nutrition>)> {
    let new = body(payload, "Invalid nutrition data")?;
    let nutrition = state
        .activity_service
        .record_nutrition(new)
        .await
        .map_err(|_| ApiError::Validation("Invalid nutrition data"))?;
    Ok((StatusCode::CREATED, Json(nutrition)))
}

pub async fn list_goals(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Goal>>> {
    let Some(user_id) = parse_id(&user_id) else {
        return Ok(Json(Vec::new()));
    };

    let goals = state
        .activity_service
        .goals(user_id)
        .await
        .map_err(ApiError::internal("Failed to fetch goals"))?;
    Ok(Json(goals))
}

pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewGoal>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let new = body(payload, "Invalid goal data")?;
    let goal = state
        .activity_service
        .create_goal(new)
        .await
        .map_err(|_| ApiError::Validation("Invalid goal data"))?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GoalPatch>, JsonRejection>,
) -> ApiResult<Json<Goal>> {
    let patch = body(payload, "Failed to update goal")?;
    let Some(id) = parse_id(&id) else {
        return Err(ApiError::NotFound("Goal not found"));
    };

    state
        .activity_service
        .update_goal(id, patch)
        .await
        .map_err(|_| ApiError::Validation("Failed to update goal"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Goal not found"))
}

pub async fn list_recommendations(
    Path(user_id): Path<String>,
    limit: Result<Query<LimitQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AiRecommendation>>> {
    let limit = query(limit)?.limit;
    let Some(user_id) = parse_id(&user_id) else {
        return Ok(Json(Vec::new()));
    };

    let recommendations = state
        .activity_service
        .recommendations(user_id, limit)
        .await
        .map_err(ApiError::internal("Failed to fetch recommendations"))?;
    Ok(Json(recommendations))
}

pub async fn create_recommendation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewAiRecommendation>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AiRecommendation>)> {
    let new = body(payload, "Invalid recommendation data")?;
    let recommendation = state
        .activity_service
        .create_recommendation(new)
        .await
        .map_err(|_| ApiError::Validation("Invalid recommendation data"))?;
    Ok((StatusCode::CREATED, Json(recommendation)))
}

/// Stored layout for a user, or `null` when none was ever saved
pub async fn get_dashboard_layout(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<DashboardLayoutRecord>>> {
    let Some(user_id) = parse_id(&user_id) else {
        return Ok(Json(None));
    };

    let layout = state
        .layout_service
        .get_layout(user_id)
        .await
        .map_err(ApiError::internal("Failed to fetch dashboard layout"))?;
    Ok(Json(layout))
}

/// Upsert the caller's layout and return the stored record
pub async fn save_dashboard_layout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveLayoutPayload>, JsonRejection>,
) -> ApiResult<Json<DashboardLayoutRecord>> {
    let payload = body(payload, "Invalid layout data")?;
    let record = state
        .layout_service
        .save_layout(payload.user_id, payload.layout_data)
        .await
        .map_err(|e| {
            tracing::warn!("Layout save failed: {:#}", e);
            ApiError::Validation("Invalid layout data")
        })?;
    Ok(Json(record))
}
