// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training session REST endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{ActivityType, NewTraining, TrainingDto};
use crate::time_utils::parse_day_or_datetime;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/trainings", get(list_trainings).post(create_training))
        .route(
            "/v1/trainings/activity-type",
            get(list_trainings_by_activity_type),
        )
        .route(
            "/v1/trainings/finished/{after}",
            get(list_trainings_finished_after),
        )
        .route("/v1/trainings/user/{user_id}", get(list_trainings_by_user))
        .route(
            "/v1/trainings/{training_id}",
            get(get_training).put(update_training),
        )
}

/// Payload for creating or fully replacing a training.
///
/// `activity_type` is free text matched case-insensitively against the known
/// kinds; `distance` and `average_speed` default to 0 when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct TrainingRequest {
    pub user_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity_type: String,
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    pub distance: Option<f64>,
    #[validate(range(min = 0.0, message = "average_speed must not be negative"))]
    pub average_speed: Option<f64>,
}

impl TrainingRequest {
    fn into_new_training(self) -> Result<NewTraining> {
        let activity_type = ActivityType::parse(&self.activity_type)?;
        Ok(NewTraining {
            user_id: self.user_id,
            start_time: self.start_time,
            end_time: self.end_time,
            activity_type,
            distance: self.distance.unwrap_or(0.0),
            average_speed: self.average_speed.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ActivityTypeQuery {
    pub activity_type: String,
}

async fn list_trainings(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TrainingDto>>> {
    let trainings = state.trainings.list_all().await?;
    Ok(Json(trainings.iter().map(TrainingDto::from).collect()))
}

async fn get_training(
    State(state): State<Arc<AppState>>,
    Path(training_id): Path<i64>,
) -> Result<Json<TrainingDto>> {
    let training = state
        .trainings
        .get_by_id(training_id)
        .await?
        .ok_or(AppError::TrainingNotFound(training_id))?;
    Ok(Json(TrainingDto::from(&training)))
}

/// Trainings for one user. An unknown user yields an empty list, not a 404,
/// so orphaned trainings stay reachable after their user is deleted.
async fn list_trainings_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<TrainingDto>>> {
    let trainings = state.trainings.list_by_user(user_id).await?;
    Ok(Json(trainings.iter().map(TrainingDto::from).collect()))
}

/// Trainings whose end time is strictly after the given instant. Accepts a
/// plain `yyyy-mm-dd` day (midnight UTC) or a full RFC 3339 timestamp.
async fn list_trainings_finished_after(
    State(state): State<Arc<AppState>>,
    Path(after): Path<String>,
) -> Result<Json<Vec<TrainingDto>>> {
    let cutoff = parse_day_or_datetime(&after)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {after}")))?;
    let trainings = state.trainings.list_completed_after(cutoff).await?;
    Ok(Json(trainings.iter().map(TrainingDto::from).collect()))
}

async fn list_trainings_by_activity_type(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActivityTypeQuery>,
) -> Result<Json<Vec<TrainingDto>>> {
    let activity_type = ActivityType::parse(&query.activity_type)?;
    let trainings = state.trainings.list_by_activity_type(activity_type).await?;
    Ok(Json(trainings.iter().map(TrainingDto::from).collect()))
}

async fn create_training(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrainingRequest>,
) -> Result<(StatusCode, Json<TrainingDto>)> {
    req.validate()?;
    let training = state.trainings.create(req.into_new_training()?).await?;
    Ok((StatusCode::CREATED, Json(TrainingDto::from(&training))))
}

/// Full replace of an existing training, including the user reference.
async fn update_training(
    State(state): State<Arc<AppState>>,
    Path(training_id): Path<i64>,
    Json(req): Json<TrainingRequest>,
) -> Result<Json<TrainingDto>> {
    req.validate()?;
    let training = state
        .trainings
        .update(training_id, req.into_new_training()?)
        .await?;
    Ok(Json(TrainingDto::from(&training)))
}
