// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User REST endpoints.
//!
//! Handlers parse and validate wire input, call one service operation, and
//! map the result; business rules live in the service layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{NewUser, UserBasicDto, UserDto, UserUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/users", get(list_users).post(create_user))
        .route("/v1/users/basic-info", get(list_users_basic))
        .route("/v1/users/email/{email}", get(get_user_by_email))
        .route("/v1/users/older-than/{age}", get(list_users_older_than))
        .route(
            "/v1/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Payload for creating a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    pub birthdate: NaiveDate,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

/// Payload for a partial user update; omitted fields keep their values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserDto>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users.iter().map(UserDto::from).collect()))
}

/// Summary listing: id plus joined name only.
async fn list_users_basic(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserBasicDto>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users.iter().map(UserBasicDto::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserDto>> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::UserNotFound(user_id))?;
    Ok(Json(UserDto::from(&user)))
}

async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<UserDto>> {
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with email {email}")))?;
    Ok(Json(UserDto::from(&user)))
}

async fn list_users_older_than(
    State(state): State<Arc<AppState>>,
    Path(age): Path<u32>,
) -> Result<Json<Vec<UserDto>>> {
    let users = state.users.list_older_than(age).await?;
    Ok(Json(users.iter().map(UserDto::from).collect()))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>)> {
    req.validate()?;
    let user = state
        .users
        .create(NewUser {
            first_name: req.first_name,
            last_name: req.last_name,
            birthdate: req.birthdate,
            email: req.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(&user))))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserDto>> {
    req.validate()?;
    let user = state
        .users
        .update(
            user_id,
            UserUpdate {
                first_name: req.first_name,
                last_name: req.last_name,
                birthdate: req.birthdate,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(UserDto::from(&user)))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode> {
    state.users.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
