// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training session service.
//!
//! Every create/update resolves the referenced user first; a training is
//! never persisted against an id that did not exist at check time. There is
//! no store-level foreign key, so a user deleted afterwards leaves orphaned
//! trainings behind, which stay queryable.

use chrono::{DateTime, Utc};

use crate::db::{TrainingStore, UserStore};
use crate::error::{AppError, Result};
use crate::models::{ActivityType, NewTraining, Training};

pub struct TrainingService<T, U> {
    trainings: T,
    users: U,
}

impl<T: TrainingStore, U: UserStore> TrainingService<T, U> {
    pub fn new(trainings: T, users: U) -> Self {
        Self { trainings, users }
    }

    /// Creates a training for an existing user. Fails with `UserNotFound`
    /// or `EndBeforeStart` without persisting anything.
    pub async fn create(&self, data: NewTraining) -> Result<Training> {
        self.ensure_user_exists(data.user_id).await?;
        validate_interval(data.start_time, data.end_time)?;
        let training = self.trainings.insert(data).await?;
        tracing::info!(
            training_id = training.id,
            user_id = training.user_id,
            "Created training"
        );
        Ok(training)
    }

    /// Full replace: every mutable field is overwritten and the user
    /// reference reassigned, even when unchanged.
    pub async fn update(&self, id: i64, data: NewTraining) -> Result<Training> {
        // Resolve the training before the user, so a stale training id
        // reports TrainingNotFound no matter what the payload references.
        if self.trainings.find_by_id(id).await?.is_none() {
            return Err(AppError::TrainingNotFound(id));
        }
        self.ensure_user_exists(data.user_id).await?;
        validate_interval(data.start_time, data.end_time)?;
        let training = Training {
            id,
            user_id: data.user_id,
            start_time: data.start_time,
            end_time: data.end_time,
            activity_type: data.activity_type,
            distance: data.distance,
            average_speed: data.average_speed,
        };
        let training = self.trainings.update(&training).await?;
        tracing::info!(training_id = id, "Updated training");
        Ok(training)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Training>> {
        self.trainings.find_by_id(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Training>> {
        self.trainings.find_all().await
    }

    /// Trainings recorded for `user_id`. Empty for an unknown user, never an
    /// error.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Training>> {
        self.trainings.find_all_by_user_id(user_id).await
    }

    /// Trainings whose end time is strictly after `cutoff`.
    pub async fn list_completed_after(&self, cutoff: DateTime<Utc>) -> Result<Vec<Training>> {
        self.trainings.find_all_by_end_time_after(cutoff).await
    }

    pub async fn list_by_activity_type(&self, activity_type: ActivityType) -> Result<Vec<Training>> {
        self.trainings.find_all_by_activity_type(activity_type).await
    }

    async fn ensure_user_exists(&self, user_id: i64) -> Result<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::UserNotFound(user_id))
    }
}

fn validate_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end < start {
        return Err(AppError::EndBeforeStart);
    }
    Ok(())
}
