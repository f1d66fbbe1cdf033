// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training session model for storage and API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::ActivityType;

/// Recorded training session as persisted by the store.
///
/// `user_id` is a foreign reference, not containment: the user record lives
/// in its own store and may be deleted out from under a training.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    /// Store-assigned identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// When the session started
    pub start_time: DateTime<Utc>,
    /// When the session finished
    pub end_time: DateTime<Utc>,
    /// Kind of activity performed
    pub activity_type: ActivityType,
    /// Distance covered, in kilometers (0 when not recorded)
    pub distance: f64,
    /// Average speed, in km/h (0 when not recorded)
    pub average_speed: f64,
}

/// Payload for creating a training, and for the full-replace update.
///
/// Unlike `UserUpdate`, an update built from this type overwrites every
/// mutable field; there is no partial merge for trainings.
#[derive(Debug, Clone)]
pub struct NewTraining {
    pub user_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub distance: f64,
    pub average_speed: f64,
}

/// Training view exposed over the API.
///
/// Carries the plain `user_id` rather than an embedded user so trainings
/// orphaned by a user deletion still serialize.
#[derive(Debug, Serialize)]
pub struct TrainingDto {
    pub id: i64,
    pub user_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub distance: f64,
    pub average_speed: f64,
}

impl From<&Training> for TrainingDto {
    fn from(training: &Training) -> Self {
        Self {
            id: training.id,
            user_id: training.user_id,
            start_time: training.start_time,
            end_time: training.end_time,
            activity_type: training.activity_type,
            distance: training.distance,
            average_speed: training.average_speed,
        }
    }
}
