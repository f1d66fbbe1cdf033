//! Storage layer.
//!
//! The [`UserStore`] and [`TrainingStore`] traits describe the queries the
//! services need; [`MemoryStore`] is the in-process implementation backing
//! the server and the test suite. Stores hand out owned snapshots, so a
//! record read here does not change under the caller's feet.

#![allow(async_fn_in_trait)]

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::models::{ActivityType, NewTraining, NewUser, Training, User};

pub mod memory;

pub use memory::MemoryStore;

/// Persistence operations for [`User`] records.
///
/// `insert` and `update` enforce email uniqueness (case-insensitive); the
/// uniqueness check and the write are a single atomic step, so two racing
/// inserts with the same address cannot both succeed.
pub trait UserStore: Send + Sync {
    async fn insert(&self, data: NewUser) -> Result<User>;

    /// Replaces the stored record with `user`, re-keying the email index if
    /// the address changed. Fails with `UserNotFound` if the id is unknown.
    async fn update(&self, user: &User) -> Result<User>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Looks up a user by email, ignoring letter case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_all(&self) -> Result<Vec<User>>;

    /// Users whose birthdate is strictly before `cutoff`.
    async fn find_born_before(&self, cutoff: NaiveDate) -> Result<Vec<User>>;

    /// Removes a user record. Returns `false` if the id was unknown.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Persistence operations for [`Training`] records.
///
/// Trainings reference their owner only by id; the store does not check that
/// the user exists (the service layer does) and never cascades deletes.
pub trait TrainingStore: Send + Sync {
    async fn insert(&self, data: NewTraining) -> Result<Training>;

    /// Replaces the stored record with `training`. Fails with
    /// `TrainingNotFound` if the id is unknown.
    async fn update(&self, training: &Training) -> Result<Training>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Training>>;

    async fn find_all(&self) -> Result<Vec<Training>>;

    async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Training>>;

    /// Trainings whose end time is strictly after `cutoff`.
    async fn find_all_by_end_time_after(&self, cutoff: DateTime<Utc>) -> Result<Vec<Training>>;

    async fn find_all_by_activity_type(&self, activity_type: ActivityType) -> Result<Vec<Training>>;
}
