// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User management service.
//!
//! Owns the business rules around user records: the unique-email invariant
//! (delegated to the store's atomic index), partial updates, and the
//! age-threshold query. Generic over [`UserStore`] so tests can run against
//! the in-memory store.

use chrono::{Months, NaiveDate, Utc};

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User, UserUpdate};

pub struct UserService<S> {
    store: S,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a user. A duplicate email address (ignoring case) fails with
    /// `EmailAlreadyExists` and persists nothing.
    pub async fn create(&self, data: NewUser) -> Result<User> {
        let user = self.store.insert(data).await?;
        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.store.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.store.find_by_email(email).await
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        self.store.find_all().await
    }

    /// Users strictly older than `age` years as of today.
    pub async fn list_older_than(&self, age: u32) -> Result<Vec<User>> {
        self.list_older_than_as_of(age, Utc::now().date_naive())
            .await
    }

    /// Same query with an explicit reference date so tests can pin "today".
    ///
    /// The cutoff is `today` minus `age` years; a user born exactly on the
    /// cutoff turns `age` today and is not yet older, so the comparison is
    /// strict.
    pub async fn list_older_than_as_of(&self, age: u32, today: NaiveDate) -> Result<Vec<User>> {
        let months = age
            .checked_mul(12)
            .ok_or_else(|| AppError::BadRequest(format!("Age {age} is out of range")))?;
        let cutoff = today
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| AppError::BadRequest(format!("Age {age} is out of range")))?;
        self.store.find_born_before(cutoff).await
    }

    /// Merges the supplied fields into the stored record; fields left unset
    /// keep their current values. Changing the email re-enters the unique
    /// index and can fail with `EmailAlreadyExists`.
    pub async fn update(&self, id: i64, changes: UserUpdate) -> Result<User> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound(id))?;
        changes.merge_into(&mut user);
        let user = self.store.update(&user).await?;
        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    /// Deletes the user record. Trainings referencing it are left in place.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.store.delete(id).await? {
            tracing::info!(user_id = id, "Deleted user");
            Ok(())
        } else {
            Err(AppError::UserNotFound(id))
        }
    }
}
