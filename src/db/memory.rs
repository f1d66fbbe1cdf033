//! In-memory store backed by concurrent hash maps.
//!
//! Records live in [`DashMap`]s keyed by id, with a side index from
//! lower-cased email to user id. Uniqueness is enforced by claiming the
//! index entry before the user record is written, so concurrent inserts of
//! the same address race on a single map slot and exactly one wins.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::db::{TrainingStore, UserStore};
use crate::error::{AppError, Result};
use crate::models::{ActivityType, NewTraining, NewUser, Training, User};

/// Shared in-process store. Cloning is cheap and clones see the same data.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    next_user_id: AtomicI64,
    next_training_id: AtomicI64,
    users: DashMap<i64, User>,
    trainings: DashMap<i64, Training>,
    /// Lower-cased email -> user id. Owning an entry here owns the address.
    user_emails: DashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                next_user_id: AtomicI64::new(1),
                next_training_id: AtomicI64::new(1),
                users: DashMap::new(),
                trainings: DashMap::new(),
                user_emails: DashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn email_key(email: &str) -> String {
    email.to_lowercase()
}

impl UserStore for MemoryStore {
    async fn insert(&self, data: NewUser) -> Result<User> {
        let id = match self.inner.user_emails.entry(email_key(&data.email)) {
            Entry::Occupied(_) => return Err(AppError::EmailAlreadyExists(data.email)),
            Entry::Vacant(slot) => {
                let id = self.inner.next_user_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(id);
                id
            }
        };
        let user = User {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            birthdate: data.birthdate,
            email: data.email,
        };
        self.inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let old = self
            .inner
            .users
            .get(&user.id)
            .map(|entry| entry.value().clone())
            .ok_or(AppError::UserNotFound(user.id))?;
        let old_key = email_key(&old.email);
        let new_key = email_key(&user.email);
        if new_key != old_key {
            // Claim the new address first; only then release the old one.
            // The entry guard must be dropped before touching another key.
            let claimed = match self.inner.user_emails.entry(new_key) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                    true
                }
            };
            if !claimed {
                return Err(AppError::EmailAlreadyExists(user.email.clone()));
            }
            self.inner.user_emails.remove(&old_key);
        }
        self.inner.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.inner.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let id = match self.inner.user_emails.get(&email_key(email)) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };
        Ok(self.inner.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .inner
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn find_born_before(&self, cutoff: NaiveDate) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .inner
            .users
            .iter()
            .filter(|entry| entry.value().birthdate < cutoff)
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.inner.users.remove(&id) {
            Some((_, user)) => {
                self.inner.user_emails.remove(&email_key(&user.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl TrainingStore for MemoryStore {
    async fn insert(&self, data: NewTraining) -> Result<Training> {
        let id = self.inner.next_training_id.fetch_add(1, Ordering::Relaxed);
        let training = Training {
            id,
            user_id: data.user_id,
            start_time: data.start_time,
            end_time: data.end_time,
            activity_type: data.activity_type,
            distance: data.distance,
            average_speed: data.average_speed,
        };
        self.inner.trainings.insert(id, training.clone());
        Ok(training)
    }

    async fn update(&self, training: &Training) -> Result<Training> {
        if !self.inner.trainings.contains_key(&training.id) {
            return Err(AppError::TrainingNotFound(training.id));
        }
        self.inner.trainings.insert(training.id, training.clone());
        Ok(training.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Training>> {
        Ok(self
            .inner
            .trainings
            .get(&id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Training>> {
        Ok(self.collect_trainings(|_| true))
    }

    async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Training>> {
        Ok(self.collect_trainings(|training| training.user_id == user_id))
    }

    async fn find_all_by_end_time_after(&self, cutoff: DateTime<Utc>) -> Result<Vec<Training>> {
        Ok(self.collect_trainings(|training| training.end_time > cutoff))
    }

    async fn find_all_by_activity_type(&self, activity_type: ActivityType) -> Result<Vec<Training>> {
        Ok(self.collect_trainings(|training| training.activity_type == activity_type))
    }
}

impl MemoryStore {
    fn collect_trainings(&self, keep: impl Fn(&Training) -> bool) -> Vec<Training> {
        let mut trainings: Vec<Training> = self
            .inner
            .trainings
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        trainings.sort_by_key(|training| training.id);
        trainings
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            birthdate: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            email: email.to_string(),
        }
    }

    fn new_training(user_id: i64, activity_type: ActivityType, end: DateTime<Utc>) -> NewTraining {
        NewTraining {
            user_id,
            start_time: end - chrono::Duration::hours(1),
            end_time: end,
            activity_type,
            distance: 10.0,
            average_speed: 10.0,
        }
    }

    #[tokio::test]
    async fn test_ids_are_positive_and_increasing() {
        let store = MemoryStore::new();
        let a = UserStore::insert(&store, new_user("a@example.com"))
            .await
            .unwrap();
        let b = UserStore::insert(&store, new_user("b@example.com"))
            .await
            .unwrap();
        assert!(a.id >= 1);
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email_ignoring_case() {
        let store = MemoryStore::new();
        UserStore::insert(&store, new_user("Ann@Example.com"))
            .await
            .unwrap();
        let err = UserStore::insert(&store, new_user("ann@example.COM"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists(_)));
        assert_eq!(UserStore::find_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let store = MemoryStore::new();
        let created = UserStore::insert(&store, new_user("ann@example.com"))
            .await
            .unwrap();
        let found = store.find_by_email("ANN@EXAMPLE.COM").await.unwrap();
        assert_eq!(found.map(|user| user.id), Some(created.id));
        assert!(store.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_rekeys_email_index() {
        let store = MemoryStore::new();
        let mut user = UserStore::insert(&store, new_user("old@example.com"))
            .await
            .unwrap();
        user.email = "new@example.com".to_string();
        UserStore::update(&store, &user).await.unwrap();

        assert!(store.find_by_email("old@example.com").await.unwrap().is_none());
        assert!(store.find_by_email("new@example.com").await.unwrap().is_some());
        // The old address is free again.
        UserStore::insert(&store, new_user("old@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_email_owned_by_another_user() {
        let store = MemoryStore::new();
        UserStore::insert(&store, new_user("taken@example.com"))
            .await
            .unwrap();
        let mut user = UserStore::insert(&store, new_user("free@example.com"))
            .await
            .unwrap();
        user.email = "TAKEN@example.com".to_string();
        let err = UserStore::update(&store, &user).await.unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists(_)));
        // The failed update does not disturb either record.
        assert!(store.find_by_email("free@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_keeps_index_when_only_case_changes() {
        let store = MemoryStore::new();
        let mut user = UserStore::insert(&store, new_user("ann@example.com"))
            .await
            .unwrap();
        user.email = "Ann@Example.com".to_string();
        let updated = UserStore::update(&store, &user).await.unwrap();
        assert_eq!(updated.email, "Ann@Example.com");
        assert!(store.find_by_email("ann@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_frees_email_and_reports_missing() {
        let store = MemoryStore::new();
        let user = UserStore::insert(&store, new_user("ann@example.com"))
            .await
            .unwrap();
        assert!(store.delete(user.id).await.unwrap());
        assert!(!store.delete(user.id).await.unwrap());
        // Address can be reused after deletion.
        UserStore::insert(&store, new_user("ann@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_born_before_is_strict() {
        let store = MemoryStore::new();
        let cutoff = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();

        let mut on_cutoff = new_user("on@example.com");
        on_cutoff.birthdate = cutoff;
        let mut before = new_user("before@example.com");
        before.birthdate = NaiveDate::from_ymd_opt(1990, 6, 14).unwrap();
        UserStore::insert(&store, on_cutoff).await.unwrap();
        let kept = UserStore::insert(&store, before).await.unwrap();

        let matches = store.find_born_before(cutoff).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_training_filters() {
        let store = MemoryStore::new();
        let cutoff = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let run = TrainingStore::insert(
            &store,
            new_training(1, ActivityType::Running, cutoff + chrono::Duration::hours(1)),
        )
        .await
        .unwrap();
        // Ends exactly at the cutoff, so it is not "after".
        TrainingStore::insert(&store, new_training(1, ActivityType::Cycling, cutoff))
            .await
            .unwrap();
        let other_user = TrainingStore::insert(
            &store,
            new_training(2, ActivityType::Running, cutoff + chrono::Duration::days(1)),
        )
        .await
        .unwrap();

        let after = store.find_all_by_end_time_after(cutoff).await.unwrap();
        assert_eq!(
            after.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![run.id, other_user.id]
        );

        let for_user = store.find_all_by_user_id(1).await.unwrap();
        assert_eq!(for_user.len(), 2);

        let running = store
            .find_all_by_activity_type(ActivityType::Running)
            .await
            .unwrap();
        assert_eq!(
            running.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![run.id, other_user.id]
        );
    }

    #[tokio::test]
    async fn test_training_update_requires_existing_record() {
        let store = MemoryStore::new();
        let mut training = TrainingStore::insert(
            &store,
            new_training(1, ActivityType::Walking, Utc::now()),
        )
        .await
        .unwrap();
        training.distance = 42.0;
        let updated = TrainingStore::update(&store, &training).await.unwrap();
        assert_eq!(updated.distance, 42.0);

        let missing = Training { id: 999, ..training };
        let err = TrainingStore::update(&store, &missing).await.unwrap_err();
        assert!(matches!(err, AppError::TrainingNotFound(999)));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_with_same_email_admit_one() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                UserStore::insert(&store, new_user("race@example.com")).await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AppError::EmailAlreadyExists(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(UserStore::find_all(&store).await.unwrap().len(), 1);
    }
}
