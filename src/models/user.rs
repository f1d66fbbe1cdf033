//! User entity, partial-update payload, and API views.

use chrono::NaiveDate;
use serde::Serialize;

/// User profile as persisted by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Store-assigned identifier (positive, immutable)
    pub id: i64,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Date of birth
    pub birthdate: NaiveDate,
    /// Email address; unique across users, compared case-insensitively
    pub email: String,
}

/// Payload for creating a user. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub email: String,
}

/// Partial update for a user.
///
/// `None` means "leave the current value"; `Some` overwrites. All user
/// fields are non-nullable, so there is no "explicitly cleared" state to
/// represent.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub email: Option<String>,
}

impl UserUpdate {
    /// Merge the supplied fields into `user`, leaving the rest untouched.
    pub fn merge_into(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(birthdate) = self.birthdate {
            user.birthdate = birthdate;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}

/// Full user view exposed over the API.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            birthdate: user.birthdate,
            email: user.email.clone(),
        }
    }
}

/// Summary user view: id plus a single joined name field.
#[derive(Debug, Serialize)]
pub struct UserBasicDto {
    pub id: i64,
    pub full_name: String,
}

impl From<&User> for UserBasicDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: format!("{}_{}", user.first_name, user.last_name),
        }
    }
}
