// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fixed registry of supported activity kinds.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of physical activity recorded in a training.
///
/// Serialized on the wire as the upper-case variant name (e.g. `"RUNNING"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Running,
    Cycling,
    Walking,
    Swimming,
    Tennis,
}

impl ActivityType {
    /// All supported kinds, in declaration order.
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Running,
        ActivityType::Cycling,
        ActivityType::Walking,
        ActivityType::Swimming,
        ActivityType::Tennis,
    ];

    /// Parse free-text input, case-insensitively.
    ///
    /// Unknown text is malformed input (`InvalidActivityType`), not a lookup
    /// miss.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        match text.to_ascii_uppercase().as_str() {
            "RUNNING" => Ok(ActivityType::Running),
            "CYCLING" => Ok(ActivityType::Cycling),
            "WALKING" => Ok(ActivityType::Walking),
            "SWIMMING" => Ok(ActivityType::Swimming),
            "TENNIS" => Ok(ActivityType::Tennis),
            _ => Err(AppError::InvalidActivityType(text.to_string())),
        }
    }

    /// Human-readable label for the kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Walking => "Walking",
            ActivityType::Swimming => "Swimming",
            ActivityType::Tennis => "Tennis",
        }
    }
}
