// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity_type;
pub mod training;
pub mod user;

pub use activity_type::ActivityType;
pub use training::{NewTraining, Training, TrainingDto};
pub use user::{NewUser, User, UserBasicDto, UserDto, UserUpdate};
