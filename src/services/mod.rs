// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod training;
pub mod user;

pub use training::TrainingService;
pub use user::UserService;
