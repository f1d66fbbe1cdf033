// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trainlog: users and their recorded training sessions
//!
//! This crate provides the backend API for managing user profiles and the
//! training sessions recorded against them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryStore;
use services::{TrainingService, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: UserService<MemoryStore>,
    pub trainings: TrainingService<MemoryStore, MemoryStore>,
}

impl AppState {
    /// Wires both services onto one shared store.
    pub fn new(config: Config, store: MemoryStore) -> Self {
        Self {
            config,
            users: UserService::new(store.clone()),
            trainings: TrainingService::new(store.clone(), store),
        }
    }
}
