// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Rocket Container: aggregates Rocket advertisements, images and videos
//!
//! This crate provides an HTTP API that fans out to the three upstream
//! asset services and groups their results into containers.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

use services::ContainerService;

/// Shared application state.
pub struct AppState {
    pub containers: ContainerService,
}
