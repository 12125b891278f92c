//! Drizzl Admin library.
//!
//! This crate provides the back-office API as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`intel`] - Margin engine (pure cost, margin, nutrition and advisory computation)
//! - [`services`] - Product intelligence orchestration with demo-data fallback
//! - [`db`] - Catalog store seam (`PostgreSQL` and in-memory)
//! - [`routes`] - JSON API handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod intel;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use state::AppState;

/// Build the application router over `state`, without transport layers.
pub fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}
