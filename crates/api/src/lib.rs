//! Cart API library.
//!
//! This crate provides the shopping-cart backend as a library, allowing it to
//! be tested and reused. The binary in `main.rs` wires configuration, the
//! database pool, and the router together.
//!
//! # Layers
//!
//! - [`routes`] - HTTP handlers and request/response DTOs
//! - [`services`] - Orchestration over repositories and domain rules
//! - [`db`] - Repositories with parameterized `PostgreSQL` queries
//! - [`models`] - Domain objects with invariant checks
//! - [`middleware`] - Basic-Auth extractor resolving the current member

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
