//! Database operations for the cart `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `product` - Catalog rows
//! - `member` - Registered members and their Basic-Auth credentials
//! - `cart_item` - Per-member cart rows (fk member, product)
//! - `coupon` - Discount policies
//! - `member_coupon` - Coupon instances issued to members
//! - `orders` / `order_item` - Checkout snapshots
//!
//! Queries are runtime-checked `sqlx` calls with bind parameters; rows are
//! mapped through private `*Row` structs and converted into domain types so
//! invariants are re-validated on the way out of the database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p cart-cli -- migrate
//! ```

pub mod cart_items;
pub mod coupons;
pub mod members;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart_items::CartItemRepository;
pub use coupons::MemberCouponRepository;
pub use members::MemberRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Lost a write race (e.g. consuming an already-spent coupon).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Shorthand for mapping a domain invariant failure found in stored data.
pub(crate) fn corrupt(context: &str, err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::DataCorruption(format!("{context}: {err}"))
}
