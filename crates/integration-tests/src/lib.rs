//! Integration tests for the cart backend.
//!
//! The test files under `tests/` drive the domain layer directly, with no
//! database or HTTP server:
//!
//! - `checkout_flow` - cart to order snapshotting, discount arithmetic, and
//!   ownership guards
//! - `wire_shapes` - JSON request/response contracts the clients rely on
//!
//! End-to-end tests against a running server and Postgres instance would
//! live here too; they need a seeded database (`cart-cli migrate && cart-cli
//! seed`) and are not part of the default suite.
