//! Service layer: orchestration over repositories and domain rules.
//!
//! Services own the "guard, then write" sequences the handlers rely on:
//! existence checks become 404s, ownership checks become 403s, and domain
//! validation becomes 400s, all via [`crate::error::AppError`].

pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod orders;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use coupons::CouponService;
pub use orders::OrderService;
