//! Shared value types for the cart backend.

pub mod email;
pub mod id;
pub mod money;

pub use email::{Email, EmailError};
pub use id::{CartItemId, CouponId, MemberCouponId, MemberId, OrderId, ProductId};
pub use money::{Money, MoneyError};
