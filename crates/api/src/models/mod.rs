//! Domain objects with invariant checks.
//!
//! These types carry the business rules the HTTP layer relies on: bounded
//! product names, non-negative prices, quantity >= 1, ownership guards, and
//! coupon discount arithmetic. Repositories construct them from rows; the
//! service layer never bypasses their constructors.

pub mod cart_item;
pub mod coupon;
pub mod member;
pub mod order;
pub mod product;

pub use cart_item::{CartItem, Quantity};
pub use coupon::{Coupon, DiscountPolicy, MemberCoupon, PolicyType};
pub use member::Member;
pub use order::{NewOrder, Order, OrderItem, OrderItems};
pub use product::{NewProduct, Product};

use cart_core::MoneyError;

/// Violations of domain invariants.
///
/// Validation failures map to 400 responses; ownership and coupon-reuse
/// violations map to 403.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Product name is empty.
    #[error("product name cannot be empty")]
    EmptyProductName,

    /// Product name exceeds the maximum length.
    #[error("product name must be at most {max} characters")]
    ProductNameTooLong { max: usize },

    /// Product image URL is empty.
    #[error("product image url cannot be empty")]
    EmptyImageUrl,

    /// Money construction or arithmetic failed.
    #[error("invalid amount: {0}")]
    Money(#[from] MoneyError),

    /// Cart item quantity below the minimum of 1.
    #[error("quantity must be at least {}", Quantity::MIN)]
    QuantityTooSmall,

    /// Cart item belongs to another member.
    #[error("cart item belongs to another member")]
    NotCartItemOwner,

    /// Coupon belongs to another member.
    #[error("coupon belongs to another member")]
    NotCouponOwner,

    /// Coupon was already spent on an earlier order.
    #[error("coupon has already been used")]
    CouponAlreadyUsed,

    /// Discount policy type string from the database is unknown.
    #[error("unknown discount policy type: {0}")]
    UnknownPolicyType(String),

    /// Percent discount outside 0..=100.
    #[error("percent discount must be between 0 and 100: {0}")]
    InvalidPercentDiscount(i64),

    /// Order contains no items.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// Order belongs to another member.
    #[error("order belongs to another member")]
    NotOrderOwner,
}

impl DomainError {
    /// Whether this violation is an ownership/permission problem rather than
    /// malformed input.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::NotCartItemOwner
                | Self::NotCouponOwner
                | Self::NotOrderOwner
                | Self::CouponAlreadyUsed
        )
    }
}
