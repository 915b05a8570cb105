//! Cart item domain types.

use serde::{Deserialize, Serialize};

use cart_core::{CartItemId, MemberId};

use super::{DomainError, Product};

/// How many units of a product a cart row holds.
///
/// Always at least 1; removing an item is a delete, not a zero quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// Minimum allowed quantity.
    pub const MIN: i32 = 1;

    /// Quantity of a freshly added cart item.
    pub const INITIAL: Self = Self(1);

    /// Validate a quantity value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuantityTooSmall`] for values below 1.
    pub const fn new(value: i32) -> Result<Self, DomainError> {
        if value < Self::MIN {
            return Err(DomainError::QuantityTooSmall);
        }
        Ok(Self(value))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

/// A member's cart row with its product attached.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: CartItemId,
    pub member_id: MemberId,
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    /// Construct a cart item from persisted fields.
    #[must_use]
    pub const fn new(
        id: CartItemId,
        member_id: MemberId,
        product: Product,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            member_id,
            product,
            quantity,
        }
    }

    /// Guard that `member_id` owns this cart item.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotCartItemOwner`] for any other member.
    pub const fn ensure_owner(&self, member_id: MemberId) -> Result<(), DomainError> {
        if self.member_id.as_i64() != member_id.as_i64() {
            return Err(DomainError::NotCartItemOwner);
        }
        Ok(())
    }

    /// Replace the quantity, keeping the >= 1 invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuantityTooSmall`] for values below 1.
    pub fn change_quantity(&mut self, quantity: i32) -> Result<(), DomainError> {
        self.quantity = Quantity::new(quantity)?;
        Ok(())
    }
}
