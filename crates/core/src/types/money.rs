//! Integral money type used for prices, fees, and discounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or combining [`Money`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is negative.
    #[error("money amount cannot be negative: {0}")]
    Negative(i64),
    /// The amount overflowed i64 range.
    #[error("money amount overflowed")]
    Overflow,
    /// A percentage outside 0..=100 was applied.
    #[error("percentage must be between 0 and 100: {0}")]
    InvalidPercentage(i64),
}

/// A non-negative amount of money in the store's base currency unit.
///
/// All catalog prices, delivery fees, and discounts are whole amounts (won),
/// so this wraps an `i64` rather than a decimal type. Arithmetic is checked:
/// addition and multiplication report overflow, subtraction saturates at
/// zero so a discount can never drive a price negative.
///
/// ## Examples
///
/// ```
/// use cart_core::Money;
///
/// let price = Money::new(8900).expect("non-negative");
/// let doubled = price.multiply(2).expect("no overflow");
/// assert_eq!(doubled.amount(), 17800);
///
/// // Subtraction saturates at zero.
/// let small = Money::new(100).expect("non-negative");
/// assert_eq!(small.subtract(price).amount(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a `Money` value from a raw amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is below zero.
    pub const fn new(amount: i64) -> Result<Self, MoneyError> {
        if amount < 0 {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the raw amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Add another amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the sum exceeds `i64::MAX`.
    pub const fn add(self, other: Self) -> Result<Self, MoneyError> {
        match self.0.checked_add(other.0) {
            Some(sum) => Ok(Self(sum)),
            None => Err(MoneyError::Overflow),
        }
    }

    /// Subtract another amount, saturating at zero.
    #[must_use]
    pub const fn subtract(self, other: Self) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 { Self(0) } else { Self(diff) }
    }

    /// Multiply by a non-negative quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] for a negative quantity and
    /// [`MoneyError::Overflow`] if the product exceeds `i64::MAX`.
    pub const fn multiply(self, quantity: i64) -> Result<Self, MoneyError> {
        if quantity < 0 {
            return Err(MoneyError::Negative(quantity));
        }
        match self.0.checked_mul(quantity) {
            Some(product) => Ok(Self(product)),
            None => Err(MoneyError::Overflow),
        }
    }

    /// Compute `percentage` percent of this amount, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidPercentage`] when `percentage` is outside
    /// `0..=100` and [`MoneyError::Overflow`] on intermediate overflow.
    pub const fn percent_of(self, percentage: i64) -> Result<Self, MoneyError> {
        if percentage < 0 || percentage > 100 {
            return Err(MoneyError::InvalidPercentage(percentage));
        }
        match self.0.checked_mul(percentage) {
            Some(scaled) => Ok(Self(scaled / 100)),
            None => Err(MoneyError::Overflow),
        }
    }

    /// Whether this amount is at least `other`.
    #[must_use]
    pub const fn is_at_least(&self, other: Self) -> bool {
        self.0 >= other.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Self::new(amount).map_err(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(Money::new(-1), Err(MoneyError::Negative(-1)));
        assert!(Money::new(0).is_ok());
    }

    #[test]
    fn addition_is_checked() {
        let a = Money::new(1000).expect("valid");
        let b = Money::new(234).expect("valid");
        assert_eq!(a.add(b).expect("no overflow").amount(), 1234);

        let max = Money::new(i64::MAX).expect("valid");
        assert_eq!(max.add(b), Err(MoneyError::Overflow));
    }

    #[test]
    fn subtraction_saturates_at_zero() {
        let a = Money::new(1000).expect("valid");
        let b = Money::new(3000).expect("valid");
        assert_eq!(a.subtract(b), Money::ZERO);
        assert_eq!(b.subtract(a).amount(), 2000);
    }

    #[test]
    fn multiplication_by_quantity() {
        let price = Money::new(8900).expect("valid");
        assert_eq!(price.multiply(3).expect("no overflow").amount(), 26700);
        assert_eq!(price.multiply(0).expect("no overflow"), Money::ZERO);
        assert_eq!(price.multiply(-1), Err(MoneyError::Negative(-1)));
    }

    #[test]
    fn percentage_truncates_toward_zero() {
        let price = Money::new(999).expect("valid");
        assert_eq!(price.percent_of(10).expect("valid").amount(), 99);
        assert_eq!(price.percent_of(0).expect("valid"), Money::ZERO);
        assert_eq!(price.percent_of(100).expect("valid").amount(), 999);
        assert_eq!(price.percent_of(101), Err(MoneyError::InvalidPercentage(101)));
    }

    #[test]
    fn threshold_comparison() {
        let price = Money::new(5000).expect("valid");
        let min = Money::new(5000).expect("valid");
        assert!(price.is_at_least(min));
        assert!(!Money::new(4999).expect("valid").is_at_least(min));
    }
}
