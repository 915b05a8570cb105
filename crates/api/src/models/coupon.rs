//! Coupon and member-coupon domain types.

use core::str::FromStr;

use serde::Serialize;

use cart_core::{CouponId, MemberCouponId, MemberId, Money};

use super::DomainError;

/// How a coupon's discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    /// Subtract a fixed amount.
    Fixed,
    /// Subtract a percentage of the target amount.
    Percent,
}

impl PolicyType {
    /// Database string for this policy type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percent => "percent",
        }
    }
}

impl FromStr for PolicyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "percent" => Ok(Self::Percent),
            other => Err(DomainError::UnknownPolicyType(other.to_owned())),
        }
    }
}

/// A coupon's discount rule: type, value, and minimum qualifying amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPolicy {
    policy_type: PolicyType,
    value: i64,
    minimum_price: Money,
}

impl DiscountPolicy {
    /// Build a discount policy from persisted fields.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when a fixed value is negative or a percent
    /// value falls outside `0..=100`.
    pub fn new(
        policy_type: PolicyType,
        value: i64,
        minimum_price: Money,
    ) -> Result<Self, DomainError> {
        match policy_type {
            PolicyType::Fixed => {
                // Validates non-negativity; the amount itself is kept as i64.
                Money::new(value)?;
            }
            PolicyType::Percent => {
                if !(0..=100).contains(&value) {
                    return Err(DomainError::InvalidPercentDiscount(value));
                }
            }
        }

        Ok(Self {
            policy_type,
            value,
            minimum_price,
        })
    }

    #[must_use]
    pub const fn policy_type(&self) -> PolicyType {
        self.policy_type
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub const fn minimum_price(&self) -> Money {
        self.minimum_price
    }

    /// Apply this policy to `price`.
    ///
    /// Amounts below the minimum qualifying price are returned untouched.
    /// Subtraction saturates at zero, so a large fixed discount yields a free
    /// item rather than a negative price.
    #[must_use]
    pub fn discount(&self, price: Money) -> Money {
        if !price.is_at_least(self.minimum_price) {
            return price;
        }

        let off = match self.policy_type {
            // Both constructions were validated in `new`.
            PolicyType::Fixed => Money::new(self.value).unwrap_or(Money::ZERO),
            PolicyType::Percent => price.percent_of(self.value).unwrap_or(Money::ZERO),
        };

        price.subtract(off)
    }
}

/// A catalog coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub id: CouponId,
    pub name: String,
    pub policy: DiscountPolicy,
}

/// A coupon instance issued to a specific member.
#[derive(Debug, Clone)]
pub struct MemberCoupon {
    pub id: MemberCouponId,
    pub member_id: MemberId,
    pub coupon: Coupon,
    pub used: bool,
}

impl MemberCoupon {
    /// Guard that `member_id` owns this coupon.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotCouponOwner`] for any other member.
    pub const fn ensure_owner(&self, member_id: MemberId) -> Result<(), DomainError> {
        if self.member_id.as_i64() != member_id.as_i64() {
            return Err(DomainError::NotCouponOwner);
        }
        Ok(())
    }

    /// Guard that this coupon has not been spent yet.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CouponAlreadyUsed`] when it has.
    pub const fn ensure_usable(&self) -> Result<(), DomainError> {
        if self.used {
            return Err(DomainError::CouponAlreadyUsed);
        }
        Ok(())
    }

    /// Apply the coupon's policy to `price`.
    ///
    /// The `used` flag is deliberately not consulted here: an order keeps
    /// discounting with the coupon it consumed. Reuse is prevented at
    /// checkout via [`MemberCoupon::ensure_usable`].
    #[must_use]
    pub fn discount(&self, price: Money) -> Money {
        self.coupon.policy.discount(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(amount: i64) -> Money {
        Money::new(amount).expect("non-negative")
    }

    fn fixed_coupon(value: i64, minimum: i64) -> MemberCoupon {
        MemberCoupon {
            id: MemberCouponId::new(1),
            member_id: MemberId::new(1),
            coupon: Coupon {
                id: CouponId::new(1),
                name: "welcome".to_owned(),
                policy: DiscountPolicy::new(PolicyType::Fixed, value, money(minimum))
                    .expect("valid"),
            },
            used: false,
        }
    }

    #[test]
    fn policy_type_round_trips_through_strings() {
        assert_eq!("fixed".parse::<PolicyType>(), Ok(PolicyType::Fixed));
        assert_eq!("percent".parse::<PolicyType>(), Ok(PolicyType::Percent));
        assert_eq!(PolicyType::Percent.as_str(), "percent");
        assert_eq!(
            "bogo".parse::<PolicyType>(),
            Err(DomainError::UnknownPolicyType("bogo".to_owned()))
        );
    }

    #[test]
    fn fixed_discount_subtracts_the_value() {
        let policy = DiscountPolicy::new(PolicyType::Fixed, 1000, money(5000)).expect("valid");
        assert_eq!(policy.discount(money(8900)).amount(), 7900);
    }

    #[test]
    fn percent_discount_scales_the_price() {
        let policy = DiscountPolicy::new(PolicyType::Percent, 10, money(0)).expect("valid");
        assert_eq!(policy.discount(money(8900)).amount(), 8010);
    }

    #[test]
    fn below_minimum_price_discounts_nothing() {
        let policy = DiscountPolicy::new(PolicyType::Fixed, 1000, money(10000)).expect("valid");
        assert_eq!(policy.discount(money(8900)).amount(), 8900);
        // Exactly at the threshold qualifies.
        assert_eq!(policy.discount(money(10000)).amount(), 9000);
    }

    #[test]
    fn oversized_fixed_discount_floors_at_zero() {
        let policy = DiscountPolicy::new(PolicyType::Fixed, 100_000, money(0)).expect("valid");
        assert_eq!(policy.discount(money(8900)), Money::ZERO);
    }

    #[test]
    fn percent_outside_range_is_rejected() {
        assert_eq!(
            DiscountPolicy::new(PolicyType::Percent, 101, money(0)),
            Err(DomainError::InvalidPercentDiscount(101))
        );
        assert_eq!(
            DiscountPolicy::new(PolicyType::Percent, -1, money(0)),
            Err(DomainError::InvalidPercentDiscount(-1))
        );
    }

    #[test]
    fn used_coupon_is_rejected_at_checkout_but_still_discounts() {
        let mut coupon = fixed_coupon(1000, 0);
        coupon.used = true;
        assert_eq!(coupon.ensure_usable(), Err(DomainError::CouponAlreadyUsed));
        // Stored orders keep discounting with the coupon they consumed.
        assert_eq!(coupon.discount(money(8900)).amount(), 7900);
    }

    #[test]
    fn coupon_owner_check() {
        let coupon = fixed_coupon(1000, 0);
        assert!(coupon.ensure_owner(MemberId::new(1)).is_ok());
        assert_eq!(
            coupon.ensure_owner(MemberId::new(2)),
            Err(DomainError::NotCouponOwner)
        );
    }
}
