//! Member coupon repository for database operations.

use sqlx::PgPool;

use cart_core::{CouponId, MemberCouponId, MemberId, Money};

use super::{RepositoryError, corrupt};
use crate::models::{Coupon, DiscountPolicy, MemberCoupon, PolicyType};

/// Internal row type for member coupon + coupon join queries.
#[derive(Debug, sqlx::FromRow)]
struct MemberCouponRow {
    id: i64,
    member_id: i64,
    used: bool,
    coupon_id: i64,
    coupon_name: String,
    policy_type: String,
    discount_value: i64,
    minimum_price: i64,
}

impl TryFrom<MemberCouponRow> for MemberCoupon {
    type Error = RepositoryError;

    fn try_from(row: MemberCouponRow) -> Result<Self, Self::Error> {
        let policy_type: PolicyType = row
            .policy_type
            .parse()
            .map_err(|e| corrupt("invalid policy type in database", e))?;
        let minimum_price = Money::new(row.minimum_price)
            .map_err(|e| corrupt("invalid minimum price in database", e))?;
        let policy = DiscountPolicy::new(policy_type, row.discount_value, minimum_price)
            .map_err(|e| corrupt("invalid discount policy in database", e))?;

        Ok(Self {
            id: MemberCouponId::new(row.id),
            member_id: MemberId::new(row.member_id),
            coupon: Coupon {
                id: CouponId::new(row.coupon_id),
                name: row.coupon_name,
                policy,
            },
            used: row.used,
        })
    }
}

const SELECT_WITH_COUPON: &str = "\
SELECT mc.id, mc.member_id, mc.used, \
       c.id AS coupon_id, c.name AS coupon_name, \
       c.policy_type, c.discount_value, c.minimum_price \
FROM member_coupon mc \
JOIN coupon c ON c.id = mc.coupon_id";

/// Repository for member coupon database operations.
pub struct MemberCouponRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberCouponRepository<'a> {
    /// Create a new member coupon repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a member's unused coupons, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_unused_by_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<MemberCoupon>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberCouponRow>(&format!(
            "{SELECT_WITH_COUPON} WHERE mc.member_id = $1 AND NOT mc.used ORDER BY mc.id"
        ))
        .bind(member_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(MemberCoupon::try_from).collect()
    }

    /// Get a member coupon by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: MemberCouponId,
    ) -> Result<Option<MemberCoupon>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberCouponRow>(&format!(
            "{SELECT_WITH_COUPON} WHERE mc.id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(MemberCoupon::try_from).transpose()
    }
}
