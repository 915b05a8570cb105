//! Coupon service.

use sqlx::PgPool;

use crate::db::MemberCouponRepository;
use crate::error::Result;
use crate::models::{Member, MemberCoupon};

/// Service for a member's coupons.
pub struct CouponService<'a> {
    coupons: MemberCouponRepository<'a>,
}

impl<'a> CouponService<'a> {
    /// Create a new coupon service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            coupons: MemberCouponRepository::new(pool),
        }
    }

    /// List the member's coupons that are still spendable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn list_unused(&self, member: &Member) -> Result<Vec<MemberCoupon>> {
        Ok(self.coupons.list_unused_by_member(member.id).await?)
    }
}
