//! Coupon route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use cart_core::{MemberCouponId, Money};

use crate::error::Result;
use crate::middleware::AuthMember;
use crate::models::{MemberCoupon, PolicyType};
use crate::services::CouponService;
use crate::state::AppState;

/// Coupon wire shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: MemberCouponId,
    pub name: String,
    pub policy_type: PolicyType,
    pub discount_value: i64,
    pub minimum_price: Money,
}

impl From<MemberCoupon> for CouponResponse {
    fn from(coupon: MemberCoupon) -> Self {
        Self {
            id: coupon.id,
            name: coupon.coupon.name,
            policy_type: coupon.coupon.policy.policy_type(),
            discount_value: coupon.coupon.policy.value(),
            minimum_price: coupon.coupon.policy.minimum_price(),
        }
    }
}

/// List the member's unused coupons.
///
/// GET /coupons
pub async fn list(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
) -> Result<Json<Vec<CouponResponse>>> {
    let coupons = CouponService::new(state.pool()).list_unused(&member).await?;
    Ok(Json(coupons.into_iter().map(Into::into).collect()))
}
