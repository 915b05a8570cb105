//! Order service: checkout and order reads.

use sqlx::PgPool;

use cart_core::{CartItemId, MemberCouponId, Money, OrderId};

use crate::db::{CartItemRepository, MemberCouponRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::models::{Member, MemberCoupon, NewOrder, Order};

/// Service for placing and reading orders.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    cart_items: CartItemRepository<'a>,
    coupons: MemberCouponRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            cart_items: CartItemRepository::new(pool),
            coupons: MemberCouponRepository::new(pool),
        }
    }

    /// Place an order from the member's cart items.
    ///
    /// Repeated IDs in the request name the same cart row and are counted
    /// once. Guards run before anything is written: every named cart item
    /// must exist and belong to the member, and the coupon (when given) must
    /// be the member's and unspent. The snapshot, coupon consumption, and
    /// cart cleanup then commit atomically.
    ///
    /// # Errors
    ///
    /// Returns a 400-mapped error for an empty item list, `AppError::NotFound`
    /// for unknown cart items or coupons, 403-mapped errors for foreign
    /// cart items, foreign coupons, or reused coupons, and a 409-mapped error
    /// when a concurrent checkout consumed the coupon first.
    pub async fn place(
        &self,
        member: &Member,
        cart_item_ids: &[CartItemId],
        coupon_id: Option<MemberCouponId>,
        delivery_fee: Money,
    ) -> Result<OrderId> {
        if cart_item_ids.is_empty() {
            return Err(AppError::BadRequest(
                "order must contain at least one cart item".to_owned(),
            ));
        }
        let cart_item_ids = unique_ids(cart_item_ids);

        let cart_items = self.cart_items.get_many(&cart_item_ids).await?;
        if cart_items.len() != cart_item_ids.len() {
            return Err(AppError::NotFound(
                "one or more cart items not found".to_owned(),
            ));
        }
        for item in &cart_items {
            item.ensure_owner(member.id)?;
        }

        let coupon = match coupon_id {
            Some(id) => Some(self.usable_coupon(member, id).await?),
            None => None,
        };

        let order = NewOrder::from_cart_items(&cart_items, delivery_fee, coupon, member.id)?;
        let order_id = self.orders.place(&order, &cart_item_ids).await?;

        tracing::info!(
            member_id = %member.id,
            order_id = %order_id,
            items = order.items.len(),
            "order placed"
        );
        Ok(order_id)
    }

    /// List the member's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn list(&self, member: &Member) -> Result<Vec<Order>> {
        Ok(self.orders.list_by_member(member.id).await?)
    }

    /// Get one of the member's orders.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown orders and a 403-mapped error
    /// for orders owned by another member.
    pub async fn get(&self, member: &Member, id: OrderId) -> Result<Order> {
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("order", id))?;
        order.ensure_owner(member.id)?;
        Ok(order)
    }

    /// Fetch a coupon and verify it belongs to the member and is unspent.
    async fn usable_coupon(
        &self,
        member: &Member,
        id: MemberCouponId,
    ) -> Result<MemberCoupon> {
        let coupon = self
            .coupons
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("coupon", id))?;
        coupon.ensure_owner(member.id)?;
        coupon.ensure_usable()?;
        Ok(coupon)
    }
}

/// Drop repeated IDs, keeping first-occurrence order.
fn unique_ids(ids: &[CartItemId]) -> Vec<CartItemId> {
    let mut unique = Vec::with_capacity(ids.len());
    for &id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_cart_item_ids_collapse_to_one() {
        let ids = [CartItemId::new(1), CartItemId::new(1), CartItemId::new(2)];
        assert_eq!(
            unique_ids(&ids),
            vec![CartItemId::new(1), CartItemId::new(2)]
        );
    }

    #[test]
    fn distinct_ids_keep_their_order() {
        let ids = [CartItemId::new(3), CartItemId::new(1), CartItemId::new(2)];
        assert_eq!(unique_ids(&ids), ids.to_vec());
    }
}
