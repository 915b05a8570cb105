//! Order domain types.
//!
//! An order is a snapshot: item names, images, and unit prices are copied
//! from the catalog at checkout so later product edits do not rewrite
//! history. The applied coupon is kept by reference and totals are computed
//! on read.

use chrono::{DateTime, Utc};

use cart_core::{MemberId, Money, MoneyError, OrderId};

use super::{CartItem, DomainError, MemberCoupon, Quantity};

/// A single line of an order, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_name: String,
    pub image_url: String,
    pub unit_price: Money,
    pub quantity: Quantity,
}

impl OrderItem {
    /// Snapshot a cart item into an order line.
    #[must_use]
    pub fn from_cart_item(cart_item: &CartItem) -> Self {
        Self {
            product_name: cart_item.product.name.clone(),
            image_url: cart_item.product.image_url.clone(),
            unit_price: cart_item.product.price,
            quantity: cart_item.quantity,
        }
    }

    /// Line subtotal: unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] on arithmetic overflow.
    pub fn subtotal(&self) -> Result<Money, MoneyError> {
        self.unit_price.multiply(i64::from(self.quantity.value()))
    }
}

/// The non-empty set of lines in an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItems(Vec<OrderItem>);

impl OrderItems {
    /// Wrap a set of order lines.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyOrder`] when `items` is empty.
    pub fn new(items: Vec<OrderItem>) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::EmptyOrder);
        }
        Ok(Self(items))
    }

    /// Snapshot cart items into order lines.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyOrder`] when `cart_items` is empty.
    pub fn from_cart_items(cart_items: &[CartItem]) -> Result<Self, DomainError> {
        Self::new(cart_items.iter().map(OrderItem::from_cart_item).collect())
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; emptiness is rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &OrderItem> {
        self.0.iter()
    }

    /// Sum of all line subtotals.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] on arithmetic overflow.
    pub fn total_price(&self) -> Result<Money, MoneyError> {
        self.0
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.add(item.subtotal()?))
    }
}

/// An order awaiting persistence.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub member_id: MemberId,
    pub items: OrderItems,
    pub delivery_fee: Money,
    pub coupon: Option<MemberCoupon>,
}

impl NewOrder {
    /// Build an order from cart items at checkout.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyOrder`] when `cart_items` is empty.
    pub fn from_cart_items(
        cart_items: &[CartItem],
        delivery_fee: Money,
        coupon: Option<MemberCoupon>,
        member_id: MemberId,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            member_id,
            items: OrderItems::from_cart_items(cart_items)?,
            delivery_fee,
            coupon,
        })
    }
}

/// A persisted order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub member_id: MemberId,
    pub items: OrderItems,
    pub delivery_fee: Money,
    pub coupon: Option<MemberCoupon>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Guard that `member_id` owns this order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotOrderOwner`] for any other member.
    pub const fn ensure_owner(&self, member_id: MemberId) -> Result<(), DomainError> {
        if self.member_id.as_i64() != member_id.as_i64() {
            return Err(DomainError::NotOrderOwner);
        }
        Ok(())
    }

    /// Undiscounted sum of all lines.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Money`] on arithmetic overflow.
    pub fn order_price(&self) -> Result<Money, DomainError> {
        Ok(self.items.total_price()?)
    }

    /// Order price after the coupon (if any) is applied.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Money`] on arithmetic overflow.
    pub fn discounted_order_price(&self) -> Result<Money, DomainError> {
        let price = self.items.total_price()?;
        Ok(self.apply_coupon(price))
    }

    /// Delivery fee after the coupon (if any) is applied.
    #[must_use]
    pub fn discounted_delivery_fee(&self) -> Money {
        self.apply_coupon(self.delivery_fee)
    }

    fn apply_coupon(&self, price: Money) -> Money {
        match &self.coupon {
            Some(coupon) => coupon.discount(price),
            None => price,
        }
    }
}

#[cfg(test)]
mod tests {
    use cart_core::{CartItemId, CouponId, MemberCouponId, ProductId};

    use super::*;
    use crate::models::{Coupon, DiscountPolicy, NewProduct, PolicyType};

    fn money(amount: i64) -> Money {
        Money::new(amount).expect("non-negative")
    }

    fn cart_item(id: i64, price: i64, quantity: i32) -> CartItem {
        let product = NewProduct::new("pizza", "pizza.jpg", price)
            .expect("valid")
            .with_id(ProductId::new(id));
        CartItem::new(
            CartItemId::new(id),
            MemberId::new(1),
            product,
            Quantity::new(quantity).expect("valid"),
        )
    }

    fn percent_coupon(value: i64, minimum: i64) -> MemberCoupon {
        MemberCoupon {
            id: MemberCouponId::new(1),
            member_id: MemberId::new(1),
            coupon: Coupon {
                id: CouponId::new(1),
                name: "10% off".to_owned(),
                policy: DiscountPolicy::new(PolicyType::Percent, value, money(minimum))
                    .expect("valid"),
            },
            used: false,
        }
    }

    fn order(items: Vec<CartItem>, coupon: Option<MemberCoupon>) -> Order {
        let new_order = NewOrder::from_cart_items(&items, money(3000), coupon, MemberId::new(1))
            .expect("valid");
        Order {
            id: OrderId::new(1),
            member_id: new_order.member_id,
            items: new_order.items,
            delivery_fee: new_order.delivery_fee,
            coupon: new_order.coupon,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_orders_are_rejected() {
        let result = NewOrder::from_cart_items(&[], money(3000), None, MemberId::new(1));
        assert!(matches!(result, Err(DomainError::EmptyOrder)));
    }

    #[test]
    fn order_price_sums_line_subtotals() {
        let order = order(vec![cart_item(1, 8900, 2), cart_item(2, 1000, 1)], None);
        assert_eq!(order.order_price().expect("valid").amount(), 18800);
    }

    #[test]
    fn coupon_discounts_order_price_and_delivery_fee() {
        let order = order(vec![cart_item(1, 10000, 1)], Some(percent_coupon(10, 0)));
        assert_eq!(order.discounted_order_price().expect("valid").amount(), 9000);
        assert_eq!(order.discounted_delivery_fee().amount(), 2700);
    }

    #[test]
    fn threshold_applies_per_target_amount() {
        // Order total qualifies, delivery fee alone does not.
        let order = order(vec![cart_item(1, 10000, 1)], Some(percent_coupon(10, 5000)));
        assert_eq!(order.discounted_order_price().expect("valid").amount(), 9000);
        assert_eq!(order.discounted_delivery_fee().amount(), 3000);
    }

    #[test]
    fn without_coupon_totals_are_untouched() {
        let order = order(vec![cart_item(1, 10000, 1)], None);
        assert_eq!(order.discounted_order_price().expect("valid").amount(), 10000);
        assert_eq!(order.discounted_delivery_fee().amount(), 3000);
    }

    #[test]
    fn owner_check_rejects_other_members() {
        let order = order(vec![cart_item(1, 1000, 1)], None);
        assert!(order.ensure_owner(MemberId::new(1)).is_ok());
        assert_eq!(
            order.ensure_owner(MemberId::new(2)),
            Err(DomainError::NotOrderOwner)
        );
    }

    #[test]
    fn snapshot_copies_product_fields() {
        let item = cart_item(1, 8900, 3);
        let line = OrderItem::from_cart_item(&item);
        assert_eq!(line.product_name, "pizza");
        assert_eq!(line.unit_price.amount(), 8900);
        assert_eq!(line.subtotal().expect("valid").amount(), 26700);
    }
}
