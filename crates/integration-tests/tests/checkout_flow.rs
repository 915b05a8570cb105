//! Integration tests for the checkout domain flow.
//!
//! These tests exercise the cart → order path through the domain layer:
//! snapshotting, discount arithmetic, and the guard conditions that the
//! HTTP layer maps to 400/403, without requiring a database.

use chrono::Utc;

use cart_api::models::{
    CartItem, Coupon, DiscountPolicy, DomainError, MemberCoupon, NewOrder, NewProduct, Order,
    OrderItem, PolicyType, Quantity,
};
use cart_core::{
    CartItemId, CouponId, MemberCouponId, MemberId, Money, OrderId, ProductId,
};

fn money(amount: i64) -> Money {
    Money::new(amount).expect("non-negative")
}

fn cart_item(id: i64, member: i64, name: &str, price: i64, quantity: i32) -> CartItem {
    let product = NewProduct::new(name, &format!("{name}.jpg"), price)
        .expect("valid product")
        .with_id(ProductId::new(id));
    CartItem::new(
        CartItemId::new(id),
        MemberId::new(member),
        product,
        Quantity::new(quantity).expect("valid quantity"),
    )
}

fn issued_coupon(
    member: i64,
    policy_type: PolicyType,
    value: i64,
    minimum: i64,
) -> MemberCoupon {
    MemberCoupon {
        id: MemberCouponId::new(1),
        member_id: MemberId::new(member),
        coupon: Coupon {
            id: CouponId::new(1),
            name: "test coupon".to_owned(),
            policy: DiscountPolicy::new(policy_type, value, money(minimum))
                .expect("valid policy"),
        },
        used: false,
    }
}

fn persist(new_order: NewOrder) -> Order {
    Order {
        id: OrderId::new(1),
        member_id: new_order.member_id,
        items: new_order.items,
        delivery_fee: new_order.delivery_fee,
        coupon: new_order.coupon,
        created_at: Utc::now(),
    }
}

// =============================================================================
// Snapshot Semantics
// =============================================================================

#[test]
fn checkout_snapshots_cart_items() {
    let items = vec![
        cart_item(1, 1, "chicken", 10_000, 2),
        cart_item(2, 1, "salad", 2_000, 1),
    ];

    let order = NewOrder::from_cart_items(&items, money(3000), None, MemberId::new(1))
        .expect("valid order");

    assert_eq!(order.items.len(), 2);
    let lines: Vec<&OrderItem> = order.items.iter().collect();
    let first = lines.first().expect("two lines");
    assert_eq!(first.product_name, "chicken");
    assert_eq!(first.unit_price.amount(), 10_000);
    assert_eq!(first.quantity.value(), 2);
    assert_eq!(lines.last().expect("two lines").product_name, "salad");
}

#[test]
fn checkout_rejects_an_empty_cart_selection() {
    let result = NewOrder::from_cart_items(&[], money(3000), None, MemberId::new(1));
    assert!(matches!(result, Err(DomainError::EmptyOrder)));
}

// =============================================================================
// Totals and Discounts
// =============================================================================

#[test]
fn totals_without_a_coupon() {
    let items = vec![cart_item(1, 1, "chicken", 10_000, 2)];
    let order = persist(
        NewOrder::from_cart_items(&items, money(3000), None, MemberId::new(1)).expect("valid"),
    );

    assert_eq!(order.order_price().expect("valid").amount(), 20_000);
    assert_eq!(order.discounted_order_price().expect("valid").amount(), 20_000);
    assert_eq!(order.discounted_delivery_fee().amount(), 3000);
}

#[test]
fn fixed_coupon_discounts_when_threshold_is_met() {
    let items = vec![cart_item(1, 1, "chicken", 10_000, 2)];
    let coupon = issued_coupon(1, PolicyType::Fixed, 1000, 10_000);
    let order = persist(
        NewOrder::from_cart_items(&items, money(3000), Some(coupon), MemberId::new(1))
            .expect("valid"),
    );

    // 20000 clears the 10000 threshold; 3000 delivery fee does not.
    assert_eq!(order.discounted_order_price().expect("valid").amount(), 19_000);
    assert_eq!(order.discounted_delivery_fee().amount(), 3000);
}

#[test]
fn percent_coupon_discounts_both_targets() {
    let items = vec![cart_item(1, 1, "pizza", 13_000, 1)];
    let coupon = issued_coupon(1, PolicyType::Percent, 10, 0);
    let order = persist(
        NewOrder::from_cart_items(&items, money(3000), Some(coupon), MemberId::new(1))
            .expect("valid"),
    );

    assert_eq!(order.discounted_order_price().expect("valid").amount(), 11_700);
    assert_eq!(order.discounted_delivery_fee().amount(), 2700);
}

#[test]
fn oversized_fixed_discount_makes_the_order_free() {
    let items = vec![cart_item(1, 1, "salad", 2_000, 1)];
    let coupon = issued_coupon(1, PolicyType::Fixed, 100_000, 0);
    let order = persist(
        NewOrder::from_cart_items(&items, money(3000), Some(coupon), MemberId::new(1))
            .expect("valid"),
    );

    assert_eq!(order.discounted_order_price().expect("valid"), Money::ZERO);
}

// =============================================================================
// Guard Conditions
// =============================================================================

#[test]
fn foreign_cart_items_fail_the_ownership_guard() {
    let item = cart_item(1, 2, "chicken", 10_000, 1);
    assert_eq!(
        item.ensure_owner(MemberId::new(1)),
        Err(DomainError::NotCartItemOwner)
    );
}

#[test]
fn foreign_coupons_fail_the_ownership_guard() {
    let coupon = issued_coupon(2, PolicyType::Fixed, 1000, 0);
    assert_eq!(
        coupon.ensure_owner(MemberId::new(1)),
        Err(DomainError::NotCouponOwner)
    );
}

#[test]
fn spent_coupons_cannot_be_applied_again() {
    let mut coupon = issued_coupon(1, PolicyType::Fixed, 1000, 0);
    coupon.used = true;
    assert_eq!(coupon.ensure_usable(), Err(DomainError::CouponAlreadyUsed));
}

#[test]
fn foreign_orders_fail_the_ownership_guard() {
    let items = vec![cart_item(1, 2, "chicken", 10_000, 1)];
    let order = persist(
        NewOrder::from_cart_items(&items, money(3000), None, MemberId::new(2)).expect("valid"),
    );

    assert_eq!(
        order.ensure_owner(MemberId::new(1)),
        Err(DomainError::NotOrderOwner)
    );
    assert!(order.ensure_owner(MemberId::new(2)).is_ok());
}
