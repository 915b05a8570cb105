//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cart_core::{CartItemId, MemberCouponId, Money, OrderId};

use crate::error::Result;
use crate::middleware::AuthMember;
use crate::models::{Order, OrderItem};
use crate::routes::coupons::CouponResponse;
use crate::services::OrderService;
use crate::state::AppState;

/// Request body for checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub cart_item_ids: Vec<i64>,
    #[serde(default)]
    pub coupon_id: Option<i64>,
}

/// One line of an order on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_name: String,
    pub image_url: String,
    pub unit_price: Money,
    pub quantity: i32,
    pub subtotal: Money,
}

/// Order summary for the list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    pub id: OrderId,
    pub order_price: Money,
    pub created_at: DateTime<Utc>,
}

/// Full order for the detail endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    pub id: OrderId,
    pub items: Vec<OrderItemResponse>,
    pub order_price: Money,
    pub discounted_order_price: Money,
    pub delivery_fee: Money,
    pub discounted_delivery_fee: Money,
    pub coupon: Option<CouponResponse>,
    pub created_at: DateTime<Utc>,
}

fn order_item_response(item: &OrderItem) -> Result<OrderItemResponse> {
    let subtotal = item.subtotal().map_err(crate::models::DomainError::from)?;
    Ok(OrderItemResponse {
        product_name: item.product_name.clone(),
        image_url: item.image_url.clone(),
        unit_price: item.unit_price,
        quantity: item.quantity.value(),
        subtotal,
    })
}

fn summary_response(order: &Order) -> Result<OrderSummaryResponse> {
    Ok(OrderSummaryResponse {
        id: order.id,
        order_price: order.order_price()?,
        created_at: order.created_at,
    })
}

fn detail_response(order: Order) -> Result<OrderDetailResponse> {
    let items = order
        .items
        .iter()
        .map(order_item_response)
        .collect::<Result<Vec<_>>>()?;

    Ok(OrderDetailResponse {
        id: order.id,
        order_price: order.order_price()?,
        discounted_order_price: order.discounted_order_price()?,
        delivery_fee: order.delivery_fee,
        discounted_delivery_fee: order.discounted_delivery_fee(),
        coupon: order.coupon.clone().map(Into::into),
        created_at: order.created_at,
        items,
    })
}

/// Checkout: turn cart items into an order.
///
/// POST /orders
///
/// Responds 201 with a `Location: /orders/{id}` header.
pub async fn place(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse> {
    let cart_item_ids: Vec<CartItemId> = request
        .cart_item_ids
        .into_iter()
        .map(CartItemId::new)
        .collect();
    let coupon_id = request.coupon_id.map(MemberCouponId::new);

    let id = OrderService::new(state.pool())
        .place(&member, &cart_item_ids, coupon_id, state.delivery_fee())
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/orders/{id}"))],
    ))
}

/// List the member's orders, newest first.
///
/// GET /orders
pub async fn list(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
) -> Result<Json<Vec<OrderSummaryResponse>>> {
    let orders = OrderService::new(state.pool()).list(&member).await?;
    let summaries = orders
        .iter()
        .map(summary_response)
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(summaries))
}

/// Get one of the member's orders with discounted totals.
///
/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailResponse>> {
    let order = OrderService::new(state.pool())
        .get(&member, OrderId::new(id))
        .await?;
    Ok(Json(detail_response(order)?))
}

#[cfg(test)]
mod tests {
    use cart_core::{CouponId, MemberId, ProductId};

    use super::*;
    use crate::models::{
        CartItem, Coupon, DiscountPolicy, MemberCoupon, NewOrder, NewProduct, PolicyType,
        Quantity,
    };

    fn money(amount: i64) -> Money {
        Money::new(amount).expect("non-negative")
    }

    fn sample_order() -> Order {
        let product = NewProduct::new("pizza", "pizza.jpg", 10000)
            .expect("valid")
            .with_id(ProductId::new(1));
        let cart_item = CartItem::new(
            CartItemId::new(1),
            MemberId::new(1),
            product,
            Quantity::new(2).expect("valid"),
        );
        let coupon = MemberCoupon {
            id: MemberCouponId::new(3),
            member_id: MemberId::new(1),
            coupon: Coupon {
                id: CouponId::new(1),
                name: "10% off".to_owned(),
                policy: DiscountPolicy::new(PolicyType::Percent, 10, money(0)).expect("valid"),
            },
            used: false,
        };
        let new_order = NewOrder::from_cart_items(
            &[cart_item],
            money(3000),
            Some(coupon),
            MemberId::new(1),
        )
        .expect("valid");

        Order {
            id: OrderId::new(11),
            member_id: new_order.member_id,
            items: new_order.items,
            delivery_fee: new_order.delivery_fee,
            coupon: new_order.coupon,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn request_deserializes_with_optional_coupon() {
        let with: PlaceOrderRequest =
            serde_json::from_str(r#"{"cartItemIds":[1,2],"couponId":3}"#).expect("valid");
        assert_eq!(with.cart_item_ids, vec![1, 2]);
        assert_eq!(with.coupon_id, Some(3));

        let without: PlaceOrderRequest =
            serde_json::from_str(r#"{"cartItemIds":[1]}"#).expect("valid");
        assert_eq!(without.coupon_id, None);
    }

    #[test]
    fn detail_response_computes_discounted_totals() {
        let response = detail_response(sample_order()).expect("valid");
        assert_eq!(response.order_price.amount(), 20000);
        assert_eq!(response.discounted_order_price.amount(), 18000);
        assert_eq!(response.delivery_fee.amount(), 3000);
        assert_eq!(response.discounted_delivery_fee.amount(), 2700);
        assert_eq!(response.items.len(), 1);
        assert_eq!(
            response.items.first().expect("one item").subtotal.amount(),
            20000
        );
    }

    #[test]
    fn detail_response_serializes_camel_case() {
        let json = serde_json::to_value(detail_response(sample_order()).expect("valid"))
            .expect("serialize");
        assert_eq!(json["discountedOrderPrice"], 18000);
        assert_eq!(json["items"][0]["productName"], "pizza");
        assert_eq!(json["coupon"]["policyType"], "percent");
    }
}
