//! Cart item route handlers.
//!
//! All routes require the Basic-Auth [`AuthMember`] extractor; the resolved
//! member scopes every read and write.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use cart_core::{CartItemId, ProductId};

use crate::error::Result;
use crate::middleware::AuthMember;
use crate::models::{CartItem, Product};
use crate::services::CartService;
use crate::state::AppState;

/// Cart item wire shape with its product embedded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: CartItemId,
    pub quantity: i32,
    pub product: Product,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            quantity: item.quantity.value(),
            product: item.product,
        }
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: i64,
}

/// Request body for changing a cart item's quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// List the member's cart.
///
/// GET /cart-items
pub async fn list(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
) -> Result<Json<Vec<CartItemResponse>>> {
    let items = CartService::new(state.pool()).list(&member).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Add a product to the member's cart with quantity 1.
///
/// POST /cart-items
///
/// Responds 201 with a `Location: /cart-items/{id}` header.
pub async fn add(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
    Json(request): Json<AddCartItemRequest>,
) -> Result<impl IntoResponse> {
    let id = CartService::new(state.pool())
        .add(&member, ProductId::new(request.product_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/cart-items/{id}"))],
    ))
}

/// Change a cart item's quantity. Quantity 0 removes the row.
///
/// PATCH /cart-items/{id}
pub async fn update_quantity(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
    Path(id): Path<i64>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .update_quantity(&member, CartItemId::new(id), request.quantity)
        .await?;
    Ok(StatusCode::OK)
}

/// Remove a cart item.
///
/// DELETE /cart-items/{id}
pub async fn remove(
    State(state): State<AppState>,
    AuthMember(member): AuthMember,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .remove(&member, CartItemId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use cart_core::MemberId;

    use super::*;
    use crate::models::{NewProduct, Quantity};

    #[test]
    fn response_embeds_the_product() {
        let product = NewProduct::new("pizza", "pizza.jpg", 8900)
            .expect("valid")
            .with_id(ProductId::new(2));
        let item = CartItem::new(
            CartItemId::new(7),
            MemberId::new(1),
            product,
            Quantity::INITIAL,
        );

        let json = serde_json::to_value(CartItemResponse::from(item)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "quantity": 1,
                "product": {"id": 2, "name": "pizza", "imageUrl": "pizza.jpg", "price": 8900}
            })
        );
    }

    #[test]
    fn requests_deserialize_camel_case() {
        let add: AddCartItemRequest =
            serde_json::from_str(r#"{"productId":3}"#).expect("valid json");
        assert_eq!(add.product_id, 3);

        let update: UpdateQuantityRequest =
            serde_json::from_str(r#"{"quantity":4}"#).expect("valid json");
        assert_eq!(update.quantity, 4);
    }
}
