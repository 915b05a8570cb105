//! Product route handlers.
//!
//! The catalog is public: no Basic-Auth header is required here.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

use cart_core::ProductId;

use crate::error::Result;
use crate::models::{NewProduct, Product};
use crate::services::CatalogService;
use crate::state::AppState;

/// Request body for creating or replacing a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub image_url: String,
    pub price: i64,
}

impl ProductRequest {
    fn validate(&self) -> Result<NewProduct> {
        Ok(NewProduct::new(&self.name, &self.image_url, self.price)?)
    }
}

/// List every product.
///
/// GET /products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Get a single product.
///
/// GET /products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = CatalogService::new(state.pool())
        .get(ProductId::new(id))
        .await?;
    Ok(Json(product))
}

/// Create a product.
///
/// POST /products
///
/// Responds 201 with a `Location: /products/{id}` header.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse> {
    let draft = request.validate()?;
    let id = CatalogService::new(state.pool()).create(draft).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/products/{id}"))],
    ))
}

/// Replace a product's fields.
///
/// PUT /products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ProductRequest>,
) -> Result<StatusCode> {
    let draft = request.validate()?;
    CatalogService::new(state.pool())
        .update(ProductId::new(id), draft)
        .await?;
    Ok(StatusCode::OK)
}

/// Delete a product.
///
/// DELETE /products/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    CatalogService::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_camel_case() {
        let request: ProductRequest =
            serde_json::from_str(r#"{"name":"tea","imageUrl":"tea.jpg","price":1000}"#)
                .expect("valid json");
        assert_eq!(request.name, "tea");
        assert_eq!(request.image_url, "tea.jpg");
        assert_eq!(request.price, 1000);
    }

    #[test]
    fn request_validation_rejects_bad_payloads() {
        let request = ProductRequest {
            name: "x".repeat(101),
            image_url: "x.jpg".to_owned(),
            price: 1000,
        };
        assert!(request.validate().is_err());

        let request = ProductRequest {
            name: "tea".to_owned(),
            image_url: "tea.jpg".to_owned(),
            price: -1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn product_serializes_camel_case() {
        let product = NewProduct::new("tea", "tea.jpg", 1000)
            .expect("valid")
            .with_id(ProductId::new(5));
        let json = serde_json::to_value(&product).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"id": 5, "name": "tea", "imageUrl": "tea.jpg", "price": 1000})
        );
    }
}
