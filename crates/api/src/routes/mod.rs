//! HTTP route handlers for the cart API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (database ping)
//!
//! # Products (public)
//! GET    /products               - List products
//! GET    /products/{id}          - Product detail
//! POST   /products               - Create product (201 + Location)
//! PUT    /products/{id}          - Replace product
//! DELETE /products/{id}          - Delete product (204)
//!
//! # Cart (Basic auth)
//! GET    /cart-items             - Member's cart with products
//! POST   /cart-items             - Add product to cart (201 + Location)
//! PATCH  /cart-items/{id}        - Change quantity (0 removes the row)
//! DELETE /cart-items/{id}        - Remove cart item (204)
//!
//! # Coupons (Basic auth)
//! GET    /coupons                - Member's unused coupons
//!
//! # Orders (Basic auth)
//! POST   /orders                 - Checkout (201 + Location)
//! GET    /orders                 - Member's order summaries
//! GET    /orders/{id}            - Order detail with discounted totals
//! ```

pub mod cart_items;
pub mod coupons;
pub mod orders;
pub mod products;

use axum::{Router, routing::get, routing::patch};

use crate::state::AppState;

/// Create the product catalog router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the authenticated cart router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart-items", get(cart_items::list).post(cart_items::add))
        .route(
            "/cart-items/{id}",
            patch(cart_items::update_quantity).delete(cart_items::remove),
        )
}

/// Create the authenticated coupon router.
pub fn coupon_routes() -> Router<AppState> {
    Router::new().route("/coupons", get(coupons::list))
}

/// Create the authenticated order router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list).post(orders::place))
        .route("/orders/{id}", get(orders::show))
}

/// Create the full application router (without state or layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .merge(cart_routes())
        .merge(coupon_routes())
        .merge(order_routes())
}
