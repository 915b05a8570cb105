//! Cart service.
//!
//! Every mutation re-reads the cart row and runs the ownership guard before
//! touching the database, so one member can never edit another's cart.

use sqlx::PgPool;

use cart_core::{CartItemId, ProductId};

use crate::db::{CartItemRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::{CartItem, Member, Quantity};

/// Service for a member's cart.
pub struct CartService<'a> {
    cart_items: CartItemRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            cart_items: CartItemRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// List the member's cart items with their products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn list(&self, member: &Member) -> Result<Vec<CartItem>> {
        Ok(self.cart_items.list_by_member(member.id).await?)
    }

    /// Add a product to the member's cart with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown products.
    pub async fn add(&self, member: &Member, product_id: ProductId) -> Result<CartItemId> {
        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product", product_id))?;

        let id = self
            .cart_items
            .insert(member.id, product.id, Quantity::INITIAL)
            .await?;
        tracing::info!(member_id = %member.id, cart_item_id = %id, "cart item added");
        Ok(id)
    }

    /// Change a cart item's quantity. Quantity 0 removes the row.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown items, a 403-mapped error for
    /// foreign items, and a 400-mapped error for negative quantities.
    pub async fn update_quantity(
        &self,
        member: &Member,
        id: CartItemId,
        quantity: i32,
    ) -> Result<()> {
        let mut item = self.owned_item(member, id).await?;

        if quantity == 0 {
            self.cart_items.delete(item.id).await?;
            return Ok(());
        }

        item.change_quantity(quantity)?;
        self.cart_items.update_quantity(item.id, item.quantity).await?;
        Ok(())
    }

    /// Remove a cart item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown items and a 403-mapped error
    /// for foreign items.
    pub async fn remove(&self, member: &Member, id: CartItemId) -> Result<()> {
        let item = self.owned_item(member, id).await?;
        self.cart_items.delete(item.id).await?;
        Ok(())
    }

    /// Fetch a cart item and verify the member owns it.
    async fn owned_item(&self, member: &Member, id: CartItemId) -> Result<CartItem> {
        let item = self
            .cart_items
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("cart item", id))?;
        item.ensure_owner(member.id)?;
        Ok(item)
    }
}
