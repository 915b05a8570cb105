//! Cart item repository for database operations.
//!
//! Every read joins the `product` table so cart items come back with their
//! product attached; a cart row whose product vanished is a data error.

use sqlx::PgPool;

use cart_core::{CartItemId, MemberId, Money, ProductId};

use super::{RepositoryError, corrupt};
use crate::models::{CartItem, Product, Quantity};

/// Internal row type for cart item + product join queries.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: i64,
    member_id: i64,
    quantity: i32,
    product_id: i64,
    product_name: String,
    product_image_url: String,
    product_price: i64,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = RepositoryError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let price = Money::new(row.product_price)
            .map_err(|e| corrupt("invalid price in database", e))?;
        let quantity =
            Quantity::new(row.quantity).map_err(|e| corrupt("invalid quantity in database", e))?;

        Ok(Self::new(
            CartItemId::new(row.id),
            MemberId::new(row.member_id),
            Product {
                id: ProductId::new(row.product_id),
                name: row.product_name,
                image_url: row.product_image_url,
                price,
            },
            quantity,
        ))
    }
}

const SELECT_WITH_PRODUCT: &str = "\
SELECT ci.id, ci.member_id, ci.quantity, \
       p.id AS product_id, p.name AS product_name, \
       p.image_url AS product_image_url, p.price AS product_price \
FROM cart_item ci \
JOIN product p ON p.id = ci.product_id";

/// Repository for cart item database operations.
pub struct CartItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a member's cart items with their products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(&format!(
            "{SELECT_WITH_PRODUCT} WHERE ci.member_id = $1 ORDER BY ci.id"
        ))
        .bind(member_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }

    /// Get a cart item with its product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(&format!(
            "{SELECT_WITH_PRODUCT} WHERE ci.id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(CartItem::try_from).transpose()
    }

    /// Get several cart items with their products, in ID order.
    ///
    /// Missing IDs are silently absent from the result; the caller decides
    /// whether that is an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(
        &self,
        ids: &[CartItemId],
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        let rows = sqlx::query_as::<_, CartItemRow>(&format!(
            "{SELECT_WITH_PRODUCT} WHERE ci.id = ANY($1) ORDER BY ci.id"
        ))
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }

    /// Insert a cart row and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// foreign-key violations for unknown products).
    pub async fn insert(
        &self,
        member_id: MemberId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartItemId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO cart_item (member_id, product_id, quantity) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(member_id.as_i64())
        .bind(product_id.as_i64())
        .bind(quantity.value())
        .fetch_one(self.pool)
        .await?;

        Ok(CartItemId::new(id))
    }

    /// Replace a cart row's quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE cart_item SET quantity = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(quantity.value())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Delete a cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CartItemId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_item WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
