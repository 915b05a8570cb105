//! Product repository for database operations.

use sqlx::PgPool;

use cart_core::{Money, ProductId};

use super::{RepositoryError, corrupt};
use crate::models::Product;

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    image_url: String,
    price: i64,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price =
            Money::new(row.price).map_err(|e| corrupt("invalid price in database", e))?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            image_url: row.image_url,
            price,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image_url, price FROM product ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image_url, price FROM product WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a new product and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        name: &str,
        image_url: &str,
        price: Money,
    ) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO product (name, image_url, price) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(image_url)
        .bind(price.amount())
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// Replace a product's fields. Returns false when the row is missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        image_url: &str,
        price: Money,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE product SET name = $2, image_url = $3, price = $4 WHERE id = $1",
        )
        .bind(id.as_i64())
        .bind(name)
        .bind(image_url)
        .bind(price.amount())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a product. Returns false when the row is missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
