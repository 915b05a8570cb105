//! Product catalog service.

use sqlx::PgPool;

use cart_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product};

/// Service for catalog reads and writes.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown IDs.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("product", id))
    }

    /// Create a product and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on insert failure.
    pub async fn create(&self, draft: NewProduct) -> Result<ProductId> {
        let id = self
            .products
            .insert(draft.name(), draft.image_url(), draft.price())
            .await?;
        tracing::info!(product_id = %id, "product created");
        Ok(id)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown IDs.
    pub async fn update(&self, id: ProductId, draft: NewProduct) -> Result<()> {
        let updated = self
            .products
            .update(id, draft.name(), draft.image_url(), draft.price())
            .await?;
        if !updated {
            return Err(AppError::not_found("product", id));
        }
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown IDs.
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        let deleted = self.products.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("product", id));
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}
