//! Product catalog domain types.

use serde::Serialize;

use cart_core::{Money, ProductId};

use super::DomainError;

/// Maximum product name length, matching the `VARCHAR(100)` column.
pub const MAX_NAME_LENGTH: usize = 100;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: Money,
}

/// A validated product payload without an assigned ID.
///
/// Used for both creation and full updates; validation happens once here so
/// repositories can trust the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    image_url: String,
    price: Money,
}

impl NewProduct {
    /// Validate a product payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the name is empty or longer than
    /// [`MAX_NAME_LENGTH`] characters, the image URL is empty, or the price
    /// is negative.
    pub fn new(name: &str, image_url: &str, price: i64) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyProductName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::ProductNameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }
        if image_url.trim().is_empty() {
            return Err(DomainError::EmptyImageUrl);
        }

        Ok(Self {
            name: name.to_owned(),
            image_url: image_url.trim().to_owned(),
            price: Money::new(price)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Attach a persisted ID, producing a full [`Product`].
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            image_url: self.image_url,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_valid_product() {
        let draft = NewProduct::new("herb tea", "tea.jpg", 1000).expect("valid");
        assert_eq!(draft.name(), "herb tea");
        assert_eq!(draft.image_url(), "tea.jpg");
        assert_eq!(draft.price().amount(), 1000);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let draft = NewProduct::new("  cat  ", " cat.jpg ", 0).expect("valid");
        assert_eq!(draft.name(), "cat");
        assert_eq!(draft.image_url(), "cat.jpg");
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            NewProduct::new("   ", "tea.jpg", 1000),
            Err(DomainError::EmptyProductName)
        );
    }

    #[test]
    fn rejects_name_over_100_chars() {
        let name = "허".repeat(101);
        assert_eq!(
            NewProduct::new(&name, "tea.jpg", 1000),
            Err(DomainError::ProductNameTooLong { max: 100 })
        );
        // Exactly 100 characters is fine (char count, not byte count).
        assert!(NewProduct::new(&"허".repeat(100), "tea.jpg", 1000).is_ok());
    }

    #[test]
    fn rejects_empty_image_url() {
        assert_eq!(
            NewProduct::new("tea", "", 1000),
            Err(DomainError::EmptyImageUrl)
        );
    }

    #[test]
    fn rejects_negative_price() {
        assert!(matches!(
            NewProduct::new("tea", "tea.jpg", -1),
            Err(DomainError::Money(_))
        ));
    }

    #[test]
    fn with_id_produces_a_product() {
        let product = NewProduct::new("tea", "tea.jpg", 1000)
            .expect("valid")
            .with_id(ProductId::new(1));
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "tea");
    }
}
