//! Product types.

use crate::catalog::ProductBrand;
use crate::ids::ProductId;
use crate::price::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_available() -> bool {
    true
}

/// A product in the catalog.
///
/// Records are deserialized leniently: missing optional fields default and a
/// malformed price becomes [`Price::missing`] instead of failing the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier assigned by the data store.
    pub id: ProductId,
    /// Human-readable code, e.g. "SHI003".
    #[serde(default)]
    pub code: String,
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Brand, as free text or a brand reference.
    #[serde(default)]
    pub brand: Option<ProductBrand>,
    /// Category as stored. Never rewritten.
    #[serde(default)]
    pub category: String,
    /// Price; may be missing.
    #[serde(default = "Price::missing")]
    pub price: Price,
    /// Shown on the public catalog.
    #[serde(default = "default_available")]
    pub available: bool,
    /// Outbound shop link.
    #[serde(default)]
    pub affiliate_url: Option<String>,
    /// Public image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Creation time, used only for ordering.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Materialize a stored product from a draft.
    pub fn from_draft(id: ProductId, draft: ProductDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code: draft.code,
            name: draft.name,
            brand: draft.brand,
            category: draft.category,
            price: draft.price,
            available: draft.available,
            affiliate_url: draft.affiliate_url,
            image_url: draft.image_url,
            created_at,
        }
    }

    /// Apply an edit, keeping identity and creation time.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        self.code = draft.code;
        self.name = draft.name;
        self.brand = draft.brand;
        self.category = draft.category;
        self.price = draft.price;
        self.available = draft.available;
        self.affiliate_url = draft.affiliate_url;
        self.image_url = draft.image_url;
    }

    /// Brand name for display and search; empty when there is none.
    pub fn brand_name(&self) -> &str {
        self.brand.as_ref().map(|b| b.display_name()).unwrap_or("")
    }

    /// Check if the product is shown on the public catalog.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Formatted price, or the placeholder.
    pub fn display_price(&self) -> String {
        self.price.display()
    }
}

/// A validated product payload ready to be inserted or updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub brand: Option<ProductBrand>,
    pub category: String,
    pub price: Price,
    pub available: bool,
    pub affiliate_url: Option<String>,
    pub image_url: Option<String>,
}

impl ProductDraft {
    /// Create a draft with the required fields.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<Price>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            brand: None,
            category: category.into(),
            price: price.into(),
            available: true,
            affiliate_url: None,
            image_url: None,
        }
    }

    /// Set a free-text brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(ProductBrand::Name(brand.into()));
        self
    }

    /// Set availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.price,
            available: product.available,
            affiliate_url: product.affiliate_url.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRICE_PLACEHOLDER;

    #[test]
    fn test_product_from_draft() {
        let draft = ProductDraft::new("SHI001", "Oxford Shirt", "Shirts", 120000.0).with_brand("Acme");
        let product = Product::from_draft(ProductId::new("p-1"), draft, Utc::now());
        assert_eq!(product.code, "SHI001");
        assert_eq!(product.brand_name(), "Acme");
        assert_eq!(product.display_price(), "120,000");
        assert!(product.is_available());
    }

    #[test]
    fn test_lenient_record() {
        let product: Product = serde_json::from_str(
            r#"{"id": "p-9", "name": "Mystery", "price": "n/a", "category": "Gadgets"}"#,
        )
        .unwrap();
        assert_eq!(product.brand_name(), "");
        assert_eq!(product.display_price(), PRICE_PLACEHOLDER);
        assert!(product.available);
        assert_eq!(product.code, "");
    }

    #[test]
    fn test_apply_draft_keeps_identity() {
        let created = Utc::now();
        let mut product = Product::from_draft(
            ProductId::new("p-1"),
            ProductDraft::new("PAN001", "Chinos", "Pants", 90.0),
            created,
        );
        product.apply_draft(ProductDraft::new("PAN001", "Slim Chinos", "Pants", 95.0).with_available(false));
        assert_eq!(product.id.as_str(), "p-1");
        assert_eq!(product.created_at, created);
        assert_eq!(product.name, "Slim Chinos");
        assert!(!product.available);
    }
}
