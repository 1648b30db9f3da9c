//! Data store interfaces.

use async_trait::async_trait;
use catalog_core::catalog::{Brand, Product, ProductDraft};
use catalog_core::ids::ProductId;
use catalog_core::search::Audience;
use serde::{Deserialize, Serialize};

use crate::BackendError;

/// Which products a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListFilter {
    /// Only products flagged available.
    pub available_only: bool,
}

impl ListFilter {
    /// Every product.
    pub fn all() -> Self {
        Self {
            available_only: false,
        }
    }

    /// Available products only.
    pub fn available() -> Self {
        Self {
            available_only: true,
        }
    }

    /// The listing an audience is allowed to see.
    pub fn for_audience(audience: Audience) -> Self {
        Self {
            available_only: audience.hides_unavailable(),
        }
    }
}

/// Product table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List products, newest first.
    async fn list_products(&self, filter: ListFilter) -> Result<Vec<Product>, BackendError>;

    /// Insert a product; the store assigns id and creation time.
    async fn insert_product(&self, draft: ProductDraft) -> Result<Product, BackendError>;

    /// Overwrite a product's fields.
    async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, BackendError>;

    /// Flip only the availability flag.
    async fn set_availability(
        &self,
        id: &ProductId,
        available: bool,
    ) -> Result<Product, BackendError>;

    /// Delete a product. Irreversible.
    async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError>;
}

/// Brand table.
#[async_trait]
pub trait BrandStore: Send + Sync {
    /// Return the brand whose name matches case-insensitively, creating it
    /// if there is none.
    async fn get_or_create_brand(&self, name: &str) -> Result<Brand, BackendError>;

    /// All brands, by name.
    async fn list_brands(&self) -> Result<Vec<Brand>, BackendError>;
}
