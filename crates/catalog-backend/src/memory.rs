//! In-memory product and brand store.
//!
//! Behaves like the hosted tables: ids and creation times are assigned on
//! insert, listings come back newest first, and there is no uniqueness
//! constraint on product codes.

use async_trait::async_trait;
use catalog_core::catalog::{find_brand_by_name, Brand, Product, ProductBrand, ProductDraft};
use catalog_core::ids::ProductId;
use catalog_core::search::sort_newest_first;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{event, instrument, Level};

use crate::store::{BrandStore, ListFilter, ProductStore};
use crate::BackendError;

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    brands: Vec<Brand>,
}

/// Product and brand tables held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing rows. Brands referenced by the products
    /// with a resolved name are registered as brand rows.
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut brands: Vec<Brand> = Vec::new();
        for product in &products {
            if let Some(ProductBrand::Linked {
                id,
                name: Some(name),
            }) = &product.brand
            {
                if !brands.iter().any(|b| &b.id == id) {
                    brands.push(Brand {
                        id: id.clone(),
                        name: name.clone(),
                        created_at: product.created_at,
                    });
                }
            }
        }
        Self {
            tables: RwLock::new(Tables { products, brands }),
        }
    }

    /// Add brand rows that no product links to yet.
    pub fn with_brands(mut self, brands: Vec<Brand>) -> Self {
        let tables = self.tables.get_mut();
        for brand in brands {
            if !tables.brands.iter().any(|b| b.id == brand.id) {
                tables.brands.push(brand);
            }
        }
        self
    }

    /// Every product in insertion order.
    pub async fn products(&self) -> Vec<Product> {
        self.tables.read().await.products.clone()
    }
}

fn require_name(draft: &ProductDraft) -> Result<(), BackendError> {
    if draft.name.trim().is_empty() {
        return Err(BackendError::ConstraintViolation(
            "products.name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Strictly increasing creation times, so "newest first" is total even
/// when two inserts land on the same clock tick.
fn next_created_at(products: &[Product]) -> DateTime<Utc> {
    let now = Utc::now();
    match products.iter().map(|p| p.created_at).max() {
        Some(latest) if latest >= now => latest + Duration::microseconds(1),
        _ => now,
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    #[instrument(skip(self))]
    async fn list_products(&self, filter: ListFilter) -> Result<Vec<Product>, BackendError> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| !filter.available_only || p.available)
            .cloned()
            .collect();
        sort_newest_first(&mut products);
        event!(Level::DEBUG, count = products.len(), "listed products");
        Ok(products)
    }

    #[instrument(skip(self, draft), fields(code = %draft.code))]
    async fn insert_product(&self, draft: ProductDraft) -> Result<Product, BackendError> {
        require_name(&draft)?;
        let mut tables = self.tables.write().await;
        let created_at = next_created_at(&tables.products);
        let product = Product::from_draft(ProductId::generate(), draft, created_at);
        tables.products.push(product.clone());
        event!(Level::DEBUG, id = %product.id, "inserted product");
        Ok(product)
    }

    #[instrument(skip(self, draft), fields(id = %id))]
    async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, BackendError> {
        require_name(&draft)?;
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("product {}", id)))?;
        product.apply_draft(draft);
        Ok(product.clone())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn set_availability(
        &self,
        id: &ProductId,
        available: bool,
    ) -> Result<Product, BackendError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("product {}", id)))?;
        product.available = available;
        Ok(product.clone())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| &p.id != id);
        if tables.products.len() == before {
            return Err(BackendError::NotFound(format!("product {}", id)));
        }
        event!(Level::DEBUG, "deleted product");
        Ok(())
    }
}

#[async_trait]
impl BrandStore for MemoryStore {
    #[instrument(skip(self))]
    async fn get_or_create_brand(&self, name: &str) -> Result<Brand, BackendError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BackendError::ConstraintViolation(
                "brands.name must not be empty".to_string(),
            ));
        }

        let mut tables = self.tables.write().await;
        if let Some(existing) = find_brand_by_name(&tables.brands, name) {
            return Ok(existing.clone());
        }

        let brand = Brand::new(name);
        tables.brands.push(brand.clone());
        event!(Level::INFO, id = %brand.id, name = %brand.name, "created brand");
        Ok(brand)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, BackendError> {
        let mut brands = self.tables.read().await.brands.clone();
        brands.sort_by_key(|b| b.name.to_lowercase());
        Ok(brands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ids::BrandId;

    fn draft(code: &str, name: &str) -> ProductDraft {
        ProductDraft::new(code, name, "Shirts", 45.0)
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let store = MemoryStore::new();
        store.insert_product(draft("SHI001", "First")).await.unwrap();
        store.insert_product(draft("SHI002", "Second")).await.unwrap();

        let listed = store.list_products(ListFilter::all()).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Second", "First"]);
    }

    #[tokio::test]
    async fn test_available_filter() {
        let store = MemoryStore::new();
        store.insert_product(draft("A", "Shown")).await.unwrap();
        store
            .insert_product(draft("B", "Hidden").with_available(false))
            .await
            .unwrap();

        let listed = store.list_products(ListFilter::available()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Shown");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_product(&ProductId::new("nope"), draft("X", "X"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let store = MemoryStore::new();
        let err = store.insert_product(draft("X", "  ")).await.unwrap_err();
        assert!(matches!(err, BackendError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_set_availability_and_delete() {
        let store = MemoryStore::new();
        let p = store.insert_product(draft("A", "Thing")).await.unwrap();

        let toggled = store.set_availability(&p.id, false).await.unwrap();
        assert!(!toggled.available);

        store.delete_product(&p.id).await.unwrap();
        assert!(store.products().await.is_empty());
        assert!(store.delete_product(&p.id).await.is_err());
    }

    #[tokio::test]
    async fn test_get_or_create_brand_is_case_insensitive() {
        let store = MemoryStore::new();
        let a = store.get_or_create_brand("Acme").await.unwrap();
        let b = store.get_or_create_brand("  ACME ").await.unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(store.list_brands().await.unwrap().len(), 1);

        assert!(store.get_or_create_brand("").await.is_err());
    }

    #[tokio::test]
    async fn test_seed_registers_linked_brands() {
        let mut seeded = draft("SHI001", "Seeded");
        seeded.brand = Some(ProductBrand::Linked {
            id: BrandId::new("b-1"),
            name: Some("Northwind".into()),
        });
        let product = Product::from_draft(ProductId::new("p-1"), seeded, Utc::now());
        let store = MemoryStore::with_products(vec![product]);

        let brand = store.get_or_create_brand("northwind").await.unwrap();
        assert_eq!(brand.id.as_str(), "b-1");
    }

    #[tokio::test]
    async fn test_with_brands_skips_known_ids() {
        let acme = Brand::new("Acme");
        let store = MemoryStore::new().with_brands(vec![acme.clone(), acme.clone()]);
        assert_eq!(store.list_brands().await.unwrap(), vec![acme]);
    }
}
