//! Admin dashboard orchestration.
//!
//! [`AdminService`] runs the collaborator calls behind each dashboard action
//! and feeds the outcome back into a [`DashboardState`] as events. Failures
//! of the store or storage become `LoadFailed`/`SubmitFailed`/`ActionFailed`
//! transitions; only a rejected transition is returned as an error.
//!
//! Product codes are computed from the caller's snapshot. Two creations in
//! the same category from the same snapshot get the same code; the store
//! does not reject duplicates.

use std::sync::Arc;

use catalog_core::catalog::{generate_code, Product, ProductBrand, ProductDraft, Taxonomy};
use catalog_core::dashboard::{DashboardEvent, DashboardState, ProductForm};
use catalog_core::ids::ProductId;
use catalog_core::search::{Audience, CatalogView};
use catalog_core::CatalogError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::auth::AuthProvider;
use crate::storage::{object_key, ObjectStorage};
use crate::store::{BrandStore, ListFilter, ProductStore};
use crate::BackendError;

/// An image picked in the form, uploaded on submit.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Admin actions over injected collaborators.
pub struct AdminService<S, O> {
    store: Arc<S>,
    storage: Arc<O>,
    auth: Option<Arc<dyn AuthProvider>>,
    taxonomy: Taxonomy,
}

impl<S, O> AdminService<S, O>
where
    S: ProductStore + BrandStore,
    O: ObjectStorage,
{
    /// Service with the default taxonomy and no sign-in requirement.
    pub fn new(store: Arc<S>, storage: Arc<O>) -> Self {
        Self {
            store,
            storage,
            auth: None,
            taxonomy: Taxonomy::default(),
        }
    }

    /// Use a custom taxonomy for catalog views.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Require a signed-in user for writes.
    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reload the product snapshot.
    #[instrument(skip(self, state))]
    pub async fn refresh(&self, state: &mut DashboardState) -> Result<(), BackendError> {
        state.apply(DashboardEvent::LoadStarted)?;
        match self.store.list_products(ListFilter::all()).await {
            Ok(products) => {
                event!(Level::DEBUG, count = products.len(), "snapshot loaded");
                state.apply(DashboardEvent::LoadSucceeded(products))?;
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "snapshot load failed");
                state.apply(DashboardEvent::LoadFailed(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Submit the form. Returns the saved product, or `None` when the save
    /// failed and the failure was recorded in `state`.
    #[instrument(skip(self, state, image), fields(mode = state.mode().as_str()))]
    pub async fn submit(
        &self,
        state: &mut DashboardState,
        image: Option<ImageUpload>,
    ) -> Result<Option<Product>, BackendError> {
        state.apply(DashboardEvent::SubmitStarted)?;
        let outcome = self.save(&state.form, &state.products, image).await;
        match outcome {
            Ok(product) => {
                state.apply(DashboardEvent::SubmitSucceeded(product.clone()))?;
                Ok(Some(product))
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "submit failed");
                state.apply(DashboardEvent::SubmitFailed(e.to_string()))?;
                Ok(None)
            }
        }
    }

    /// Validate, resolve the brand, write the product, then upload the image
    /// and point the product at it.
    ///
    /// Create mode derives the code from `snapshot`; edit mode keeps the
    /// product's existing code. If the upload fails after a create, the
    /// product stays saved without the new image.
    #[instrument(skip(self, form, snapshot, image), fields(mode = form.mode().as_str()))]
    pub async fn save(
        &self,
        form: &ProductForm,
        snapshot: &[Product],
        image: Option<ImageUpload>,
    ) -> Result<Product, BackendError> {
        self.ensure_signed_in().await?;

        let code = match (&form.id, &form.code) {
            (Some(_), Some(code)) => code.clone(),
            _ => generate_code(form.category.trim(), snapshot),
        };
        let mut draft = form.to_draft(code)?;
        self.resolve_brand(&mut draft).await?;

        let mut product = match &form.id {
            Some(id) => self.store.update_product(id, draft).await?,
            None => self.store.insert_product(draft).await?,
        };

        // Upload after the write; a rejected write stores no object.
        if let Some(image) = image {
            let key = object_key(&image.file_name, Utc::now().timestamp_millis());
            let url = self
                .storage
                .upload(&key, image.bytes, &image.content_type)
                .await?;
            event!(Level::DEBUG, %key, "image uploaded");
            let mut draft = ProductDraft::from(&product);
            draft.image_url = Some(url);
            product = self.store.update_product(&product.id, draft).await?;
        }
        event!(Level::INFO, id = %product.id, code = %product.code, "product saved");
        Ok(product)
    }

    /// Delete a product. Irreversible.
    #[instrument(skip(self, state), fields(id = %id))]
    pub async fn delete(
        &self,
        state: &mut DashboardState,
        id: &ProductId,
    ) -> Result<(), BackendError> {
        let outcome = match self.ensure_signed_in().await {
            Ok(()) => self.store.delete_product(id).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => {
                event!(Level::INFO, "product deleted");
                state.apply(DashboardEvent::Deleted(id.clone()))?;
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "delete failed");
                state.apply(DashboardEvent::ActionFailed(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Flip a product's availability.
    #[instrument(skip(self, state), fields(id = %id))]
    pub async fn toggle_availability(
        &self,
        state: &mut DashboardState,
        id: &ProductId,
    ) -> Result<(), BackendError> {
        let available = state
            .product(id)
            .map(|p| !p.available)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;

        let outcome = match self.ensure_signed_in().await {
            Ok(()) => self.store.set_availability(id, available).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(product) => {
                event!(Level::INFO, available, "availability changed");
                state.apply(DashboardEvent::ProductChanged(product))?;
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "availability change failed");
                state.apply(DashboardEvent::ActionFailed(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Products an audience may see, newest first.
    #[instrument(skip(self), fields(audience = audience.as_str()))]
    pub async fn load_catalog(&self, audience: Audience) -> Result<Vec<Product>, BackendError> {
        self.store
            .list_products(ListFilter::for_audience(audience))
            .await
    }

    /// Grouped, searched view over loaded products.
    pub fn view<'a>(
        &self,
        products: &'a [Product],
        audience: Audience,
        query: &str,
    ) -> CatalogView<'a> {
        CatalogView::build(products, &self.taxonomy, audience, query)
    }

    async fn resolve_brand(&self, draft: &mut ProductDraft) -> Result<(), BackendError> {
        if let Some(ProductBrand::Name(name)) = &draft.brand {
            let brand = self.store.get_or_create_brand(name).await?;
            draft.brand = Some(ProductBrand::linked(&brand));
        }
        Ok(())
    }

    async fn ensure_signed_in(&self) -> Result<(), BackendError> {
        match &self.auth {
            Some(auth) if auth.current_identity().await.is_none() => {
                Err(BackendError::Unauthorized)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, MemoryAuth};
    use crate::memory::MemoryStore;
    use crate::storage::MemoryObjectStorage;
    use catalog_core::dashboard::{FormField, NoticeKind};

    type Service = AdminService<MemoryStore, MemoryObjectStorage>;

    fn service() -> Service {
        AdminService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryObjectStorage::new("https://cdn.test")),
        )
    }

    fn fill(state: &mut DashboardState, name: &str, category: &str, price: &str) {
        for field in [
            FormField::Name(name.into()),
            FormField::Category(category.into()),
            FormField::Price(price.into()),
        ] {
            state.apply(DashboardEvent::FieldChanged(field)).unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_generates_code_from_snapshot() {
        let service = service();
        let mut state = DashboardState::new();
        service.refresh(&mut state).await.unwrap();

        fill(&mut state, "Oxford", "Shirts", "80");
        let first = service.submit(&mut state, None).await.unwrap().unwrap();
        fill(&mut state, "Linen", "Shirts", "95");
        let second = service.submit(&mut state, None).await.unwrap().unwrap();

        assert_eq!(first.code, "SHI001");
        assert_eq!(second.code, "SHI002");
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[0].code, "SHI002");
    }

    #[tokio::test]
    async fn test_edit_keeps_code() {
        let service = service();
        let mut state = DashboardState::new();
        service.refresh(&mut state).await.unwrap();
        fill(&mut state, "Oxford", "Shirts", "80");
        let created = service.submit(&mut state, None).await.unwrap().unwrap();

        state
            .apply(DashboardEvent::EditRequested(created.id.clone()))
            .unwrap();
        state
            .apply(DashboardEvent::FieldChanged(FormField::Category("Pants".into())))
            .unwrap();
        let updated = service.submit(&mut state, None).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.code, "SHI001");
        assert_eq!(updated.category, "Pants");
    }

    #[tokio::test]
    async fn test_validation_failure_is_recorded() {
        let service = service();
        let mut state = DashboardState::new();
        fill(&mut state, "Oxford", "Shirts", "cheap");

        let saved = service.submit(&mut state, None).await.unwrap();
        assert!(saved.is_none());
        assert!(!state.is_submitting());
        assert_eq!(state.notice.as_ref().unwrap().kind, NoticeKind::Failure);
        assert_eq!(state.form.price, "cheap");
    }

    #[tokio::test]
    async fn test_brand_is_linked() {
        let service = service();
        let mut state = DashboardState::new();
        fill(&mut state, "Oxford", "Shirts", "80");
        state
            .apply(DashboardEvent::FieldChanged(FormField::Brand("Acme".into())))
            .unwrap();

        let product = service.submit(&mut state, None).await.unwrap().unwrap();
        let brands = service.store().list_brands().await.unwrap();
        assert_eq!(brands.len(), 1);
        assert_eq!(product.brand.as_ref().unwrap().brand_id(), Some(&brands[0].id));
        assert_eq!(product.brand_name(), "Acme");
    }

    #[tokio::test]
    async fn test_toggle_and_delete() {
        let service = service();
        let mut state = DashboardState::new();
        fill(&mut state, "Oxford", "Shirts", "80");
        let product = service.submit(&mut state, None).await.unwrap().unwrap();

        service
            .toggle_availability(&mut state, &product.id)
            .await
            .unwrap();
        assert!(!state.products[0].available);

        service.delete(&mut state, &product.id).await.unwrap();
        assert!(state.products.is_empty());

        let err = service
            .toggle_availability(&mut state, &product.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::Catalog(CatalogError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_writes_require_sign_in_when_auth_is_set() {
        let auth = Arc::new(MemoryAuth::new().with_account("admin@example.com", "pw"));
        let service = service().with_auth(auth.clone());
        let mut state = DashboardState::new();
        fill(&mut state, "Oxford", "Shirts", "80");

        assert!(service.submit(&mut state, None).await.unwrap().is_none());
        assert_eq!(state.notice.as_ref().unwrap().kind, NoticeKind::Failure);

        auth.sign_in(Credentials::new("admin@example.com", "pw"))
            .await
            .unwrap();
        assert!(service.submit(&mut state, None).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_write_uploads_nothing() {
        let storage = Arc::new(MemoryObjectStorage::new("https://cdn.test"));
        let service = AdminService::new(Arc::new(MemoryStore::new()), storage.clone());

        let form = ProductForm {
            id: Some(ProductId::new("missing")),
            code: Some("SHI001".into()),
            name: "Oxford".into(),
            category: "Shirts".into(),
            price: "80".into(),
            ..ProductForm::default()
        };
        let image = ImageUpload::new("a.png", "image/png", vec![1, 2, 3]);

        let err = service.save(&form, &[], Some(image)).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));
        assert_eq!(storage.len().await, 0);
    }

    #[tokio::test]
    async fn test_image_url_set_after_create() {
        let service = service();
        let form = ProductForm {
            name: "Oxford".into(),
            category: "Shirts".into(),
            price: "80".into(),
            ..ProductForm::default()
        };
        let image = ImageUpload::new("a.png", "image/png", vec![1, 2, 3]);

        let product = service.save(&form, &[], Some(image)).await.unwrap();
        let url = product.image_url.clone().unwrap();
        assert!(url.starts_with("https://cdn.test/"));

        let stored = service.load_catalog(Audience::Admin).await.unwrap();
        assert_eq!(stored[0].image_url.as_deref(), Some(url.as_str()));
        assert_eq!(stored[0].code, "SHI001");
    }

    #[test]
    fn test_image_upload_debug_omits_bytes() {
        let image = ImageUpload::new("a.png", "image/png", vec![0; 4096]);
        assert!(format!("{:?}", image).contains("size: 4096"));
    }
}
