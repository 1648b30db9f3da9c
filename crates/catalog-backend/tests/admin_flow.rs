//! End-to-end dashboard flows over the in-memory collaborators.

use std::sync::Arc;

use catalog_backend::prelude::*;
use chrono::{Duration, Utc};

type Service = AdminService<MemoryStore, MemoryObjectStorage>;

fn seeded(products: Vec<Product>) -> (Service, Arc<MemoryStore>, Arc<MemoryObjectStorage>) {
    let store = Arc::new(MemoryStore::with_products(products));
    let storage = Arc::new(MemoryObjectStorage::new("https://cdn.example.com/products"));
    (
        AdminService::new(store.clone(), storage.clone()),
        store,
        storage,
    )
}

fn existing(id: &str, code: &str, name: &str, category: &str, minutes_ago: i64) -> Product {
    Product::from_draft(
        ProductId::new(id),
        ProductDraft::new(code, name, category, 50.0),
        Utc::now() - Duration::minutes(minutes_ago),
    )
}

fn form(name: &str, category: &str, price: &str) -> ProductForm {
    let mut form = ProductForm::new();
    form.apply(FormField::Name(name.into()));
    form.apply(FormField::Category(category.into()));
    form.apply(FormField::Price(price.into()));
    form
}

fn set_form(state: &mut DashboardState, fields: Vec<FormField>) {
    for field in fields {
        state.apply(DashboardEvent::FieldChanged(field)).unwrap();
    }
}

#[tokio::test]
async fn test_codes_continue_per_category() {
    let (service, _, _) = seeded(vec![
        existing("p-1", "SHI001", "Oxford", "Shirts", 30),
        existing("p-2", "SHI002", "Flannel", "Shirts", 20),
        existing("p-3", "PAN001", "Chino", "Pants", 10),
    ]);
    let mut state = DashboardState::new();
    service.refresh(&mut state).await.unwrap();
    assert_eq!(state.products.len(), 3);
    assert_eq!(state.products[0].code, "PAN001");

    set_form(
        &mut state,
        vec![
            FormField::Name("Linen".into()),
            FormField::Category("Shirts".into()),
            FormField::Price("89.9".into()),
        ],
    );
    let shirt = service.submit(&mut state, None).await.unwrap().unwrap();

    set_form(
        &mut state,
        vec![
            FormField::Name("Cargo".into()),
            FormField::Category("Pants".into()),
            FormField::Price("120".into()),
        ],
    );
    let pants = service.submit(&mut state, None).await.unwrap().unwrap();

    assert_eq!(shirt.code, "SHI003");
    assert_eq!(pants.code, "PAN002");
    assert_eq!(state.notice, Some(Notice::success("Product created")));
}

#[tokio::test]
async fn test_submit_with_brand_and_image() {
    let (service, store, storage) = seeded(vec![]);
    let mut state = DashboardState::new();
    service.refresh(&mut state).await.unwrap();

    set_form(
        &mut state,
        vec![
            FormField::Name("Denim Jacket".into()),
            FormField::Brand("Northwind".into()),
            FormField::Category("Jackets".into()),
            FormField::Price("1299.5".into()),
            FormField::AffiliateUrl("shop.example.com/denim".into()),
        ],
    );
    let image = ImageUpload::new("denim jacket.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
    let product = service.submit(&mut state, Some(image)).await.unwrap().unwrap();

    assert_eq!(product.code, "JAC001");
    assert_eq!(product.display_price(), "1,299.5");
    assert_eq!(
        product.affiliate_url.as_deref(),
        Some("https://shop.example.com/denim")
    );

    let image_url = product.image_url.clone().unwrap();
    assert!(image_url.starts_with("https://cdn.example.com/products/"));
    assert!(image_url.ends_with("-denim_jacket.jpg"));
    assert_eq!(storage.len().await, 1);

    // Same brand name in another case reuses the row.
    set_form(
        &mut state,
        vec![
            FormField::Name("Overshirt".into()),
            FormField::Brand("NORTHWIND".into()),
            FormField::Category("Shirts".into()),
            FormField::Price("300".into()),
        ],
    );
    let second = service.submit(&mut state, None).await.unwrap().unwrap();
    assert_eq!(store.list_brands().await.unwrap().len(), 1);
    assert_eq!(second.brand_name(), "Northwind");
}

#[tokio::test]
async fn test_public_view_hides_unavailable() {
    let (service, _, _) = seeded(vec![
        existing("p-1", "SHI001", "Oxford", "Shirts", 30),
        existing("p-2", "TSH001", "Basic Tee", "T-Shirts", 20),
        existing("p-3", "HAT001", "Bucket Hat", "Hats", 10),
    ]);
    let mut state = DashboardState::new();
    service.refresh(&mut state).await.unwrap();
    service
        .toggle_availability(&mut state, &ProductId::new("p-3"))
        .await
        .unwrap();

    let public = service.load_catalog(Audience::Public).await.unwrap();
    let view = service.view(&public, Audience::Public, "");
    assert_eq!(view.total, 2);
    assert!(view.section(OTHER_CATEGORY).is_none());

    let admin = service.load_catalog(Audience::Admin).await.unwrap();
    let view = service.view(&admin, Audience::Admin, "");
    assert_eq!(view.total, 3);
    assert_eq!(view.sections.last().unwrap().category, OTHER_CATEGORY);

    let view = service.view(&admin, Audience::Admin, "tee");
    let categories: Vec<&str> = view.sections.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, ["T-Shirts"]);
}

#[tokio::test]
async fn test_session_gates_writes() {
    let auth = Arc::new(MemoryAuth::new().with_account("admin@example.com", "secret"));
    let (service, store, _) = seeded(vec![]);
    let service = service.with_auth(auth.clone());
    assert_eq!(audience_for(auth.as_ref()).await, Audience::Public);

    let mut state = DashboardState::new();
    set_form(
        &mut state,
        vec![
            FormField::Name("Oxford".into()),
            FormField::Category("Shirts".into()),
            FormField::Price("80".into()),
        ],
    );
    assert!(service.submit(&mut state, None).await.unwrap().is_none());
    assert!(store.products().await.is_empty());

    auth.sign_in(Credentials::new("admin@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(audience_for(auth.as_ref()).await, Audience::Admin);
    assert!(service.submit(&mut state, None).await.unwrap().is_some());
}

/// Codes are derived from the caller's snapshot and the store has no
/// uniqueness constraint, so concurrent creations in one category collide.
#[tokio::test]
async fn test_concurrent_creations_share_a_code() {
    let (service, store, _) = seeded(vec![existing("p-1", "SHI001", "Oxford", "Shirts", 5)]);
    let snapshot = service.load_catalog(Audience::Admin).await.unwrap();

    let a = form("Linen", "Shirts", "90");
    let b = form("Poplin", "Shirts", "95");
    let (first, second) = tokio::join!(
        service.save(&a, &snapshot, None),
        service.save(&b, &snapshot, None),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_eq!(first.code, "SHI002");
    assert_eq!(second.code, "SHI002");
    assert_ne!(first.id, second.id);
    assert_eq!(store.products().await.len(), 3);
}

#[tokio::test]
async fn test_price_edit_keeps_brand_link() {
    let mut product = existing("p-1", "SHI001", "Oxford", "Shirts", 5);
    product.brand = Some(ProductBrand::Linked {
        id: BrandId::new("b-9"),
        name: None,
    });
    let (service, _, _) = seeded(vec![product]);
    let mut state = DashboardState::new();
    service.refresh(&mut state).await.unwrap();

    state
        .apply(DashboardEvent::EditRequested(ProductId::new("p-1")))
        .unwrap();
    set_form(&mut state, vec![FormField::Price("99".into())]);
    let saved = service.submit(&mut state, None).await.unwrap().unwrap();

    assert_eq!(saved.price.value(), 99.0);
    assert_eq!(
        saved.brand,
        Some(ProductBrand::Linked {
            id: BrandId::new("b-9"),
            name: None,
        })
    );
}
