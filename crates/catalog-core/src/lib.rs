//! Catalog engine for the product dashboard and the public catalog page.
//!
//! This crate is pure and synchronous. It owns:
//!
//! - **Catalog**: products, brands, the category taxonomy and product code generation
//! - **Search**: text filtering, recency ordering and category grouping
//! - **Presentation**: price formatting and affiliate URL normalization
//! - **Dashboard**: the admin form and its explicit view-model transitions
//!
//! Persistence, authentication and file storage live behind the collaborator
//! traits in `catalog-backend`.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::prelude::*;
//!
//! let code = generate_code("Shirts", &products);
//!
//! let taxonomy = Taxonomy::apparel();
//! let view = CatalogView::build(&products, &taxonomy, Audience::Public, "tee");
//! for section in &view.sections {
//!     println!("{} {} ({})", section.icon, section.label, section.len());
//! }
//! ```

pub mod error;
pub mod ids;
pub mod price;
pub mod url;

pub mod catalog;
pub mod dashboard;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use price::{format_price, format_price_text, Price, PRICE_PLACEHOLDER};
pub use url::normalize_affiliate_url;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::price::{format_price, format_price_text, Price, PRICE_PLACEHOLDER};
    pub use crate::url::normalize_affiliate_url;

    // Catalog
    pub use crate::catalog::{
        find_brand_by_name, generate_code, Brand, CategoryDef, Product, ProductBrand,
        ProductDraft, Taxonomy, OTHER_CATEGORY,
    };

    // Search
    pub use crate::search::{
        filter_products, group_by_category, only_available, sort_newest_first, Audience,
        CatalogSection, CatalogView,
    };

    // Dashboard
    pub use crate::dashboard::{
        DashboardEvent, DashboardState, FormField, FormMode, LoadStatus, Notice, NoticeKind,
        ProductForm, SubmitStatus,
    };
}
