//! Collaborators for the catalog engine.
//!
//! The catalog engine never talks to the hosted backend itself. This crate
//! defines the narrow interfaces it needs and wires them to the dashboard:
//!
//! - [`ProductStore`] / [`BrandStore`]: relational storage
//! - [`ObjectStorage`]: image uploads
//! - [`AuthProvider`]: "is someone signed in"
//! - [`AdminService`]: drives [`DashboardState`] transitions through the
//!   collaborators
//!
//! In-memory implementations back the tests and the CLI.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_backend::prelude::*;
//!
//! let service = AdminService::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryObjectStorage::new("https://cdn.example.com/products")),
//! );
//!
//! let mut state = DashboardState::new();
//! service.refresh(&mut state).await?;
//! state.apply(DashboardEvent::FieldChanged(FormField::Name("Oxford".into())))?;
//! service.submit(&mut state, None).await?;
//! ```
//!
//! [`DashboardState`]: catalog_core::dashboard::DashboardState

mod admin;
mod auth;
mod error;
mod memory;
mod storage;
mod store;

pub use admin::{AdminService, ImageUpload};
pub use auth::{audience_for, AuthProvider, Credentials, Identity, MemoryAuth};
pub use error::BackendError;
pub use memory::MemoryStore;
pub use storage::{object_key, MemoryObjectStorage, ObjectStorage, StoredObject};
pub use store::{BrandStore, ListFilter, ProductStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        audience_for, object_key, AdminService, AuthProvider, BackendError, BrandStore,
        Credentials, Identity, ImageUpload, ListFilter, MemoryAuth, MemoryObjectStorage,
        MemoryStore, ObjectStorage, ProductStore,
    };
    pub use catalog_core::prelude::*;
}
