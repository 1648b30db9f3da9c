//! Brands and how a product refers to one.

use crate::ids::BrandId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A brand. Names are unique, compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    /// Unique brand identifier.
    pub id: BrandId,
    /// Display name.
    pub name: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Brand {
    /// Create a new brand with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BrandId::generate(),
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name match, ignoring surrounding whitespace.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Find a brand by case-insensitive name.
pub fn find_brand_by_name<'a>(brands: &'a [Brand], name: &str) -> Option<&'a Brand> {
    brands.iter().find(|b| b.matches_name(name))
}

/// The brand of a product.
///
/// Older records store the brand as free text. Newer records reference a
/// [`Brand`] row and carry its resolved name alongside the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProductBrand {
    /// Free-text brand name.
    Name(String),
    /// Reference to a brand row.
    Linked {
        id: BrandId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ProductBrand {
    /// Name shown to users; empty when a linked brand was not resolved.
    pub fn display_name(&self) -> &str {
        match self {
            ProductBrand::Name(name) => name,
            ProductBrand::Linked { name, .. } => name.as_deref().unwrap_or(""),
        }
    }

    /// Referenced brand id, if any.
    pub fn brand_id(&self) -> Option<&BrandId> {
        match self {
            ProductBrand::Name(_) => None,
            ProductBrand::Linked { id, .. } => Some(id),
        }
    }

    /// Link to a resolved brand row.
    pub fn linked(brand: &Brand) -> Self {
        ProductBrand::Linked {
            id: brand.id.clone(),
            name: Some(brand.name.clone()),
        }
    }
}
