//! The catalog page as shown to a given audience.

use crate::catalog::{Product, Taxonomy};
use crate::search::{filter_products, group_by_category, only_available, CatalogSection};
use serde::{Deserialize, Serialize};

/// Who is looking at the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Signed-in administrator; sees every product.
    Admin,
    /// Anonymous visitor; sees available products only.
    #[default]
    Public,
}

impl Audience {
    /// Map the "is authenticated" fact to an audience.
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            Audience::Admin
        } else {
            Audience::Public
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Admin => "admin",
            Audience::Public => "public",
        }
    }

    /// Whether unavailable products are hidden.
    pub fn hides_unavailable(&self) -> bool {
        matches!(self, Audience::Public)
    }
}

/// Filtered, grouped catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    /// Audience the view was built for.
    pub audience: Audience,
    /// Trimmed search text.
    pub query: String,
    /// Non-empty sections in taxonomy order.
    pub sections: Vec<CatalogSection<'a>>,
    /// Number of products shown across all sections.
    pub total: usize,
}

impl<'a> CatalogView<'a> {
    /// Build the view: availability (public only), then search, then grouping.
    ///
    /// `products` should already be ordered newest first.
    pub fn build(
        products: &'a [Product],
        taxonomy: &Taxonomy,
        audience: Audience,
        query: &str,
    ) -> Self {
        let visible = if audience.hides_unavailable() {
            only_available(products)
        } else {
            products.iter().collect()
        };
        let matched = filter_products(visible, query);
        let total = matched.len();

        Self {
            audience,
            query: query.trim().to_string(),
            sections: group_by_category(matched, taxonomy),
            total,
        }
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Find a section by category name.
    pub fn section(&self, category: &str) -> Option<&CatalogSection<'a>> {
        self.sections.iter().find(|s| s.category == category)
    }
}
