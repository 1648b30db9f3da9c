//! Category-grouped catalog sections.

use crate::catalog::{Product, Taxonomy, OTHER_CATEGORY, OTHER_ICON};
use serde::Serialize;

/// One category section of the catalog page.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSection<'a> {
    /// Taxonomy name, or [`OTHER_CATEGORY`].
    pub category: String,
    /// Heading.
    pub label: String,
    /// Icon.
    pub icon: String,
    /// Products in input order. Never empty.
    pub products: Vec<&'a Product>,
}

impl CatalogSection<'_> {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether this is the catch-all section.
    pub fn is_other(&self) -> bool {
        self.category == OTHER_CATEGORY
    }
}

/// Group products into taxonomy-ordered sections.
///
/// Products outside the taxonomy land in a trailing "Other" section (or in
/// the taxonomy's own "Other" entry when it defines one). Within a section
/// products keep their input order; callers sort by recency beforehand.
/// Sections with no products are omitted.
pub fn group_by_category<'a, I>(products: I, taxonomy: &Taxonomy) -> Vec<CatalogSection<'a>>
where
    I: IntoIterator<Item = &'a Product>,
{
    let known = taxonomy.categories();
    let other_slot = taxonomy.position(OTHER_CATEGORY);

    let mut buckets: Vec<Vec<&'a Product>> = vec![Vec::new(); known.len()];
    let mut other: Vec<&'a Product> = Vec::new();

    for product in products {
        match taxonomy.position(&product.category).or(other_slot) {
            Some(i) => buckets[i].push(product),
            None => other.push(product),
        }
    }

    let mut sections: Vec<CatalogSection<'a>> = known
        .iter()
        .zip(buckets)
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(def, bucket)| CatalogSection {
            category: def.name.clone(),
            label: def.label.clone(),
            icon: def.icon.clone(),
            products: bucket,
        })
        .collect();

    if !other.is_empty() {
        sections.push(CatalogSection {
            category: OTHER_CATEGORY.to_string(),
            label: OTHER_CATEGORY.to_string(),
            icon: OTHER_ICON.to_string(),
            products: other,
        });
    }

    sections
}
