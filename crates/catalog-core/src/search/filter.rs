//! Product list filtering and ordering.

use crate::catalog::Product;

/// Keep products whose name, brand or code contains `query`, ignoring case.
///
/// A blank query keeps everything. Input order is preserved.
pub fn filter_products<'a, I>(products: I, query: &str) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.into_iter().collect();
    }
    products
        .into_iter()
        .filter(|p| matches_query(p, &needle))
        .collect()
}

/// Whether any searchable field contains the already lower-cased needle.
pub fn matches_query(product: &Product, needle: &str) -> bool {
    [
        product.name.as_str(),
        product.brand_name(),
        product.code.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Keep products shown on the public catalog.
pub fn only_available<'a, I>(products: I) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().filter(|p| p.is_available()).collect()
}

/// Order by creation time, newest first. Ties keep their relative order.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
