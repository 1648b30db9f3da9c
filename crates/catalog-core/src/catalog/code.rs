//! Product code generation.
//!
//! A code is a category prefix plus a running per-category number, e.g.
//! `SHI003` for the third product in "Shirts". The number is derived from
//! the product list snapshot the caller holds, so two writers working from
//! the same snapshot compute the same code. Codes are unique only as long
//! as creations in a category are not concurrent.

use crate::catalog::Product;

/// Prefix used when the category is blank.
pub const FALLBACK_PREFIX: &str = "OTH";

/// Number of category characters in the prefix.
pub const PREFIX_LEN: usize = 3;

/// Minimum width of the zero-padded number.
pub const SUFFIX_WIDTH: usize = 3;

/// Upper-cased first three characters of the category, or [`FALLBACK_PREFIX`].
///
/// A blank or whitespace-only category gets [`FALLBACK_PREFIX`]. Any other
/// category is taken as given, surrounding spaces included; callers trim
/// first (the product form does).
pub fn code_prefix(category: &str) -> String {
    if category.trim().is_empty() {
        return FALLBACK_PREFIX.to_string();
    }
    category
        .chars()
        .take(PREFIX_LEN)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Generate the code for a new product in `category`.
///
/// The number is one more than the count of `existing` products whose
/// category equals `category` exactly. Categories outside the taxonomy are
/// accepted as is.
pub fn generate_code(category: &str, existing: &[Product]) -> String {
    let count = existing.iter().filter(|p| p.category == category).count();
    format!(
        "{}{:0width$}",
        code_prefix(category),
        count + 1,
        width = SUFFIX_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use crate::ids::ProductId;
    use chrono::Utc;

    fn product(category: &str) -> Product {
        Product::from_draft(
            ProductId::generate(),
            ProductDraft::new("", "item", category, 10.0),
            Utc::now(),
        )
    }

    #[test]
    fn test_scenario_shirts_and_pants() {
        let products = vec![product("Shirts"), product("Shirts"), product("Pants")];
        assert_eq!(generate_code("Shirts", &products), "SHI003");
        assert_eq!(generate_code("Pants", &products), "PAN002");
    }

    #[test]
    fn test_first_in_category() {
        assert_eq!(generate_code("Jackets", &[]), "JAC001");
    }

    #[test]
    fn test_short_and_blank_categories() {
        assert_eq!(generate_code("Té", &[]), "TÉ001");
        assert_eq!(generate_code("", &[]), "OTH001");
        assert_eq!(generate_code("   ", &[]), "OTH001");
    }

    #[test]
    fn test_prefix_does_not_trim() {
        assert_eq!(code_prefix("\t \n"), FALLBACK_PREFIX);
        assert_eq!(code_prefix(" Shirts"), " SH");
        assert_eq!(code_prefix("Shirts".trim()), "SHI");
    }

    #[test]
    fn test_blank_category_counts_blank_products() {
        let products = vec![product(""), product("")];
        assert_eq!(generate_code("", &products), "OTH003");
    }

    #[test]
    fn test_unknown_category_passes_through() {
        let products = vec![product("Gadgets")];
        assert_eq!(generate_code("Gadgets", &products), "GAD002");
        assert_eq!(generate_code("T-Shirts", &products), "T-S001");
    }

    #[test]
    fn test_count_is_exact_match() {
        let products = vec![product("shirts"), product("Shirts ")];
        assert_eq!(generate_code("Shirts", &products), "SHI001");
    }

    #[test]
    fn test_suffix_grows_past_999() {
        let products: Vec<Product> = (0..1000).map(|_| product("Shoes")).collect();
        assert_eq!(generate_code("Shoes", &products), "SHO1001");
    }

    #[test]
    fn test_same_snapshot_same_code() {
        // Two admins saving from one snapshot collide.
        let snapshot = vec![product("Hoodies")];
        let first = generate_code("Hoodies", &snapshot);
        let second = generate_code("Hoodies", &snapshot);
        assert_eq!(first, second);
    }
}
