//! Product catalog module.
//!
//! Contains types for products, brands, the category taxonomy, and product
//! code generation.

mod brand;
mod category;
mod code;
mod product;

pub use brand::{find_brand_by_name, Brand, ProductBrand};
pub use category::{CategoryDef, Taxonomy, DEFAULT_ICON, OTHER_CATEGORY, OTHER_ICON};
pub use code::{code_prefix, generate_code, FALLBACK_PREFIX};
pub use product::{Product, ProductDraft};
