//! Search module.
//!
//! Text filtering, recency ordering and the category-grouped catalog view.

mod filter;
mod grouping;
mod view;

pub use filter::{filter_products, matches_query, only_available, sort_newest_first};
pub use grouping::{group_by_category, CatalogSection};
pub use view::{Audience, CatalogView};
