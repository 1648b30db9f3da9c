//! Category taxonomy for catalog display.
//!
//! A product's category is stored as plain text and never rewritten. The
//! taxonomy only decides where a product is *shown*: known categories in
//! their fixed order, everything else under [`OTHER_CATEGORY`].

use serde::{Deserialize, Serialize};

/// Catch-all display bucket for categories outside the taxonomy.
pub const OTHER_CATEGORY: &str = "Other";

/// Icon for the catch-all bucket.
pub const OTHER_ICON: &str = "📦";

/// Icon for categories without an assigned one.
pub const DEFAULT_ICON: &str = "🏷️";

/// Built-in apparel taxonomy: (name, label, icon), in display order.
const APPAREL: &[(&str, &str, &str)] = &[
    ("Shirts", "Shirts", "👔"),
    ("T-Shirts", "T-Shirts", "👕"),
    ("Polos", "Polos", "👕"),
    ("Pants", "Pants", "👖"),
    ("Jeans", "Jeans", "👖"),
    ("Shorts", "Shorts", "🩳"),
    ("Jackets", "Jackets", "🧥"),
    ("Hoodies", "Hoodies", "🧥"),
    ("Sweaters", "Sweaters", "🧶"),
    ("Dresses", "Dresses", "👗"),
    ("Skirts", "Skirts", "👗"),
    ("Shoes", "Shoes", "👟"),
    ("Accessories", "Accessories", "🧢"),
];

/// A known category with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDef {
    /// Stored category value.
    pub name: String,
    /// Section heading.
    #[serde(default)]
    pub label: String,
    /// Section icon.
    #[serde(default)]
    pub icon: String,
}

impl CategoryDef {
    /// Create a category whose label is its name and icon is the default.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            icon: DEFAULT_ICON.to_string(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Ordered list of known categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<CategoryDef>", into = "Vec<CategoryDef>")]
pub struct Taxonomy {
    categories: Vec<CategoryDef>,
}

impl Taxonomy {
    /// Build a taxonomy. Later duplicates of a name are dropped and blank
    /// labels/icons fall back to the name and [`DEFAULT_ICON`].
    pub fn new(categories: impl IntoIterator<Item = CategoryDef>) -> Self {
        let mut out: Vec<CategoryDef> = Vec::new();
        for mut def in categories {
            if def.name.is_empty() || out.iter().any(|c| c.name == def.name) {
                continue;
            }
            if def.label.trim().is_empty() {
                def.label = def.name.clone();
            }
            if def.icon.trim().is_empty() {
                def.icon = DEFAULT_ICON.to_string();
            }
            out.push(def);
        }
        Self { categories: out }
    }

    /// Build a taxonomy from bare names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(CategoryDef::new))
    }

    /// The built-in apparel taxonomy.
    pub fn apparel() -> Self {
        Self::new(
            APPAREL
                .iter()
                .map(|(name, label, icon)| CategoryDef::new(*name).with_label(*label).with_icon(*icon)),
        )
    }

    /// Known categories in display order.
    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// Known category names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Display position of a category, if known.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == category)
    }

    /// Whether a category is part of the taxonomy.
    pub fn contains(&self, category: &str) -> bool {
        self.position(category).is_some()
    }

    /// Look up a known category.
    pub fn get(&self, category: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.name == category)
    }

    /// The section a stored category is displayed under.
    pub fn display_category<'a>(&'a self, category: &'a str) -> &'a str {
        if self.contains(category) {
            category
        } else {
            OTHER_CATEGORY
        }
    }

    /// Section heading for a category.
    pub fn label(&self, category: &str) -> &str {
        match self.get(category) {
            Some(def) => &def.label,
            None => OTHER_CATEGORY,
        }
    }

    /// Section icon for a category.
    pub fn icon(&self, category: &str) -> &str {
        match self.get(category) {
            Some(def) => &def.icon,
            None if category == OTHER_CATEGORY => OTHER_ICON,
            None => DEFAULT_ICON,
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<Vec<CategoryDef>> for Taxonomy {
    fn from(categories: Vec<CategoryDef>) -> Self {
        Self::new(categories)
    }
}

impl From<Taxonomy> for Vec<CategoryDef> {
    fn from(taxonomy: Taxonomy) -> Self {
        taxonomy.categories
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::apparel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apparel_order() {
        let taxonomy = Taxonomy::apparel();
        assert!(taxonomy.position("Shirts").unwrap() < taxonomy.position("T-Shirts").unwrap());
        assert_eq!(taxonomy.names().next(), Some("Shirts"));
        assert!(!taxonomy.contains("Other"));
    }

    #[test]
    fn test_unknown_category_displays_as_other() {
        let taxonomy = Taxonomy::apparel();
        assert_eq!(taxonomy.display_category("Pants"), "Pants");
        assert_eq!(taxonomy.display_category("Gadgets"), OTHER_CATEGORY);
        // Matching is exact; stored values are never normalized.
        assert_eq!(taxonomy.display_category("shirts"), OTHER_CATEGORY);
    }

    #[test]
    fn test_icons() {
        let taxonomy = Taxonomy::apparel();
        assert_eq!(taxonomy.icon("T-Shirts"), "👕");
        assert_eq!(taxonomy.icon("Gadgets"), DEFAULT_ICON);
        assert_eq!(taxonomy.icon(OTHER_CATEGORY), OTHER_ICON);
    }

    #[test]
    fn test_new_drops_duplicates_and_fills_defaults() {
        let taxonomy = Taxonomy::new(vec![
            CategoryDef::new("Hats").with_label(""),
            CategoryDef::new("Hats").with_label("Caps"),
            CategoryDef::new("Bags").with_icon(" "),
        ]);
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.label("Hats"), "Hats");
        assert_eq!(taxonomy.icon("Bags"), DEFAULT_ICON);
    }

    #[test]
    fn test_deserialize_from_list() {
        let taxonomy: Taxonomy =
            serde_json::from_str(r#"[{"name": "Socks", "icon": "🧦"}, {"name": "Ties"}]"#).unwrap();
        assert_eq!(taxonomy.label("Socks"), "Socks");
        assert_eq!(taxonomy.icon("Socks"), "🧦");
        assert_eq!(taxonomy.icon("Ties"), DEFAULT_ICON);
    }
}
