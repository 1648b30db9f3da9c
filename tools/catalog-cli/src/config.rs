//! CLI configuration.

use anyhow::{Context, Result};
use catalog_core::catalog::{CategoryDef, Taxonomy};
use serde::{Deserialize, Serialize};

/// Keys accepted by [`CatalogConfig::set`].
pub const SETTABLE_KEYS: [&str; 6] = [
    "display.currency",
    "display.show_codes",
    "display.show_icons",
    "storage.products_file",
    "storage.uploads_dir",
    "storage.public_base_url",
];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Category order, labels and icons.
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Terminal display options.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Where the catalog and uploaded images live.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CatalogConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Set a `[display]` or `[storage]` value by dot-separated key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_bool = |v: &str| {
            v.parse::<bool>()
                .with_context(|| format!("{} expects true or false, got '{}'", key, v))
        };

        match key {
            "display.currency" => self.display.currency = value.to_string(),
            "display.show_codes" => self.display.show_codes = parse_bool(value)?,
            "display.show_icons" => self.display.show_icons = parse_bool(value)?,
            "storage.products_file" => self.storage.products_file = value.to_string(),
            "storage.uploads_dir" => self.storage.uploads_dir = value.to_string(),
            "storage.public_base_url" => {
                let value = value.trim();
                self.storage.public_base_url = (!value.is_empty()).then(|| value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key '{}'. Settable keys: {}",
                key,
                SETTABLE_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// The taxonomy to display with.
    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy.build()
    }

    /// Check settings that parse but cannot work.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut seen: Vec<&str> = Vec::new();
        for def in &self.taxonomy.categories {
            let name = def.name.trim();
            if name.is_empty() {
                problems.push("taxonomy: category with an empty name".to_string());
            } else if seen.contains(&name) {
                problems.push(format!("taxonomy: duplicate category '{}'", name));
            } else {
                seen.push(name);
            }
        }

        if self.storage.products_file.trim().is_empty() {
            problems.push("storage.products_file must not be empty".to_string());
        }
        if self.storage.uploads_dir.trim().is_empty() {
            problems.push("storage.uploads_dir must not be empty".to_string());
        }

        problems
    }
}

/// Taxonomy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Categories in display order. Empty means the built-in apparel list.
    #[serde(default)]
    pub categories: Vec<CategoryDef>,
}

impl TaxonomyConfig {
    pub fn build(&self) -> Taxonomy {
        if self.categories.is_empty() {
            Taxonomy::apparel()
        } else {
            Taxonomy::new(self.categories.iter().cloned())
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix printed before prices, e.g. "$".
    #[serde(default)]
    pub currency: String,

    /// Show product codes in listings.
    #[serde(default = "default_true")]
    pub show_codes: bool,

    /// Show section icons.
    #[serde(default = "default_true")]
    pub show_icons: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: String::new(),
            show_codes: true,
            show_icons: true,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Catalog snapshot file.
    #[serde(default = "default_products_file")]
    pub products_file: String,

    /// Directory uploaded images are written to.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// Base URL uploaded images are served from. Defaults to the local path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
}

fn default_products_file() -> String {
    "products.json".to_string()
}

fn default_uploads_dir() -> String {
    "uploads".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            products_file: default_products_file(),
            uploads_dir: default_uploads_dir(),
            public_base_url: None,
        }
    }
}

/// Generate a default catalog.toml config file.
pub fn generate_default_config() -> String {
    r#"# Product catalog configuration

[display]
currency = "$"
show_codes = true
show_icons = true

[storage]
products_file = "products.json"
uploads_dir = "uploads"
# public_base_url = "https://cdn.example.com/products"

# Leave the list empty to use the built-in apparel categories.
# [[taxonomy.categories]]
# name = "Shirts"
# label = "Shirts"
# icon = "👔"
"#
    .to_string()
}
