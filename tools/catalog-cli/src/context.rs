//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use catalog_backend::{AdminService, BrandStore, MemoryStore};
use catalog_core::catalog::{Brand, Product};
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::output::Output;
use crate::storage::DirectoryStorage;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// Admin service over the local catalog file.
pub type LocalService = AdminService<MemoryStore, DirectoryStorage>;

/// On-disk catalog: the product and brand tables.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub brands: Vec<Brand>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CatalogConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CatalogConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CatalogConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CatalogConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CatalogConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory that relative storage paths are resolved against: the
    /// config file's directory, or the working directory without one.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .map(|p| self.resolve_path(&p.to_string_lossy()))
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The catalog snapshot file.
    pub fn products_file(&self) -> PathBuf {
        self.base_dir().join(&self.config.storage.products_file)
    }

    /// The image upload directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.base_dir().join(&self.config.storage.uploads_dir)
    }

    /// Read the catalog file. A missing file is an empty catalog.
    pub fn read_catalog(&self) -> Result<CatalogFile> {
        let path = self.products_file();
        if !path.exists() {
            return Ok(CatalogFile::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// Write the catalog file.
    pub fn write_catalog(&self, catalog: &CatalogFile) -> Result<()> {
        let path = self.products_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(catalog)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))
    }

    /// Open the admin service over the catalog file.
    pub fn open_service(&self) -> Result<LocalService> {
        let catalog = self.read_catalog()?;
        self.output.debug(&format!(
            "Loaded {} product(s) from {}",
            catalog.products.len(),
            self.products_file().display()
        ));

        let store = MemoryStore::with_products(catalog.products).with_brands(catalog.brands);
        let storage = DirectoryStorage::new(
            self.uploads_dir(),
            self.config.storage.public_base_url.clone(),
        );

        Ok(AdminService::new(Arc::new(store), Arc::new(storage))
            .with_taxonomy(self.config.taxonomy()))
    }

    /// Write the service's tables back to the catalog file.
    pub async fn persist(&self, service: &LocalService) -> Result<()> {
        let store = service.store();
        let catalog = CatalogFile {
            products: store.products().await,
            brands: store
                .list_brands()
                .await
                .context("Failed to list brands")?,
        };
        self.write_catalog(&catalog)?;
        self.output
            .debug(&format!("Saved catalog to {}", self.products_file().display()));
        Ok(())
    }
}
