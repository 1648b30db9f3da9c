//! Initialize a catalog directory.

use anyhow::{bail, Context as _, Result};

use super::InitArgs;
use crate::config::{generate_default_config, StorageConfig};
use crate::context::{CatalogFile, Context, CONFIG_NAMES};

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let target_dir = ctx.resolve_path(&args.path);
    ctx.output
        .header(&format!("Initializing catalog in {}", target_dir.display()));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;
        ctx.output
            .debug(&format!("Created directory: {}", target_dir.display()));
    }

    let config_path = target_dir.join(CONFIG_NAMES[0]);
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));

    let products_file = target_dir.join(StorageConfig::default().products_file);
    if products_file.exists() {
        ctx.output
            .info(&format!("Keeping existing {}", products_file.display()));
    } else {
        let content = serde_json::to_string_pretty(&CatalogFile::default())?;
        std::fs::write(&products_file, content)
            .with_context(|| format!("Failed to write {}", products_file.display()))?;
        ctx.output
            .success(&format!("Created {}", products_file.display()));
    }

    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output
        .list_item("catalog add --name \"Oxford Shirt\" --category Shirts --price 89.90");
    ctx.output.list_item("catalog view");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::output::Output;

    #[tokio::test]
    async fn test_init_creates_the_configured_products_file() {
        let dir = std::env::temp_dir().join(format!(
            "catalog-cli-init-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_micros()
        ));
        let ctx = Context {
            config: CatalogConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.clone(),
        };
        let args = || InitArgs {
            path: ".".into(),
            force: false,
        };

        run(args(), &ctx).await.unwrap();

        let config_path = dir.join(CONFIG_NAMES[0]);
        let initialized = Context {
            config: CatalogConfig::load(&config_path.to_string_lossy()).unwrap(),
            config_path: Some(config_path),
            output: Output::new(false, true),
            cwd: dir.clone(),
        };
        assert!(initialized.products_file().exists());
        assert!(initialized.read_catalog().unwrap().products.is_empty());

        assert!(run(args(), &ctx).await.is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
