//! Configuration commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Categories => show_categories(ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("currency", &ctx.config.display.currency);
    ctx.output
        .kv("show_codes", &ctx.config.display.show_codes.to_string());
    ctx.output
        .kv("show_icons", &ctx.config.display.show_icons.to_string());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("products_file", &ctx.products_file().display().to_string());
    ctx.output
        .kv("uploads_dir", &ctx.uploads_dir().display().to_string());
    if let Some(ref url) = ctx.config.storage.public_base_url {
        ctx.output.kv("public_base_url", url);
    }

    ctx.output.info("");
    ctx.output.info("[taxonomy]");
    if ctx.config.taxonomy.categories.is_empty() {
        ctx.output.kv("categories", "built-in apparel list");
    } else {
        ctx.output.kv(
            "categories",
            &ctx.config.taxonomy.categories.len().to_string(),
        );
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => ctx.cwd.join(CONFIG_NAMES[0]),
    };

    let mut config = ctx.config.clone();
    config.set(key, value)?;
    config.save(&path.to_string_lossy())?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "file": path.display().to_string(),
            "key": key,
            "value": value,
        }));
    } else {
        ctx.output
            .success(&format!("Set {} = {} in {}", key, value, path.display()));
    }
    Ok(())
}

async fn show_categories(ctx: &Context) -> Result<()> {
    let taxonomy = ctx.config.taxonomy();

    if ctx.output.is_json() {
        ctx.output.json(&taxonomy);
        return Ok(());
    }

    ctx.output.header("Categories");
    for def in taxonomy.categories() {
        ctx.output
            .list_item(&format!("{} {} ({})", def.icon, def.label, def.name));
    }
    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    let problems = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": problems.is_empty(),
            "problems": problems,
        }));
    }

    if problems.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for problem in &problems {
        ctx.output.warn(problem);
    }
    bail!("{} configuration problem(s)", problems.len())
}
