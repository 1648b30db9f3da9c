//! List brands.

use anyhow::{Context as _, Result};
use catalog_backend::BrandStore;

use super::BrandsArgs;
use crate::context::Context;

/// Run the brands command.
pub async fn run(_args: BrandsArgs, ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;
    let brands = service
        .store()
        .list_brands()
        .await
        .context("Failed to list brands")?;

    if ctx.output.is_json() {
        ctx.output.json(&brands);
        return Ok(());
    }

    if brands.is_empty() {
        ctx.output.info("No brands yet.");
        return Ok(());
    }

    ctx.output.header("Brands");
    for brand in &brands {
        ctx.output.list_item(&brand.name);
    }
    Ok(())
}
