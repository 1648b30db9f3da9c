//! Show the catalog grouped by category.

use anyhow::{Context as _, Result};
use catalog_core::search::Audience;

use super::ViewArgs;
use crate::context::Context;

/// Run the view command.
pub async fn run(args: ViewArgs, ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;
    let audience = Audience::from_authenticated(args.admin);

    let products = service
        .load_catalog(audience)
        .await
        .context("Failed to load catalog")?;
    let view = service.view(&products, audience, &args.query);

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    if view.is_empty() {
        if view.query.is_empty() {
            ctx.output.info("The catalog is empty.");
        } else {
            ctx.output
                .info(&format!("No products match '{}'.", view.query));
        }
        return Ok(());
    }

    let display = &ctx.config.display;
    for section in &view.sections {
        let heading = if display.show_icons {
            format!("{} {} ({})", section.icon, section.label, section.len())
        } else {
            format!("{} ({})", section.label, section.len())
        };
        ctx.output.header(&heading);
        for product in &section.products {
            ctx.output.product_line(product, display);
        }
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "{} product(s) shown to {}",
        view.total,
        audience.as_str()
    ));

    Ok(())
}
