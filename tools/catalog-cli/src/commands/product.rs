//! Product commands: add, edit, toggle, delete.
//!
//! Each command drives the same dashboard state the admin UI uses: load the
//! snapshot, apply form events, submit, and write the catalog back when the
//! action succeeded.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use catalog_backend::ImageUpload;
use catalog_core::catalog::Product;
use catalog_core::dashboard::{DashboardEvent, DashboardState, FormField, LoadStatus, NoticeKind};
use catalog_core::ids::ProductId;
use dialoguer::Confirm;

use super::{AddArgs, DeleteArgs, EditArgs, ProductFields, ToggleArgs};
use crate::context::{Context, LocalService};
use crate::output::price_text;

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;
    let mut state = load_state(&service).await?;

    apply_fields(&mut state, &args.fields)?;
    let image = read_image(&args.fields).await?;
    submit(&service, &mut state, image, ctx).await
}

/// Run the edit command.
pub async fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;
    let mut state = load_state(&service).await?;

    let id = find_product(&state, &args.product)?.id.clone();
    state.apply(DashboardEvent::EditRequested(id))?;
    apply_fields(&mut state, &args.fields)?;
    let image = read_image(&args.fields).await?;
    submit(&service, &mut state, image, ctx).await
}

/// Run the toggle command.
pub async fn toggle(args: ToggleArgs, ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;
    let mut state = load_state(&service).await?;

    let id = find_product(&state, &args.product)?.id.clone();
    service.toggle_availability(&mut state, &id).await?;
    finish_action(&service, &state, ctx).await?;

    if let Some(product) = state.product(&id) {
        report(product, ctx);
    }
    Ok(())
}

/// Run the delete command.
pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;
    let mut state = load_state(&service).await?;

    let product = find_product(&state, &args.product)?;
    let (id, label) = (product.id.clone(), describe(product));

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}? This cannot be undone", label))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    service.delete(&mut state, &id).await?;
    finish_action(&service, &state, ctx).await?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    }
    Ok(())
}

async fn load_state(service: &LocalService) -> Result<DashboardState> {
    let mut state = DashboardState::new();
    service.refresh(&mut state).await?;
    if let LoadStatus::Failed(message) = &state.load {
        bail!("Failed to load catalog: {}", message);
    }
    Ok(state)
}

fn apply_fields(state: &mut DashboardState, fields: &ProductFields) -> Result<()> {
    let mut changes = Vec::new();
    if let Some(name) = &fields.name {
        changes.push(FormField::Name(name.clone()));
    }
    if let Some(brand) = &fields.brand {
        changes.push(FormField::Brand(brand.clone()));
    }
    if let Some(category) = &fields.category {
        changes.push(FormField::Category(category.clone()));
    }
    if let Some(price) = &fields.price {
        changes.push(FormField::Price(price.clone()));
    }
    if let Some(url) = &fields.url {
        changes.push(FormField::AffiliateUrl(url.clone()));
    }
    if let Some(available) = fields.available {
        changes.push(FormField::Available(available));
    }

    for change in changes {
        state.apply(DashboardEvent::FieldChanged(change))?;
    }
    Ok(())
}

async fn read_image(fields: &ProductFields) -> Result<Option<ImageUpload>> {
    let Some(path) = &fields.image else {
        return Ok(None);
    };

    let path = Path::new(path);
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(ImageUpload::new(
        file_name,
        content_type_for(path),
        bytes,
    )))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

async fn submit(
    service: &LocalService,
    state: &mut DashboardState,
    image: Option<ImageUpload>,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Saving product...");
    let saved = service.submit(state, image).await;
    spinner.finish_and_clear();

    let Some(product) = saved? else {
        let message = state
            .notice
            .as_ref()
            .map(|n| n.message.clone())
            .unwrap_or_else(|| "save failed".to_string());
        bail!("{}", message);
    };

    ctx.persist(service).await?;
    if let Some(notice) = &state.notice {
        ctx.output.notice(notice);
    }
    report(&product, ctx);
    Ok(())
}

/// Persist after a toggle or delete, or fail with the recorded notice.
async fn finish_action(service: &LocalService, state: &DashboardState, ctx: &Context) -> Result<()> {
    match &state.notice {
        Some(notice) if notice.kind == NoticeKind::Failure => bail!("{}", notice.message),
        Some(notice) => {
            ctx.persist(service).await?;
            ctx.output.notice(notice);
            Ok(())
        }
        None => Ok(()),
    }
}

fn report(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("code", &product.code);
    ctx.output.kv("name", &product.name);
    if !product.brand_name().is_empty() {
        ctx.output.kv("brand", product.brand_name());
    }
    ctx.output.kv("category", &product.category);
    ctx.output
        .kv("price", &price_text(product, &ctx.config.display));
    ctx.output.kv("available", &product.available.to_string());
    if let Some(url) = &product.affiliate_url {
        ctx.output.kv("url", url);
    }
    if let Some(url) = &product.image_url {
        ctx.output.kv("image", url);
    }
}

fn describe(product: &Product) -> String {
    format!("{} ({})", product.name, product.code)
}

/// Find a product by id, or by code when the code is unambiguous.
fn find_product<'a>(state: &'a DashboardState, key: &str) -> Result<&'a Product> {
    let key = key.trim();
    if let Some(product) = state.product(&ProductId::new(key)) {
        return Ok(product);
    }

    let matches: Vec<&Product> = state
        .products
        .iter()
        .filter(|p| p.code.eq_ignore_ascii_case(key))
        .collect();
    match matches.as_slice() {
        [product] => Ok(*product),
        [] => bail!("No product with id or code '{}'", key),
        _ => bail!(
            "Code '{}' is shared by {} products; use the id instead",
            key,
            matches.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::catalog::ProductDraft;

    fn state_with(products: Vec<Product>) -> DashboardState {
        let mut state = DashboardState::new();
        state.apply(DashboardEvent::LoadStarted).unwrap();
        state.apply(DashboardEvent::LoadSucceeded(products)).unwrap();
        state
    }

    fn product(id: &str, code: &str) -> Product {
        Product::from_draft(
            ProductId::new(id),
            ProductDraft::new(code, "Oxford", "Shirts", 80.0),
            chrono::Utc::now(),
        )
    }

    #[test]
    fn test_find_by_id_or_code() {
        let state = state_with(vec![product("p-1", "SHI001"), product("p-2", "SHI002")]);
        assert_eq!(find_product(&state, "p-2").unwrap().code, "SHI002");
        assert_eq!(find_product(&state, "shi001").unwrap().id.as_str(), "p-1");
        assert!(find_product(&state, "PAN001").is_err());
    }

    #[test]
    fn test_shared_code_is_ambiguous() {
        let state = state_with(vec![product("p-1", "SHI002"), product("p-2", "SHI002")]);
        let err = find_product(&state, "SHI002").unwrap_err();
        assert!(err.to_string().contains("shared by 2"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a")), "application/octet-stream");
    }
}
