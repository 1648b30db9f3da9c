//! Preview the next product code.

use anyhow::Result;
use catalog_core::catalog::generate_code;

use super::CodeArgs;
use crate::context::Context;

/// Run the code command.
pub async fn run(args: CodeArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.read_catalog()?;
    let code = generate_code(args.category.trim(), &catalog.products);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "category": args.category.trim(),
            "code": code,
        }));
        return Ok(());
    }

    println!("{}", code);
    Ok(())
}
