//! Price and URL presentation helpers.

use anyhow::Result;
use catalog_core::{format_price_text, normalize_affiliate_url};

use super::{FormatArgs, FormatCommand};
use crate::context::Context;

/// Run the format command.
pub async fn run(args: FormatArgs, ctx: &Context) -> Result<()> {
    let (input, formatted) = match &args.command {
        FormatCommand::Price { value } => (value, Some(format_price_text(value))),
        FormatCommand::Url { value } => (value, normalize_affiliate_url(value)),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "input": input,
            "output": formatted,
        }));
        return Ok(());
    }

    match formatted {
        Some(text) => println!("{}", text),
        None => ctx.output.warn("Empty URL"),
    }
    Ok(())
}
