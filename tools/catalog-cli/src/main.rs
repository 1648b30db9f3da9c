//! Catalog CLI - Command line tool for a local product catalog.
//!
//! Commands:
//! - `catalog init` - Create a config file and an empty catalog
//! - `catalog view` - Show the catalog grouped by category
//! - `catalog code` - Preview the next code for a category
//! - `catalog add` - Add a product
//! - `catalog edit` - Edit a product
//! - `catalog toggle` - Flip a product's availability
//! - `catalog delete` - Delete a product
//! - `catalog brands` - List brands
//! - `catalog format` - Run the price/URL presentation helpers
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddArgs, BrandsArgs, CodeArgs, ConfigArgs, DeleteArgs, EditArgs, FormatArgs, InitArgs,
    ToggleArgs, ViewArgs,
};

/// Catalog CLI - Manage a product catalog from the terminal
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file and an empty catalog
    Init(InitArgs),

    /// Show the catalog grouped by category
    View(ViewArgs),

    /// Preview the next product code for a category
    Code(CodeArgs),

    /// Add a product
    Add(AddArgs),

    /// Edit a product
    Edit(EditArgs),

    /// Flip a product's availability
    Toggle(ToggleArgs),

    /// Delete a product
    Delete(DeleteArgs),

    /// List brands
    Brands(BrandsArgs),

    /// Format a price or an affiliate URL
    Format(FormatArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr when asked to, via `--verbose` or `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("catalog_backend=debug,catalog_cli=debug"),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx).await,
        Commands::View(args) => commands::view::run(args, &ctx).await,
        Commands::Code(args) => commands::code::run(args, &ctx).await,
        Commands::Add(args) => commands::product::add(args, &ctx).await,
        Commands::Edit(args) => commands::product::edit(args, &ctx).await,
        Commands::Toggle(args) => commands::product::toggle(args, &ctx).await,
        Commands::Delete(args) => commands::product::delete(args, &ctx).await,
        Commands::Brands(args) => commands::brands::run(args, &ctx).await,
        Commands::Format(args) => commands::format::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_accepts_short_flags() {
        let cli = Cli::try_parse_from([
            "catalog", "--config", "catalog.toml", "add", "-n", "Oxford", "-c", "Shirts", "-p",
            "80",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("catalog.toml"));
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.fields.category.as_deref(), Some("Shirts"));
                assert_eq!(args.fields.price.as_deref(), Some("80"));
            }
            _ => panic!("expected add"),
        }
    }
}
