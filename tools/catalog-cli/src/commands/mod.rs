//! CLI command implementations.

pub mod brands;
pub mod code;
pub mod config;
pub mod format;
pub mod init;
pub mod product;
pub mod view;

use clap::{Args, Subcommand};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize.
    #[arg(default_value = ".")]
    pub path: String,

    /// Overwrite an existing config file.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the view command.
#[derive(Args)]
pub struct ViewArgs {
    /// Search text matched against name, brand and code.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Show unavailable products too, as a signed-in admin would.
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the code command.
#[derive(Args)]
pub struct CodeArgs {
    /// Category to preview the next code for.
    pub category: String,
}

/// Product fields shared by add and edit.
#[derive(Args)]
pub struct ProductFields {
    /// Product name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Brand name; created if unknown.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Price.
    #[arg(short, long)]
    pub price: Option<String>,

    /// Shop link; `https://` is added when no scheme is given.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Mark as available or unavailable.
    #[arg(long)]
    pub available: Option<bool>,

    /// Image file to upload.
    #[arg(short, long)]
    pub image: Option<String>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: ProductFields,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Product id or code.
    pub product: String,

    #[command(flatten)]
    pub fields: ProductFields,
}

/// Arguments for the toggle command.
#[derive(Args)]
pub struct ToggleArgs {
    /// Product id or code.
    pub product: String,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Product id or code.
    pub product: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the brands command.
#[derive(Args)]
pub struct BrandsArgs {}

/// Arguments for the format command.
#[derive(Args)]
pub struct FormatArgs {
    #[command(subcommand)]
    pub command: FormatCommand,
}

#[derive(Subcommand)]
pub enum FormatCommand {
    /// Format a price for display.
    Price {
        /// Price text.
        value: String,
    },
    /// Normalize an affiliate URL.
    Url {
        /// URL text.
        value: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Set a config value and write the config file.
    Set {
        /// Config key (dot-separated), e.g. display.currency.
        key: String,
        /// Value to set.
        value: String,
    },
    /// Show the effective category taxonomy.
    Categories,
    /// Validate the config file.
    Validate,
}
