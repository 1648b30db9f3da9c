//! Terminal output.
//!
//! Human-readable lines go to stdout (warnings and errors to stderr). In
//! `--json` mode every human line is suppressed and commands print a single
//! JSON document instead.

use catalog_core::catalog::Product;
use catalog_core::dashboard::{Notice, NoticeKind};
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::DisplayConfig;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Tone {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Error => style("✗").red(),
            Tone::Debug => style("→").dim(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error | Tone::Debug)
    }
}

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn emit(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        let body = match tone {
            Tone::Error => style(msg).red().to_string(),
            Tone::Debug => style(msg).dim().to_string(),
            _ => msg.to_string(),
        };
        if tone.to_stderr() {
            eprintln!("{} {}", tone.marker(), body);
        } else {
            println!("{} {}", tone.marker(), body);
        }
    }

    pub fn info(&self, msg: &str) {
        self.emit(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.emit(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.emit(Tone::Warn, msg);
    }

    /// Errors are reported in JSON mode too, as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.emit(Tone::Error, msg);
        }
    }

    /// Only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.emit(Tone::Debug, msg);
        }
    }

    /// Surface a dashboard notice.
    pub fn notice(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => self.success(&notice.message),
            NoticeKind::Failure => self.error(&notice.message),
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// One catalog line: code, name, brand, price, availability.
    pub fn product_line(&self, product: &Product, display: &DisplayConfig) {
        if self.json {
            return;
        }

        let mut parts = Vec::with_capacity(5);
        if display.show_codes {
            parts.push(style(format!("{:<7}", product.code)).dim().to_string());
        }
        parts.push(product.name.clone());
        if !product.brand_name().is_empty() {
            parts.push(style(format!("({})", product.brand_name())).dim().to_string());
        }
        parts.push(style(price_text(product, display)).bold().to_string());
        if !product.is_available() {
            parts.push(style("unavailable").yellow().to_string());
        }
        self.list_item(&parts.join(" "));
    }

    /// The command's JSON result.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to encode JSON: {}", e)),
        }
    }

    /// Spinner for a slow step; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Price with the configured currency prefix; the placeholder stays bare.
pub fn price_text(product: &Product, display: &DisplayConfig) -> String {
    if product.price.is_valid() {
        format!("{}{}", display.currency, product.display_price())
    } else {
        product.display_price()
    }
}
