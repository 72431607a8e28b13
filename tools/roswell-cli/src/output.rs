//! Terminal output for the CLI.
//!
//! Human messages are styled with `console`. In `--json` mode they are
//! suppressed and commands print one JSON document instead; errors still go
//! to stderr as `{"error": ...}`.

use console::{pad_str, style, Alignment};
use roswell_commerce::catalog::Product;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn human(&self, print: impl FnOnce()) {
        if !self.json {
            print();
        }
    }

    pub fn info(&self, msg: &str) {
        self.human(|| println!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.human(|| println!("{} {}", style("✓").green(), msg));
    }

    /// Warnings go to stderr.
    pub fn warn(&self, msg: &str) {
        self.human(|| eprintln!("{} {}", style("⚠").yellow(), msg));
    }

    /// Print an error, in both modes.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    pub fn header(&self, msg: &str) {
        self.human(|| println!("\n{}", style(msg).bold().underlined()));
    }

    /// Print a value as pretty JSON, regardless of mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.human(|| println!("  {}: {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.human(|| println!("  {} {}", style("•").dim(), item));
    }

    pub fn plain(&self, text: &str) {
        self.human(|| println!("{}", text));
    }

    /// Print a row of left-aligned columns. Styled cells are measured
    /// without their escape codes.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        self.human(|| {
            let cells: Vec<String> = cols
                .iter()
                .zip(widths)
                .map(|(col, &width)| pad_str(col, width, Alignment::Left, None).into_owned())
                .collect();
            println!("  {}", cells.join("  "));
        });
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Availability badge for a product.
pub fn stock_badge(product: &Product) -> String {
    if product.in_stock {
        style("en stock").green().to_string()
    } else {
        style("sin stock").red().to_string()
    }
}

/// Shorten text to `max` characters, marking the cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
