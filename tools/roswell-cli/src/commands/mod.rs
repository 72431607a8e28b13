//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod migrate;
pub mod product;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, newest first.
    List {
        /// Category value or storefront slug (e.g., hoodies, buzos).
        #[arg(long)]
        category: Option<String>,

        /// Only featured products.
        #[arg(long)]
        featured: bool,

        /// Only products in stock.
        #[arg(long)]
        in_stock: bool,

        /// Page number.
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Products per page (default: catalog.page_size).
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Show one product.
    Show {
        /// Product ID.
        id: String,
    },
    /// List the categories.
    Categories,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Create a product.
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Price in pesos.
        #[arg(long)]
        price: String,

        #[arg(long)]
        category: String,

        /// Offered size (repeatable).
        #[arg(long = "size", required = true)]
        sizes: Vec<String>,

        /// Offered color (repeatable).
        #[arg(long = "color", required = true)]
        colors: Vec<String>,

        /// Image reference or local file to upload (repeatable).
        #[arg(long = "image", required = true)]
        images: Vec<String>,

        /// Explicit product ID.
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        featured: bool,

        /// Mark as out of stock.
        #[arg(long)]
        out_of_stock: bool,
    },
    /// Update fields of a product.
    Update {
        /// Product ID.
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Replace sizes (repeatable).
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// Replace colors (repeatable).
        #[arg(long = "color")]
        colors: Vec<String>,

        /// Replace images (repeatable).
        #[arg(long = "image")]
        images: Vec<String>,

        #[arg(long)]
        featured: Option<bool>,

        #[arg(long)]
        in_stock: Option<bool>,
    },
    /// Delete a product and its images.
    Delete {
        /// Product ID.
        id: String,
    },
    /// Upload an image and print its reference.
    Upload {
        /// Image file.
        path: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

/// A cart line identity.
#[derive(Args)]
pub struct LineArgs {
    /// Product ID.
    pub product_id: String,

    #[arg(long)]
    pub size: String,

    #[arg(long)]
    pub color: String,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product variant.
    Add {
        #[command(flatten)]
        line: LineArgs,

        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set a line's quantity (0 removes it).
    Update {
        #[command(flatten)]
        line: LineArgs,

        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Move a line to another size or color.
    Change {
        #[command(flatten)]
        line: LineArgs,

        #[arg(long, conflicts_with = "new_color", required_unless_present = "new_color")]
        new_size: Option<String>,

        #[arg(long)]
        new_color: Option<String>,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Phone number to send the order to (default: checkout.destination).
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Empty the cart after printing the order.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the migrate-categories command.
#[derive(Args)]
pub struct MigrateArgs {
    /// Also move "coats" products into hoodies.
    #[arg(long)]
    pub fold_coats: bool,

    /// Show the changes without writing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Hash a password for admin.password_hash.
    HashPassword {
        /// Password (read from stdin when omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and save the session.
    Login {
        /// Username (default: admin.username).
        #[arg(short, long)]
        username: Option<String>,

        /// Password (read from stdin when omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// End the saved session.
    Logout,
    /// Show the saved session.
    Status,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Read one line from stdin, without the trailing newline.
pub(crate) fn read_secret(prompt: &str) -> anyhow::Result<String> {
    use std::io::{BufRead, Write};

    eprint!("{}", prompt);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
