//! Roswell CLI - Browse and manage the Roswell storefront from a terminal.
//!
//! Commands:
//! - `roswell catalog` - Browse products by category, featured or stock
//! - `roswell product` - Add, update, delete products and upload images (admin)
//! - `roswell cart` - Manage the saved cart
//! - `roswell checkout` - Render the order message and chat link
//! - `roswell migrate-categories` - Clean up legacy categories (admin)
//! - `roswell admin` - Hash passwords and manage the admin session
//! - `roswell config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AdminArgs, CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, MigrateArgs, ProductArgs,
};

/// Roswell CLI - Browse and manage the Roswell storefront
#[derive(Parser)]
#[command(name = "roswell")]
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
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog(CatalogArgs),

    /// Manage products (admin)
    Product(ProductArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Send the cart to the store chat
    Checkout(CheckoutArgs),

    /// Rewrite legacy product categories (admin)
    MigrateCategories(MigrateArgs),

    /// Admin account and session
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::MigrateCategories(args) => commands::migrate::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
