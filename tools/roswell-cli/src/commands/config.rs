//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.plain("[store]");
    ctx.output.kv("data_dir", &ctx.config.store.data_dir);
    ctx.output.kv("public_base_url", &ctx.config.store.public_base_url);
    ctx.output.kv("resolved", &ctx.data_dir().display().to_string());

    ctx.output.plain("[checkout]");
    ctx.output.kv("destination", &ctx.config.checkout.destination);

    ctx.output.plain("[admin]");
    ctx.output.kv("username", &ctx.config.admin.username);
    ctx.output.kv(
        "password_hash",
        if ctx.config.admin.password_hash.is_some() {
            "(set)"
        } else {
            "(not set)"
        },
    );
    ctx.output.kv(
        "session_secret",
        if ctx.config.admin.session_secret.is_some() {
            "(set)"
        } else {
            "(password hash)"
        },
    );
    ctx.output
        .kv("session_hours", &ctx.config.admin.session_hours.to_string());

    ctx.output.plain("[catalog]");
    ctx.output
        .kv("page_size", &ctx.config.catalog.page_size.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("roswell.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

/// Check a config for values the store cannot run with.
pub(crate) fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.store.data_dir.trim().is_empty() {
        errors.push("store.data_dir is required".to_string());
    }
    if config.store.public_base_url.trim().is_empty() {
        warnings.push("store.public_base_url is empty; image URLs will be relative".to_string());
    }

    let destination = &config.checkout.destination;
    if destination.is_empty() || !destination.chars().all(|c| c.is_ascii_digit()) {
        errors.push(format!(
            "checkout.destination '{}' must be digits only (country code included)",
            destination
        ));
    }

    if config.admin.username.trim().is_empty() {
        errors.push("admin.username is required".to_string());
    }
    match &config.admin.password_hash {
        None => warnings.push(
            "admin.password_hash is not set; product commands are unavailable".to_string(),
        ),
        Some(hash) if !hash.starts_with("$argon2") => {
            errors.push("admin.password_hash is not an argon2 hash".to_string())
        }
        Some(_) => {}
    }
    if config.admin.session_hours <= 0 {
        errors.push("admin.session_hours must be positive".to_string());
    }

    if config.catalog.page_size == 0 {
        errors.push("catalog.page_size must be at least 1".to_string());
    }

    (errors, warnings)
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
