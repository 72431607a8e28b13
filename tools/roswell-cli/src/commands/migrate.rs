//! Legacy category migration.

use anyhow::{Context as _, Result};
use roswell_commerce::catalog::CategoryMigration;

use super::MigrateArgs;
use crate::context::Context;

/// Rewrite stored categories that are no longer known.
pub async fn run(args: MigrateArgs, ctx: &Context) -> Result<()> {
    if !args.dry_run {
        ctx.require_admin().await?;
    }

    let store = ctx.catalog().await?;
    let report = CategoryMigration::new()
        .fold_coats(args.fold_coats)
        .run(store.gateway().as_ref(), args.dry_run)
        .await
        .context("Category migration failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(if report.dry_run {
        "Category migration (dry run)"
    } else {
        "Category migration"
    });
    for rewrite in &report.rewrites {
        ctx.output
            .list_item(&format!("{}: {} → {}", rewrite.id, rewrite.from, rewrite.to));
    }

    if args.fold_coats {
        ctx.output
            .kv("coats → hoodies", &report.folded_coats.to_string());
    }
    ctx.output
        .kv("unknown → tshirts", &report.normalized.to_string());

    if report.rewrites.is_empty() {
        ctx.output.success("No categories to migrate");
    } else if report.dry_run {
        ctx.output.info("Run without --dry-run to apply.");
    } else {
        ctx.output.success("Migration finished");
    }
    Ok(())
}
