//! Product management commands. All of them need an admin session.

use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use roswell_commerce::catalog::{CatalogStore, ProductDraft, ProductPatch};
use roswell_commerce::gateway::ProductGateway;
use roswell_commerce::{CommerceError, Price, ProductId};

use super::catalog::print_product;
use super::{ProductArgs, ProductCommand};
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    ctx.require_admin().await?;

    match args.command {
        ProductCommand::Add {
            title,
            description,
            price,
            category,
            sizes,
            colors,
            images,
            id,
            featured,
            out_of_stock,
        } => {
            let mut store = ctx.catalog().await?;
            let images = resolve_images(&store, images).await?;

            let mut draft = ProductDraft::new(title, description, parse_price(&price)?, category)
                .with_sizes(sizes)
                .with_colors(colors)
                .with_images(images)
                .featured(featured)
                .in_stock(!out_of_stock);
            if let Some(id) = id {
                draft = draft.with_id(id);
            }

            let product = store.add(draft).await.map_err(explain)?;
            if ctx.output.is_json() {
                ctx.output.json(&product);
            } else {
                ctx.output.success(&format!("Added product {}", product.id));
                print_product(&product, ctx);
            }
            Ok(())
        }
        ProductCommand::Update {
            id,
            title,
            description,
            price,
            category,
            sizes,
            colors,
            images,
            featured,
            in_stock,
        } => {
            let mut store = ctx.catalog().await?;
            let id = ProductId::new(id);
            if store.get(&id).is_none() {
                bail!("Product not found: {}", id);
            }

            let images = if images.is_empty() {
                None
            } else {
                Some(resolve_images(&store, images).await?)
            };
            let patch = ProductPatch {
                title,
                description,
                price: price.as_deref().map(parse_price).transpose()?,
                category,
                sizes: non_empty(sizes),
                colors: non_empty(colors),
                images,
                in_stock,
                featured,
            };
            if patch.is_empty() {
                ctx.output.warn("Nothing to update.");
                return Ok(());
            }

            store.update(&id, patch).await.map_err(explain)?;
            if let Some(product) = store.get(&id) {
                if ctx.output.is_json() {
                    ctx.output.json(product);
                } else {
                    ctx.output.success(&format!("Updated product {}", id));
                    print_product(product, ctx);
                }
            }
            Ok(())
        }
        ProductCommand::Delete { id } => {
            let mut store = ctx.catalog().await?;
            let id = ProductId::new(id);
            if store.get(&id).is_none() {
                bail!("Product not found: {}", id);
            }

            store.remove(&id).await.map_err(explain)?;
            ctx.output.success(&format!("Deleted product {}", id));
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "deleted": id }));
            }
            Ok(())
        }
        ProductCommand::Upload { path } => {
            let store = ctx.catalog().await?;
            let reference = upload_file(&store, Path::new(&path)).await?;
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "reference": reference }));
            } else {
                ctx.output.success(&reference);
            }
            Ok(())
        }
    }
}

/// Parse a price like `89999` or `1234.50`.
pub(crate) fn parse_price(value: &str) -> Result<Price> {
    Price::from_str(value.trim()).with_context(|| format!("Invalid price: {}", value))
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

/// Upload local files; anything that is not a file is kept as a reference.
async fn resolve_images<G: ProductGateway>(
    store: &CatalogStore<G>,
    images: Vec<String>,
) -> Result<Vec<String>> {
    let mut references = Vec::with_capacity(images.len());
    for image in images {
        let path = Path::new(&image);
        if path.is_file() {
            references.push(upload_file(store, path).await?);
        } else {
            references.push(image);
        }
    }
    Ok(references)
}

async fn upload_file<G: ProductGateway>(store: &CatalogStore<G>, path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?;

    store
        .upload_image(bytes, file_name)
        .await
        .with_context(|| format!("Failed to upload {}", path.display()))
}

/// List every rejected field on validation failures.
fn explain(err: CommerceError) -> anyhow::Error {
    if let CommerceError::Validation(errors) = &err {
        let lines: Vec<String> = errors
            .as_slice()
            .iter()
            .map(|e| format!("  - {}", e))
            .collect();
        return anyhow::anyhow!("Product rejected:\n{}", lines.join("\n"));
    }
    err.into()
}
