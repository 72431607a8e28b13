//! Catalog browsing commands.

use anyhow::{bail, Result};
use roswell_commerce::catalog::{Category, Product};
use roswell_commerce::search::{Filter, ProductQuery};
use roswell_commerce::ProductId;
use serde::Serialize;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List {
            category,
            featured,
            in_stock,
            page,
            per_page,
        } => {
            let mut query = ProductQuery::new();
            if let Some(value) = category {
                query = query.with_filter(Filter::Category(parse_category(&value)?));
            }
            if featured {
                query = query.with_filter(Filter::Featured);
            }
            if in_stock {
                query = query.with_filter(Filter::InStock);
            }
            let query = query
                .with_page(page)
                .with_per_page(per_page.unwrap_or(ctx.config.catalog.page_size));

            list_products(&query, ctx).await
        }
        CatalogCommand::Show { id } => show_product(&id, ctx).await,
        CatalogCommand::Categories => list_categories(ctx),
    }
}

/// Accept a stored category value or a storefront slug.
pub(crate) fn parse_category(value: &str) -> Result<Category> {
    match Category::from_value(value).or_else(|| Category::from_slug(value)) {
        Some(category) => Ok(category),
        None => bail!(
            "Unknown category '{}'. Known: {}",
            value,
            Category::ALL.map(|c| c.as_str()).join(", ")
        ),
    }
}

async fn list_products(query: &ProductQuery, ctx: &Context) -> Result<()> {
    let store = ctx.catalog().await?;
    let page = query.run(store.products());

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    let pagination = page.pagination;
    ctx.output.header(&format!(
        "Productos {}-{} de {} (página {}/{})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));

    if page.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [16, 30, 12, 12, 10];
    ctx.output
        .table_row(&["ID", "TITLE", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &page.items {
        let title = truncate(&product.title, 30);
        let price = product.price.display();
        let badge = stock_badge(product);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &title,
                product.category.label(),
                &price,
                &badge,
            ],
            &widths,
        );
    }

    if let Some(next) = pagination.next_page() {
        ctx.output.info(&format!("Next page: --page {}", next));
    }
    Ok(())
}

async fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let store = ctx.catalog().await?;
    let Some(product) = store.get(&ProductId::new(id)) else {
        bail!("Product not found: {}", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(product, ctx);
    Ok(())
}

pub(crate) fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.title);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv(
        "category",
        &format!("{} ({})", product.category.label(), product.category),
    );
    ctx.output.kv("sizes", &product.sizes.join(", "));
    ctx.output.kv("colors", &product.colors.join(", "));
    ctx.output.kv("stock", &stock_badge(product));
    ctx.output.kv("featured", &product.featured.to_string());
    ctx.output.kv("created", &product.created_at.to_rfc3339());
    ctx.output.kv("description", &product.description);
    for image in &product.images {
        ctx.output.list_item(image);
    }
}

#[derive(Serialize)]
struct CategoryInfo {
    value: &'static str,
    label: &'static str,
    slug: &'static str,
}

fn list_categories(ctx: &Context) -> Result<()> {
    let categories: Vec<CategoryInfo> = Category::ALL
        .iter()
        .map(|c| CategoryInfo {
            value: c.as_str(),
            label: c.label(),
            slug: c.slug(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.table_row(
            &[category.value, category.label, &format!("/{}", category.slug)],
            &[12, 12, 12],
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_accepts_value_and_slug() {
        assert_eq!(parse_category("hoodies").unwrap(), Category::Hoodies);
        assert_eq!(parse_category("remeras").unwrap(), Category::Tshirts);
        assert!(parse_category("jackets").is_err());
    }
}
