//! Cart commands. The cart is saved in the data directory between runs.

use anyhow::{bail, Result};
use roswell_commerce::cart::{Cart, VariantChange};
use roswell_commerce::ProductId;
use serde::Serialize;

use super::{CartArgs, CartCommand, LineArgs};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.load_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            show_cart(&cart, ctx)?;
            return Ok(());
        }
        CartCommand::Add { line, quantity } => {
            let store = ctx.catalog().await?;
            let Some(product) = store.get(&ProductId::new(line.product_id.clone())) else {
                bail!("Product not found: {}", line.product_id);
            };
            if !product.in_stock {
                bail!("{} is out of stock", product.title);
            }
            cart.add_line(product.clone(), &line.size, &line.color, quantity)?;
            ctx.output.success(&format!(
                "Added {} x {} ({} / {})",
                quantity, product.title, line.size, line.color
            ));
        }
        CartCommand::Update { line, quantity } => {
            let id = ProductId::new(line.product_id.clone());
            require_line(&cart, &line)?;
            cart.update_quantity(&id, &line.size, &line.color, quantity);
            if quantity <= 0 {
                ctx.output.success("Removed line");
            } else {
                ctx.output.success(&format!("Quantity set to {}", quantity));
            }
        }
        CartCommand::Remove { line } => {
            let id = ProductId::new(line.product_id.clone());
            if !cart.remove_line(&id, &line.size, &line.color) {
                bail!("No such line in the cart");
            }
            ctx.output.success("Removed line");
        }
        CartCommand::Change {
            line,
            new_size,
            new_color,
        } => {
            let change = match (new_size, new_color) {
                (Some(size), _) => VariantChange::Size(size),
                (None, Some(color)) => VariantChange::Color(color),
                (None, None) => bail!("Pass --new-size or --new-color"),
            };
            let id = ProductId::new(line.product_id.clone());
            require_line(&cart, &line)?;
            cart.change_line_variant(&id, &line.size, &line.color, change)?;
            ctx.output.success("Line updated");
        }
        CartCommand::Clear => {
            cart.clear();
            ctx.output.success("Cart cleared");
        }
    }

    ctx.save_cart(&cart)?;
    if ctx.output.is_json() {
        show_cart(&cart, ctx)?;
    }
    Ok(())
}

fn require_line(cart: &Cart, line: &LineArgs) -> Result<()> {
    let key = roswell_commerce::cart::LineKey::new(
        line.product_id.as_str(),
        line.size.as_str(),
        line.color.as_str(),
    );
    if cart.get_line(&key).is_none() {
        bail!(
            "No line for {} ({} / {}) in the cart",
            line.product_id,
            line.size,
            line.color
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CartSummary<'a> {
    lines: &'a [roswell_commerce::cart::CartLine],
    item_count: i64,
    total: roswell_commerce::Price,
}

fn show_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    let total = cart.total_price()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            lines: cart.lines(),
            item_count: cart.total_item_count()?,
            total,
        });
        return Ok(());
    }

    ctx.output.header("Carrito");
    if cart.is_empty() {
        ctx.output.info("The cart is empty.");
        return Ok(());
    }

    let widths = [16, 28, 6, 10, 4, 12];
    ctx.output
        .table_row(&["ID", "TITLE", "SIZE", "COLOR", "QTY", "SUBTOTAL"], &widths);
    for line in cart.lines() {
        let title = truncate(&line.product.title, 28);
        let quantity = line.quantity.to_string();
        let subtotal = line.line_total()?.display();
        ctx.output.table_row(
            &[
                line.product.id.as_str(),
                &title,
                &line.size,
                &line.color,
                &quantity,
                &subtotal,
            ],
            &widths,
        );
    }
    ctx.output.kv("items", &cart.total_item_count()?.to_string());
    ctx.output.kv("total", &total.display());
    Ok(())
}
