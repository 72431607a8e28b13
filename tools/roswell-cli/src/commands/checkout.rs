//! Checkout command.

use anyhow::{Context as _, Result};
use roswell_commerce::checkout::CheckoutHandoff;
use serde_json::json;

use super::CheckoutArgs;
use crate::context::Context;

/// Render the order message and chat link for the saved cart.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.load_cart()?;
    let destination = args
        .destination
        .unwrap_or_else(|| ctx.config.checkout.destination.clone());

    let handoff =
        CheckoutHandoff::from_cart(&cart, destination).context("Nothing to check out")?;
    let url = handoff.whatsapp_url();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "destination": handoff.destination,
            "message": handoff.message,
            "url": url,
            "total": cart.total_price()?,
        }));
    } else {
        ctx.output.header("Pedido");
        ctx.output.plain(&handoff.message);
        ctx.output.plain("");
        ctx.output.kv("total", &cart.total_price()?.display());
        ctx.output.kv("link", &url);
    }

    if args.clear {
        cart.clear();
        ctx.save_cart(&cart)?;
        ctx.output.success("Cart cleared");
    }
    Ok(())
}
