//! Plain-text rendering of the views.

use std::io::{self, Write};

use crate::views::{CartPage, CatalogStatus, CatalogView};

const TITLE_WIDTH: usize = 48;

/// Cut `text` to `max` characters, ending with an ellipsis when cut.
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn catalog(view: &CatalogView, out: &mut dyn Write) -> io::Result<()> {
    let status = view.status();

    if status.is_loading() {
        writeln!(out, "Loading products...")?;
        return Ok(());
    }

    let badge = match view.badge() {
        Some(count) => format!("[Cart ({count})]"),
        None => "[Cart]".to_string(),
    };
    writeln!(out, "Shop Products {badge:>width$}", width = TITLE_WIDTH + 12)?;

    if let CatalogStatus::Ready(products) = &status {
        for product in products {
            writeln!(
                out,
                "  {:>4}  {:<width$}  RS {}",
                product.id,
                ellipsize(&product.title, TITLE_WIDTH),
                product.price,
                width = TITLE_WIDTH
            )?;
        }
    }

    Ok(())
}

pub fn cart(page: &CartPage, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "<- Back to Shop")?;
    writeln!(out, "Your Shopping Cart")?;

    match page {
        CartPage::Empty => {
            writeln!(out, "  Your cart is empty")?;
            writeln!(out, "  Looks like you haven't added any items yet")?;
        }
        CartPage::Items { cards, total } => {
            for card in cards {
                writeln!(out, "  [x] {:>4}  {}", card.id, ellipsize(&card.title, TITLE_WIDTH))?;
                if !card.image.is_empty() {
                    writeln!(out, "        {}", card.image)?;
                }
                writeln!(out, "        Price: RS {}", card.price)?;
                writeln!(out, "        Quantity: {}", card.quantity)?;
                writeln!(out, "        Total: {}", card.subtotal)?;
            }
            writeln!(out, "Order Total: RS {total}")?;
            writeln!(out, "[ Proceed to Checkout > ]")?;
        }
    }

    Ok(())
}
