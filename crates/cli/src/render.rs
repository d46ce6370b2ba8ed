//! Plain-text tables for the terminal.

use std::io::{self, Write};

use quickbasket_core::Entity;
use quickbasket_products::Product;
use quickbasket_sales::{CartSummary, Sale};

pub fn products<W: Write>(out: &mut W, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products available.");
    }
    writeln!(out, "{:<6} {:<24} {:>10} {:>8}", "ID", "Name", "Price", "Stock")?;
    for p in products {
        writeln!(
            out,
            "{:<6} {:<24} {:>10} {:>8}",
            p.id(),
            p.name(),
            p.price(),
            p.stock()
        )?;
    }
    Ok(())
}

pub fn cart<W: Write>(out: &mut W, summary: &CartSummary) -> io::Result<()> {
    writeln!(out, "{:<6} {:<24} {:>5} {:>10} {:>10}", "ID", "Name", "Qty", "Price", "Total")?;
    for line in &summary.lines {
        writeln!(
            out,
            "{:<6} {:<24} {:>5} {:>10} {:>10}",
            line.product_id, line.name, line.quantity, line.unit_price, line.line_total
        )?;
    }
    writeln!(out, "Cart total: {}", summary.total)
}

pub fn receipt<W: Write>(out: &mut W, sale: &Sale) -> io::Result<()> {
    writeln!(out, "--- Receipt ---")?;
    for line in sale.lines() {
        writeln!(
            out,
            "{} x {} @ {} = {}",
            line.quantity, line.name, line.unit_price, line.line_total
        )?;
    }
    writeln!(out, "Total payable: {}", sale.total())?;
    writeln!(out, "Thank you for shopping!")
}

pub fn sales<W: Write>(out: &mut W, sales: &[Sale]) -> io::Result<()> {
    if sales.is_empty() {
        return writeln!(out, "No sales recorded yet.");
    }
    for sale in sales {
        writeln!(
            out,
            "{}  {}  {} unit(s)  total {}",
            sale.occurred_at().format("%Y-%m-%d %H:%M:%S"),
            sale.id(),
            sale.units(),
            sale.total()
        )?;
        for line in sale.lines() {
            writeln!(out, "    {} x {} @ {}", line.quantity, line.name, line.unit_price)?;
        }
    }
    Ok(())
}
