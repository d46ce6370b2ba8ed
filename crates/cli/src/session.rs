//! Interactive menu loop.
//!
//! The cart lives for one process run; products and sales go through the
//! store so they survive restarts when the store is file-backed.

use std::io::{self, BufRead, Write};

use chrono::Utc;

use quickbasket_core::{DomainError, Entity, ProductId};
use quickbasket_infra::Store;
use quickbasket_products::{Catalog, ProductDraft};
use quickbasket_sales::{Cart, SaleLedger};

use crate::render;

const MENU: &str = "\
===== QuickBasket =====
1. View products
2. Add product to cart
3. View cart
4. Remove item from cart
5. Checkout
6. Add new product (admin)
7. Update product (admin)
8. Delete product (admin)
9. Sales history
0. Exit";

pub struct Session {
    store: Box<dyn Store>,
    cart: Cart,
}

impl Session {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            store,
            cart: Cart::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn store(&self) -> &dyn Store {
        &*self.store
    }

    /// Run until the user picks `0` or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        loop {
            writeln!(out)?;
            writeln!(out, "{MENU}")?;
            let Some(choice) = prompt(input, out, "Choose an option: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => render::products(out, &self.store.list())?,
                "2" => self.add_to_cart(input, out)?,
                "3" => self.view_cart(out)?,
                "4" => self.remove_from_cart(input, out)?,
                "5" => self.checkout(out)?,
                "6" => self.add_product(input, out)?,
                "7" => self.update_product(input, out)?,
                "8" => self.delete_product(input, out)?,
                "9" => render::sales(out, &self.store.sales())?,
                "0" => {
                    writeln!(out, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(out, "Invalid choice. Try again.")?,
            }
        }
        writeln!(out)?;
        Ok(())
    }

    fn add_to_cart<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        let Some(id) = read_product_id(input, out)? else {
            return Ok(());
        };
        let Some(qty) = prompt(input, out, "Quantity [1]: ")? else {
            return Ok(());
        };
        let qty = if qty.is_empty() {
            1
        } else {
            match qty.parse::<i64>() {
                Ok(q) => q,
                Err(_) => return writeln!(out, "Quantity must be a whole number."),
            }
        };

        match self.cart.add(&*self.store, id, qty) {
            Ok(product) => writeln!(out, "Added {qty} x {} to cart.", product.name()),
            Err(e) => report(out, &e),
        }
    }

    fn view_cart<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.cart.view(&*self.store) {
            Ok(summary) => render::cart(out, &summary),
            Err(DomainError::EmptyCart) => writeln!(out, "Your cart is empty."),
            Err(e) => report(out, &e),
        }
    }

    fn remove_from_cart<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(id) = read_product_id(input, out)? else {
            return Ok(());
        };
        if self.cart.remove(id) {
            writeln!(out, "Item removed from cart.")
        } else {
            writeln!(out, "Item not in cart.")
        }
    }

    fn checkout<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match quickbasket_sales::checkout(&mut *self.store, &mut self.cart, Utc::now()) {
            Ok(sale) => {
                tracing::info!(sale_id = %sale.id(), total = %sale.total(), "checkout committed");
                render::receipt(out, &sale)
            }
            Err(DomainError::EmptyCart) => writeln!(out, "Your cart is empty."),
            Err(e) => {
                tracing::warn!(error = %e, "checkout rejected");
                report(out, &e)
            }
        }
    }

    fn add_product<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        let Some(draft) = read_draft(input, out)? else {
            return Ok(());
        };
        match self.store.create(draft) {
            Ok(product) => writeln!(out, "Product added with ID {}.", product.id()),
            Err(e) => report(out, &e),
        }
    }

    fn update_product<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(id) = read_product_id(input, out)? else {
            return Ok(());
        };
        if self.store.get(id).is_none() {
            return report(out, &DomainError::not_found(format!("product {id}")));
        }
        let Some(draft) = read_draft(input, out)? else {
            return Ok(());
        };
        match self.store.update(id, draft) {
            Ok(_) => writeln!(out, "Product updated."),
            Err(e) => report(out, &e),
        }
    }

    fn delete_product<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(id) = read_product_id(input, out)? else {
            return Ok(());
        };
        match self.store.delete(id) {
            Ok(product) => writeln!(out, "Deleted {}.", product.name()),
            Err(e) => report(out, &e),
        }
    }
}

/// Print `label`, read one line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_product_id<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<ProductId>> {
    let Some(raw) = prompt(input, out, "Product ID: ")? else {
        return Ok(None);
    };
    match raw.parse::<ProductId>() {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            report(out, &e)?;
            Ok(None)
        }
    }
}

fn read_draft<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<ProductDraft>> {
    let Some(name) = prompt(input, out, "Name: ")? else {
        return Ok(None);
    };
    let Some(price) = prompt(input, out, "Price: ")? else {
        return Ok(None);
    };
    let Some(stock) = prompt(input, out, "Stock: ")? else {
        return Ok(None);
    };
    match ProductDraft::parse(&name, &price, &stock) {
        Ok(draft) => Ok(Some(draft)),
        Err(e) => {
            report(out, &e)?;
            Ok(None)
        }
    }
}

fn report<W: Write>(out: &mut W, err: &DomainError) -> io::Result<()> {
    writeln!(out, "Error: {err}")
}
