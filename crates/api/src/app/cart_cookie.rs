//! The cart travels client-side in a `cart` cookie holding the `id:qty`
//! encoding.

use axum::http::{header, HeaderMap, HeaderName};

use quickbasket_sales::Cart;

pub const CART_COOKIE: &str = "cart";

/// Decode the cart from the request's `Cookie` headers. Absent or malformed
/// cookies yield an empty (or partial) cart, never an error.
pub fn read_cart(headers: &HeaderMap) -> Cart {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CART_COOKIE)
        .map(|(_, value)| Cart::parse(value.trim_matches('"')))
        .unwrap_or_default()
}

/// `Set-Cookie` header storing `cart`; an empty cart expires the cookie.
pub fn set_cart(cart: &Cart) -> [(HeaderName, String); 1] {
    if cart.is_empty() {
        return clear_cart();
    }
    [(
        header::SET_COOKIE,
        format!("{CART_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", cart.encode()),
    )]
}

pub fn clear_cart() -> [(HeaderName, String); 1] {
    [(
        header::SET_COOKIE,
        format!("{CART_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    )]
}
