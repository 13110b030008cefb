//! Pure predicates deriving each list a screen shows.
//!
//! Orders are stored once; every list below is recomputed from a fresh snapshot on each
//! render instead of being tracked separately.

use crate::domain::{Order, OrderStatus};

/// The open pool: orders waiting for a courier.
pub fn available_orders(orders: &[Order]) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .collect()
}

/// A client's orders that are still pending or accepted.
pub fn client_active<'a>(orders: &'a [Order], client: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.owned_by(client) && o.is_active())
        .collect()
}

pub fn client_history<'a>(orders: &'a [Order], client: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.owned_by(client) && o.status == OrderStatus::Completed)
        .collect()
}

/// Completed orders of `client` that still show the rating prompt.
pub fn awaiting_rating<'a>(orders: &'a [Order], client: &str) -> Vec<&'a Order> {
    client_history(orders, client)
        .into_iter()
        .filter(|o| !o.is_rated())
        .collect()
}

pub fn courier_current<'a>(orders: &'a [Order], courier: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Accepted && o.held_by(courier))
        .collect()
}

pub fn courier_history<'a>(orders: &'a [Order], courier: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed && o.held_by(courier))
        .collect()
}

pub fn completed_orders(orders: &[Order]) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .collect()
}

/// Completed orders that carry a rating, for the public reviews page.
pub fn reviewed_orders(orders: &[Order]) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed && o.is_rated())
        .collect()
}
