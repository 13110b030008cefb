use serde::Serialize;

use crate::domain::{Order, OrderStatus};

/// Earnings and rating summary over completed orders.
///
/// Empty input yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CompletedStats {
    pub count: usize,
    /// Sum of prices. Wider than a single price so any number of orders fits.
    pub total: u128,
    /// Mean price rounded to a whole unit.
    pub average_check: u64,
    /// Mean over rated orders only, rounded to one decimal.
    pub average_rating: f64,
    pub rated: usize,
}

impl CompletedStats {
    /// Orders that are not completed are skipped.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut stats = Self::default();
        let mut rating_sum = 0u64;
        for order in orders.into_iter().filter(|o| o.status == OrderStatus::Completed) {
            stats.count += 1;
            stats.total += u128::from(order.price);
            if let Some(rating) = order.rating {
                stats.rated += 1;
                rating_sum += u64::from(rating);
            }
        }
        stats.average_check = mean_price(stats.total, stats.count);
        stats.average_rating = (mean(rating_sum, stats.rated) * 10.0).round() / 10.0;
        stats
    }
}

/// Service-wide counters, mirroring what an operator dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ServiceStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum of completed order prices.
    pub revenue: u128,
    pub average_order: u64,
}

impl ServiceStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = Self {
            total: orders.len(),
            ..Self::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Accepted => stats.accepted += 1,
                OrderStatus::Completed => {
                    stats.completed += 1;
                    stats.revenue += u128::from(order.price);
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats.average_order = mean_price(stats.revenue, stats.completed);
        stats
    }
}

/// Mean of `count` prices summing to `sum`, rounded half up. Never exceeds the largest price.
fn mean_price(sum: u128, count: usize) -> u64 {
    let count = count as u128;
    if count == 0 {
        return 0;
    }
    u64::try_from((sum + count / 2) / count).unwrap_or(u64::MAX)
}

fn mean(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
