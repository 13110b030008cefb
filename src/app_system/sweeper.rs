use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error, info, instrument};

use crate::clients::OrderClient;
use crate::domain::OrderStatus;

/// Periodically cancels pending orders nobody picked up within `max_age`.
///
/// Runs until aborted. A failed sweep is logged and retried on the next tick.
#[instrument(name = "stale_order_sweeper", skip(orders))]
pub async fn stale_order_sweeper(orders: OrderClient, interval: Duration, max_age: TimeDelta) {
    let mut interval_timer = tokio::time::interval(interval);
    // The first tick completes immediately; nothing can be stale at start-up.
    interval_timer.tick().await;

    loop {
        interval_timer.tick().await;
        let expired = sweep_stale_orders(&orders, Utc::now() - max_age).await;
        if expired > 0 {
            info!(expired, "Stale orders cancelled");
        }
    }
}

/// Expires every pending order created before `cutoff` and returns how many were cancelled.
///
/// The status and age are re-checked inside the actor, so an order a courier accepts
/// between the listing and the expiry is left alone.
pub async fn sweep_stale_orders(orders: &OrderClient, cutoff: DateTime<Utc>) -> usize {
    let snapshot = match orders.list_orders().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Stale order sweep failed");
            return 0;
        }
    };

    let mut expired = 0;
    let candidates = snapshot
        .iter()
        .filter(|o| o.status == OrderStatus::Pending && o.created_at < cutoff);
    for order in candidates {
        match orders.expire_order(order.id.clone(), cutoff).await {
            Ok(_) => expired += 1,
            Err(e) => debug!(order_id = %order.id, error = %e, "Order no longer eligible for expiry"),
        }
    }
    expired
}
