use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::error::SystemError;
use super::sweeper::stale_order_sweeper;
use crate::actor_framework::ResourceActor;
use crate::clients::OrderClient;
use crate::config::Settings;
use crate::domain::{Order, OrderCreate};

/// The running application: the order actor plus its background tasks.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    actor_handle: JoinHandle<()>,
    sweeper_handle: Option<JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the order actor, seeds sample orders if configured, and starts the sweeper.
    #[instrument(name = "order_system", skip(settings))]
    pub async fn start(settings: &Settings) -> Result<Self, SystemError> {
        info!("Starting order system");

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(settings.channel_capacity.max(1), order_id_generator());
        let order_client = OrderClient::new(order_resource_client);
        let actor_handle = tokio::spawn(order_actor.run());

        if settings.seed_sample_orders {
            for payload in sample_orders() {
                order_client.create_order(payload).await?;
            }
            info!("Sample orders seeded");
        }

        let sweeper_handle = settings.stale_order_max_age().map(|max_age| {
            tokio::spawn(stale_order_sweeper(
                order_client.clone(),
                settings.sweep_interval(),
                max_age,
            ))
        });

        info!("Order system started successfully");
        Ok(Self {
            order_client,
            actor_handle,
            sweeper_handle,
        })
    }

    /// Stops the sweeper, asks the actor to finish queued requests and waits for it.
    ///
    /// Clients still held elsewhere see `ActorCommunicationError` afterwards.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down order system");

        if let Some(sweeper) = self.sweeper_handle {
            sweeper.abort();
        }
        if let Err(e) = self.order_client.shutdown().await {
            // Already gone; the join below reports why.
            error!(error = %e, "Order actor did not accept shutdown");
        }
        self.actor_handle.await?;

        info!("Order system shutdown complete");
        Ok(())
    }
}

/// Timestamp-derived order ids with a sequence suffix, unique within the process.
pub fn order_id_generator() -> impl Fn() -> String + Send + Sync + 'static {
    let counter = AtomicU64::new(1);
    move || {
        let seq = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", Utc::now().timestamp_millis(), seq)
    }
}

/// Requests from other clients so a fresh session has something to show.
pub fn sample_orders() -> Vec<OrderCreate> {
    vec![
        OrderCreate::new("Maria", "Lenina 12, apt 4", "Two bags of household waste", 300),
        OrderCreate::new("Ivan", "Pushkina 7", "Old sofa, needs two people", 1500),
        OrderCreate::new("Olga", "Gagarina 21", "Construction debris, 5 bags", 900),
    ]
}
