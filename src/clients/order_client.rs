use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate};
use crate::order_actor::{OrderAction, OrderError};

/// Client for the Order actor: the programmatic surface of the order lifecycle.
///
/// Every call resolves to `Ok` with the updated order or an explicit [`OrderError`];
/// nothing is silently ignored.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError, order);

impl OrderClient {
    #[instrument(skip(self, payload), fields(client = %payload.client_name, price = payload.price))]
    pub async fn create_order(&self, payload: OrderCreate) -> Result<String, OrderError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(payload)
            .await
            .map_err(OrderError::from)
            .inspect_err(|e| warn!(error = %e, "Order creation rejected"))?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn accept_order(&self, id: String, courier: String) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Accept { courier }).await
    }

    #[instrument(skip(self))]
    pub async fn start_work(&self, id: String, courier: String) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::StartWork { courier }).await
    }

    #[instrument(skip(self))]
    pub async fn complete_order(&self, id: String, courier: String) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Complete { courier }).await
    }

    #[instrument(skip(self))]
    pub async fn release_order(&self, id: String, courier: String) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Release { courier }).await
    }

    #[instrument(skip(self, review))]
    pub async fn rate_order(
        &self,
        id: String,
        client: String,
        rating: u64,
        review: String,
    ) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Rate { client, rating, review }).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String, client: String) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Cancel { client }).await
    }

    #[instrument(skip(self))]
    pub async fn expire_order(&self, id: String, cutoff: DateTime<Utc>) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Expire { cutoff }).await
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        self.inner.shutdown().await.map_err(OrderError::from)
    }

    async fn perform(&self, id: String, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        let verb = action.verb();
        let order = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(OrderError::from)
            .inspect_err(|e| warn!(error = %e, "Order action rejected"))?;
        info!(order_id = %order.id, status = %order.status, "Order {verb}");
        Ok(order)
    }
}
