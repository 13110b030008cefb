use chrono::{DateTime, Utc};

use super::actions::OrderAction;
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{CourierStage, Order, OrderCreate, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a pending Order from creation parameters.
    ///
    /// # Errors
    /// `ValidationError` when the client name, address or description is blank.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        let missing: Vec<&str> = [
            ("client name", &params.client_name),
            ("address", &params.address),
            ("description", &params.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(OrderError::ValidationError(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            id,
            client_name: params.client_name,
            address: params.address,
            description: params.description,
            price: params.price,
            status: OrderStatus::Pending,
            courier_name: None,
            stage: None,
            rating: None,
            review: None,
            created_at: Utc::now(),
            accepted_at: None,
            completed_at: None,
            cancelled_at: None,
        })
    }

    /// Applies one lifecycle action and returns the updated order.
    ///
    /// # Transitions
    /// - `Accept`: pending -> accepted
    /// - `StartWork`: accepted -> accepted (stage working)
    /// - `Complete`: accepted -> completed
    /// - `Release`: accepted -> pending
    /// - `Rate`: completed -> completed
    /// - `Cancel`: pending | accepted -> cancelled
    /// - `Expire`: pending -> cancelled
    ///
    /// Anything else is refused and leaves the order untouched.
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        let verb = action.verb();
        match action {
            OrderAction::Accept { courier } => self.accept(courier, verb)?,
            OrderAction::StartWork { courier } => {
                self.ensure_in_progress(&courier, verb)?;
                self.stage = Some(CourierStage::Working);
            }
            OrderAction::Complete { courier } => {
                self.ensure_in_progress(&courier, verb)?;
                self.status = OrderStatus::Completed;
                self.stage = None;
                self.completed_at = Some(Utc::now());
            }
            OrderAction::Release { courier } => {
                self.ensure_in_progress(&courier, verb)?;
                self.status = OrderStatus::Pending;
                self.courier_name = None;
                self.stage = None;
                self.accepted_at = None;
            }
            OrderAction::Rate { client, rating, review } => self.rate(&client, rating, review, verb)?,
            OrderAction::Cancel { client } => self.cancel(&client, verb)?,
            OrderAction::Expire { cutoff } => self.expire(cutoff, verb)?,
        }
        Ok(self.clone())
    }
}

impl Order {
    fn invalid(&self, action: &'static str) -> OrderError {
        OrderError::InvalidTransition {
            id: self.id.clone(),
            from: self.status,
            action,
        }
    }

    fn accept(&mut self, courier: String, verb: &'static str) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Pending => {}
            OrderStatus::Accepted => return Err(OrderError::AlreadyAccepted(self.id.clone())),
            OrderStatus::Completed => return Err(OrderError::AlreadyCompleted(self.id.clone())),
            OrderStatus::Cancelled => return Err(self.invalid(verb)),
        }
        self.status = OrderStatus::Accepted;
        self.courier_name = Some(courier);
        self.stage = Some(CourierStage::OnTheWay);
        self.accepted_at = Some(Utc::now());
        Ok(())
    }

    /// Accepted and held by `courier`.
    fn ensure_in_progress(&self, courier: &str, verb: &'static str) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Accepted if self.held_by(courier) => Ok(()),
            OrderStatus::Accepted => Err(OrderError::NotAssigned(self.id.clone())),
            OrderStatus::Completed => Err(OrderError::AlreadyCompleted(self.id.clone())),
            OrderStatus::Pending | OrderStatus::Cancelled => Err(self.invalid(verb)),
        }
    }

    fn rate(&mut self, client: &str, rating: u64, review: String, verb: &'static str) -> Result<(), OrderError> {
        if self.status != OrderStatus::Completed {
            return Err(self.invalid(verb));
        }
        if !self.owned_by(client) {
            return Err(OrderError::NotOwner(self.id.clone()));
        }
        let stars = u8::try_from(rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| {
                OrderError::ValidationError(format!("rating must be between 1 and 5, got {rating}"))
            })?;
        self.rating = Some(stars);
        self.review = Some(review);
        Ok(())
    }

    fn cancel(&mut self, client: &str, verb: &'static str) -> Result<(), OrderError> {
        if !self.owned_by(client) {
            return Err(OrderError::NotOwner(self.id.clone()));
        }
        match self.status {
            OrderStatus::Pending | OrderStatus::Accepted => {}
            OrderStatus::Completed => return Err(OrderError::AlreadyCompleted(self.id.clone())),
            OrderStatus::Cancelled => return Err(self.invalid(verb)),
        }
        self.status = OrderStatus::Cancelled;
        self.stage = None;
        self.cancelled_at = Some(Utc::now());
        Ok(())
    }

    fn expire(&mut self, cutoff: DateTime<Utc>, verb: &'static str) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending || self.created_at >= cutoff {
            return Err(self.invalid(verb));
        }
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        Ok(())
    }
}
