use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse lifecycle position of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an accepted order's courier currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStage {
    OnTheWay,
    Working,
}

/// Represents a single pickup request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub client_name: String,
    pub address: String,
    pub description: String,
    /// Whole currency units.
    pub price: u64,
    pub status: OrderStatus,
    pub courier_name: Option<String>,
    pub stage: Option<CourierStage>,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub client_name: String,
    pub address: String,
    pub description: String,
    pub price: u64,
}

impl OrderCreate {
    pub fn new(
        client_name: impl Into<String>,
        address: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            address: address.into(),
            description: description.into(),
            price,
        }
    }
}

impl Order {
    /// Pending or accepted: still waiting on someone.
    pub fn is_active(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Accepted)
    }

    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    pub fn owned_by(&self, client_name: &str) -> bool {
        self.client_name == client_name
    }

    pub fn held_by(&self, courier_name: &str) -> bool {
        self.courier_name.as_deref() == Some(courier_name)
    }

    /// Human readable status, including the courier's stage while accepted.
    pub fn status_label(&self) -> &'static str {
        match (self.status, self.stage) {
            (OrderStatus::Pending, _) => "Searching for a courier",
            (OrderStatus::Accepted, Some(CourierStage::Working)) => "Courier at work",
            (OrderStatus::Accepted, _) => "Courier on the way",
            (OrderStatus::Completed, _) => "Completed",
            (OrderStatus::Cancelled, _) => "Cancelled",
        }
    }
}
