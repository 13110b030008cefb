use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order {0} has already been accepted")]
    AlreadyAccepted(String),
    #[error("Order {0} has already been completed")]
    AlreadyCompleted(String),
    #[error("Order {id} cannot be {action} while {from}")]
    InvalidTransition {
        id: String,
        from: OrderStatus,
        action: &'static str,
    },
    #[error("Order {0} is not assigned to you")]
    NotAssigned(String),
    #[error("Order {0} belongs to another client")]
    NotOwner(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(err: FrameworkError<OrderError>) -> Self {
        match err {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
