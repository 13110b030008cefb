use thiserror::Error;

use crate::order_actor::OrderError;

/// Errors that can occur while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to seed sample orders: {0}")]
    Seed(#[from] OrderError),
    #[error("Actor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
