//! Typed handles over the resource actors.

#[macro_use]
mod macros;
pub mod order_client;

pub use order_client::*;
