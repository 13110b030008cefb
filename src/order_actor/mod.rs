//! Order lifecycle rules: the actions an order accepts and the errors it can refuse with.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
