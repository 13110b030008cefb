//! Read-only projections over order snapshots and the screens built from them.

pub mod filters;
pub mod screens;
pub mod stats;

pub use filters::*;
pub use screens::*;
pub use stats::*;
