//! Order lifecycle for a courier marketplace.
//!
//! Clients post pickup requests, couriers take them, work through them and complete them,
//! and clients rate the result. All order state lives in a single [`actor_framework::ResourceActor`],
//! so competing couriers can never both win the same order. Everything a screen shows is
//! derived from a snapshot of that store by the functions in [`views`].

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod console;
pub mod domain;
pub mod notify;
pub mod order_actor;
pub mod session;
pub mod views;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
