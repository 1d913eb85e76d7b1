//! Pantry Card
//!
//! Dashboard card listing pantry items by category, with optional search and
//! category filter, and +/- buttons wired to the host's count services.

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod models;
pub mod reconcile;
pub mod snapshot;

mod app;
mod components;
mod context;
mod element;
mod host;
mod store;

#[cfg(test)]
mod scenarios;

pub use config::CardConfig;
pub use controller::{CardController, RenderPass, SnapshotSink};
pub use element::PantryCardElement;
pub use error::{CardError, CardResult};
