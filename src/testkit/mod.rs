//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for payments, payment rows and request bodies.
//! - [`config`] - Canonical test configurations with zero delays.
//! - [`gateway`] - A scripted [`BulkGateway`](crate::port::outbound::gateway::BulkGateway)
//!   that replays queued answers and counts calls.

pub mod config;
pub mod domain;
pub mod gateway;
