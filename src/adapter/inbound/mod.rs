//! Inbound adapters: the CLI, the mock HTTP backend and payment list input.

pub mod cli;
pub mod http;
pub mod payment_list;
