//! Outbound ports: traits the application needs implemented by adapters.

pub mod gateway;

pub use gateway::{BulkGateway, Submission};
