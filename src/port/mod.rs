//! Port definitions separating the application from its adapters.

pub mod outbound;
