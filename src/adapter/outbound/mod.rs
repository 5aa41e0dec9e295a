//! Outbound adapters implementing the gateway port.

pub mod sdk;
pub mod simulated;

pub use sdk::SdkGateway;
pub use simulated::SimulatedGateway;
