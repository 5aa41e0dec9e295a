//! Infrastructure configuration modules.

pub mod logging;
pub mod mock;
pub mod processing;
pub mod sdk;
pub mod settings;
