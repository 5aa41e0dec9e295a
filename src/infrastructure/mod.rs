//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic. Currently configuration loading, validation and logging
//! setup live here.

pub mod config;
