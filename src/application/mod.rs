//! Application layer: services and use cases
//!
//! This layer wires settings and display hooks into the domain pipeline.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{seed, SeedService};
