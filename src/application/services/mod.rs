//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod seeder;

pub use seeder::{seed, SeedService};
