//! kinseed: seed a single connected family tree around one person
//!
//! A flat dataset of members, each naming up to two parents, is turned into
//! one depth-annotated tree in three stages:
//! relative collection, marriage grouping and coalescing.
//!
//! # Architecture
//! - `domain`: the pipeline stages and the arena-backed tree (no I/O)
//! - `application`: the seed service wiring settings into the stages
//! - `config`: layered settings
//! - `util`: test setup and mock datasets

pub mod application;
pub mod config;
pub mod domain;
pub mod util;

pub use application::{seed, SeedService};
pub use domain::{DisplayConfig, FamilyTree, Member, MemberId, NodeDocument, SeedError};
