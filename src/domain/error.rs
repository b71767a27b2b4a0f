//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::MemberId;

/// Failures of the seeding pipeline.
/// Every variant is fatal to the enclosing seed call; no partial tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("no member has a parent to anchor a marriage on")]
    NoRootableAncestor,

    #[error("forest is empty")]
    EmptyForest,

    #[error("{remaining} roots left after {rounds} coalesce rounds: data contains multiple roots or a cycle")]
    CycleOrMultipleRoots { rounds: usize, remaining: usize },
}

/// Result type for seeding operations.
pub type SeedResult<T> = Result<T, SeedError>;
