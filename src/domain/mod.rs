//! Domain layer: entities and the seeding stages
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod coalesce;
pub mod display;
pub mod document;
pub mod entities;
pub mod error;
pub mod grouping;
pub mod relatives;

pub use arena::{FamilyTree, Forest, Marriage, NodeArena, TreeIterator, TreeNode, UNASSIGNED_DEPTH};
pub use coalesce::{coalesce, TreeCoalescer, DEFAULT_MAX_ROUNDS};
pub use display::DisplayConfig;
pub use document::{MarriageDocument, NodeDocument};
pub use entities::{Member, MemberId, ParentPair};
pub use error::{SeedError, SeedResult};
pub use grouping::{group_into_marriages, MarriageGrouper};
pub use relatives::{collect_relatives, RelativeCollector, DEFAULT_DEPTH_OFFSET_START};
