//! Bounded extraction of a target's relatives from a flat dataset.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::error::{SeedError, SeedResult};
use crate::domain::{Member, MemberId, ParentPair};

/// Depth assigned to the topmost generation.
pub const DEFAULT_DEPTH_OFFSET_START: u32 = 1;

/// Walks a dataset outward from one target and returns depth-annotated copies
/// of every record that belongs in the target's tree.
///
/// Ancestry stops one generation above the target: parents and the other
/// parents of descendants come back with their parent links cleared. Siblings
/// and descendants keep their links. Descent continues until a generation has
/// no children.
///
/// The dataset is borrowed per collector and never modified.
pub struct RelativeCollector<'a> {
    data: &'a [Member],
    index: HashMap<MemberId, &'a Member>,
    depth_offset_start: u32,
}

impl<'a> RelativeCollector<'a> {
    pub fn new(data: &'a [Member]) -> Self {
        let mut index = HashMap::with_capacity(data.len());
        for member in data {
            index.entry(member.id).or_insert(member);
        }
        Self {
            data,
            index,
            depth_offset_start: DEFAULT_DEPTH_OFFSET_START,
        }
    }

    pub fn with_depth_offset_start(mut self, start: u32) -> Self {
        self.depth_offset_start = start;
        self
    }

    fn lookup(&self, id: MemberId) -> SeedResult<&'a Member> {
        self.index
            .get(&id)
            .copied()
            .ok_or(SeedError::MemberNotFound(id))
    }

    /// Collect the target and its relatives.
    ///
    /// # Errors
    /// - `EmptyDataset` when there is no data at all
    /// - `MemberNotFound` when the target or any referenced parent is missing
    #[instrument(level = "debug", skip(self), fields(records = self.data.len()))]
    pub fn collect(&self, target_id: MemberId) -> SeedResult<Vec<Member>> {
        if self.data.is_empty() {
            return Err(SeedError::EmptyDataset);
        }
        let target = self.lookup(target_id)?;
        let start = self.depth_offset_start;
        let mut relatives = Relatives::default();

        let target_depth = if target.has_parents() {
            for parent_id in target.parent_ids() {
                let parent = self.lookup(parent_id)?;
                relatives.push(parent.as_boundary(start));
            }
            let family = ParentPair::of(target);
            for sibling in self
                .data
                .iter()
                .filter(|m| m.id != target.id && ParentPair::of(m) == family)
            {
                relatives.push(sibling.at_depth(start + 1));
            }
            start + 1
        } else {
            start
        };
        relatives.push(target.at_depth(target_depth));

        let mut generation = vec![target.id];
        let mut depth = target_depth;
        while !generation.is_empty() {
            generation = self.descend(&generation, depth, &mut relatives)?;
            depth += 1;
        }

        debug!("collected {} relatives of {}", relatives.members.len(), target_id);
        Ok(relatives.members)
    }

    /// Collect the children of `generation` one level below `depth`, plus
    /// their other parents as boundaries at `depth`. Returns the ids of the
    /// newly collected children.
    fn descend(
        &self,
        generation: &[MemberId],
        depth: u32,
        relatives: &mut Relatives,
    ) -> SeedResult<Vec<MemberId>> {
        let in_generation: HashSet<MemberId> = generation.iter().copied().collect();
        let children: Vec<&Member> = self
            .data
            .iter()
            .filter(|m| m.parent_ids().any(|p| in_generation.contains(&p)))
            .filter(|m| !relatives.contains(m.id))
            .collect();
        if children.is_empty() {
            return Ok(Vec::new());
        }
        trace!("depth {}: {} children", depth + 1, children.len());

        let other_parent_ids: Vec<MemberId> = children
            .iter()
            .filter_map(|child| child.parent_ids().find(|p| !in_generation.contains(p)))
            .unique()
            .collect();

        let mut next = Vec::with_capacity(children.len());
        for child in children {
            if relatives.push(child.at_depth(depth + 1)) {
                next.push(child.id);
            }
        }
        for parent_id in other_parent_ids {
            let parent = self.lookup(parent_id)?;
            relatives.push(parent.as_boundary(depth));
        }
        Ok(next)
    }
}

/// Collected records in discovery order, each id at most once.
#[derive(Default)]
struct Relatives {
    members: Vec<Member>,
    seen: HashSet<MemberId>,
}

impl Relatives {
    fn contains(&self, id: MemberId) -> bool {
        self.seen.contains(&id)
    }

    fn push(&mut self, member: Member) -> bool {
        if !self.seen.insert(member.id) {
            return false;
        }
        self.members.push(member);
        true
    }
}

/// Collect `target_id` and its relatives from `data` with the default start depth.
pub fn collect_relatives(data: &[Member], target_id: MemberId) -> SeedResult<Vec<Member>> {
    RelativeCollector::new(data).collect(target_id)
}
