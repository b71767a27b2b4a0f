//! Grouping of depth-annotated records into couple-centred stubs.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::error::{SeedError, SeedResult};
use crate::domain::{DisplayConfig, Forest, Member, MemberId, ParentPair, TreeNode};

/// Builds one stub per distinct anchor: the anchor node, one marriage per
/// parent pair anchored on it, and each marriage's direct children as leaves.
pub struct MarriageGrouper<'a> {
    display: &'a DisplayConfig,
}

impl<'a> MarriageGrouper<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self { display }
    }

    /// Group `members` into a flat forest of two-level stubs.
    ///
    /// # Errors
    /// - `NoRootableAncestor` when no member has a parent
    /// - `MemberNotFound` when a parent id has no record in `members`
    #[instrument(level = "debug", skip_all, fields(members = members.len()))]
    pub fn group(&self, members: &[Member]) -> SeedResult<Forest> {
        let mut forest = Forest::new();
        if let [single] = members {
            forest.add_root(TreeNode::from_member(single, self.display));
            return Ok(forest);
        }

        let pairs: Vec<ParentPair> = members.iter().filter_map(ParentPair::of).unique().collect();
        if pairs.is_empty() {
            return Err(SeedError::NoRootableAncestor);
        }

        let mut index: HashMap<MemberId, &Member> = HashMap::with_capacity(members.len());
        for member in members {
            index.entry(member.id).or_insert(member);
        }
        let lookup = |id: MemberId| index.get(&id).copied().ok_or(SeedError::MemberNotFound(id));

        for (anchor, anchored) in by_anchor(&pairs) {
            let node = forest.add_root(TreeNode::from_member(lookup(anchor)?, self.display));
            for pair in &anchored {
                let spouse = match pair.spouse {
                    Some(id) => Some(forest.insert(TreeNode::from_member(lookup(id)?, self.display))),
                    None => None,
                };
                // exact slot pattern: a single-parent child never lands under a couple
                let children = members
                    .iter()
                    .filter(|m| ParentPair::of(m) == Some(*pair))
                    .map(|child| forest.insert(TreeNode::from_member(child, self.display)))
                    .collect();
                forest.add_marriage(node, spouse, children);
            }
            trace!("stub {} with {} marriage(s)", anchor, anchored.len());
        }

        debug!("grouped {} pairs into {} stubs", pairs.len(), forest.len());
        Ok(forest)
    }
}

/// Bucket pairs by anchor, keeping first-seen order of anchors and of pairs.
fn by_anchor(pairs: &[ParentPair]) -> Vec<(MemberId, Vec<ParentPair>)> {
    let mut buckets: Vec<(MemberId, Vec<ParentPair>)> = Vec::new();
    for pair in pairs {
        match buckets.iter_mut().find(|(anchor, _)| *anchor == pair.anchor) {
            Some((_, bucket)) => bucket.push(*pair),
            None => buckets.push((pair.anchor, vec![*pair])),
        }
    }
    buckets
}

/// Group `members` with optional display hooks.
pub fn group_into_marriages(
    members: &[Member],
    display: Option<&DisplayConfig>,
) -> SeedResult<Forest> {
    let default_display = DisplayConfig::default();
    MarriageGrouper::new(display.unwrap_or(&default_display)).group(members)
}
