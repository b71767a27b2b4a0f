//! Merging of couple stubs into one connected tree.
//!
//! Every stub produced by grouping may really sit below another stub: one of
//! its ids is a child placeholder somewhere else in the forest. Coalescing
//! keeps testing stubs against each other and splices matches in place until
//! a single root remains.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::error::{SeedError, SeedResult};
use crate::domain::{FamilyTree, Forest, Marriage, NodeArena};

/// Round cap used when none is configured.
pub const DEFAULT_MAX_ROUNDS: usize = 100;

#[derive(Debug, Clone)]
pub struct TreeCoalescer {
    max_rounds: usize,
}

impl Default for TreeCoalescer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeCoalescer {
    pub fn new() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Merge all stubs of `forest` into one tree.
    ///
    /// A single-stub forest is returned as is. Each round offers every
    /// remaining stub to every other one; a stub that finds a host is removed
    /// from the root list.
    ///
    /// # Errors
    /// - `EmptyForest` when there is nothing to merge
    /// - `CycleOrMultipleRoots` when a round makes no progress or the round
    ///   cap is reached with more than one root left
    #[instrument(level = "debug", skip_all, fields(stubs = forest.len()))]
    pub fn coalesce(&self, forest: Forest) -> SeedResult<FamilyTree> {
        let Forest {
            mut arena,
            mut roots,
        } = forest;
        match roots.as_slice() {
            [] => return Err(SeedError::EmptyForest),
            [root] => return Ok(FamilyTree::new(arena, *root)),
            _ => {}
        }

        let mut rounds = 0;
        while roots.len() > 1 {
            if rounds == self.max_rounds {
                return Err(SeedError::CycleOrMultipleRoots {
                    rounds,
                    remaining: roots.len(),
                });
            }
            rounds += 1;

            let before = roots.len();
            let mut position = 0;
            while position < roots.len() {
                let candidate = roots[position];
                let hosts: Vec<Index> = roots.iter().copied().filter(|&h| h != candidate).collect();
                if hosts.into_iter().any(|host| arena.absorb(host, candidate)) {
                    roots.remove(position);
                } else {
                    position += 1;
                }
            }
            debug!("round {}: {} -> {} roots", rounds, before, roots.len());

            // rounds are deterministic: an idle round would repeat forever
            if roots.len() == before {
                return Err(SeedError::CycleOrMultipleRoots {
                    rounds,
                    remaining: roots.len(),
                });
            }
        }

        Ok(FamilyTree::new(arena, roots[0]))
    }
}

impl NodeArena {
    /// Try to place `candidate` somewhere below `host`.
    fn absorb(&mut self, host: Index, candidate: Index) -> bool {
        let candidate_id = self.node(candidate).id;
        if self.node(host).id == candidate_id {
            return false;
        }

        for position in 0..self.node(host).marriages.len() {
            let marriage = self.node(host).marriages[position].clone();

            // a recorded spouse must not also be grafted as a descendant
            if marriage.spouse.is_some_and(|s| self.node(s).id == candidate_id) {
                return false;
            }
            if let Some(slot) = marriage
                .children
                .iter()
                .position(|&child| self.node(child).id == candidate_id)
            {
                self.graft(host, position, slot, candidate);
                return true;
            }
            if self.pivot(&marriage, candidate) {
                return true;
            }
            if marriage
                .children
                .iter()
                .any(|&child| self.absorb(child, candidate))
            {
                return true;
            }
        }
        false
    }

    /// Replace the child placeholder at `slot` with the full `candidate`.
    /// Marriages the placeholder already gained from a pivot move along.
    fn graft(&mut self, host: Index, position: usize, slot: usize, candidate: Index) {
        let placeholder = std::mem::replace(
            &mut self.node_mut(host).marriages[position].children[slot],
            candidate,
        );
        let carried = std::mem::take(&mut self.node_mut(placeholder).marriages);
        self.node_mut(candidate).marriages.extend(carried);
        self.release(placeholder);
        trace!(
            "grafted {} below {}",
            self.node(candidate).id,
            self.node(host).id
        );
    }

    /// Re-root `candidate` below the host child it is married to.
    ///
    /// Applies when `candidate` anchors a marriage whose spouse is a child of
    /// `host_marriage`: that child becomes the owner of a new marriage with
    /// `candidate` as spouse and the matched marriage's children.
    fn pivot(&mut self, host_marriage: &Marriage, candidate: Index) -> bool {
        let found = self
            .node(candidate)
            .marriages
            .iter()
            .enumerate()
            .find_map(|(position, marriage)| {
                let spouse_id = self.node(marriage.spouse?).id;
                host_marriage
                    .children
                    .iter()
                    .copied()
                    .find(|&child| self.node(child).id == spouse_id)
                    .map(|attachment| (position, attachment))
            });
        let Some((position, attachment)) = found else {
            return false;
        };

        let mut marriages = std::mem::take(&mut self.node_mut(candidate).marriages);
        let pivoted = marriages.swap_remove(position);
        if !marriages.is_empty() {
            debug!(
                "pivot of {} drops {} other marriage(s)",
                self.node(candidate).id,
                marriages.len()
            );
        }
        for stale in marriages {
            for idx in stale.spouse.into_iter().chain(stale.children) {
                self.release(idx);
            }
        }
        if let Some(own_copy) = pivoted.spouse {
            self.release(own_copy);
        }

        self.node_mut(attachment)
            .marriages
            .push(Marriage::new(Some(candidate), pivoted.children));
        trace!(
            "pivoted {} onto {}",
            self.node(candidate).id,
            self.node(attachment).id
        );
        true
    }
}

/// Coalesce `forest` with the default round cap.
pub fn coalesce(forest: Forest) -> SeedResult<FamilyTree> {
    TreeCoalescer::new().coalesce(forest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeNode;

    #[test]
    fn given_placeholder_with_pivoted_marriage_when_grafting_then_marriage_is_kept() {
        // host 10: children [20]; 20 already pivoted a marriage with 5
        let mut forest = Forest::new();
        let pivot_child = forest.insert(TreeNode::new(30, "from pivot"));
        let pivot_spouse = forest.insert(TreeNode::new(5, "pivot spouse"));
        let placeholder = forest.insert(TreeNode::new(20, "placeholder"));
        forest.add_marriage(placeholder, Some(pivot_spouse), vec![pivot_child]);
        let host = forest.add_root(TreeNode::new(10, "host"));
        forest.add_marriage(host, None, vec![placeholder]);

        let own_child = forest.insert(TreeNode::new(40, "own child"));
        let own_spouse = forest.insert(TreeNode::new(25, "own spouse"));
        let stub = forest.add_root(TreeNode::new(20, "stub"));
        forest.add_marriage(stub, Some(own_spouse), vec![own_child]);

        let tree = coalesce(forest).unwrap();

        let grafted = tree.find(20).unwrap();
        let spouses: Vec<_> = grafted
            .marriages
            .iter()
            .filter_map(|m| m.spouse)
            .filter_map(|s| tree.node(s))
            .map(|n| n.id)
            .collect();
        assert_eq!(spouses, vec![25, 5]);
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn given_idle_round_when_coalescing_then_fails_without_exhausting_cap() {
        let mut forest = Forest::new();
        forest.add_root(TreeNode::new(1, "a"));
        forest.add_root(TreeNode::new(2, "b"));

        let result = TreeCoalescer::new().with_max_rounds(10_000).coalesce(forest);

        assert_eq!(
            result.unwrap_err(),
            SeedError::CycleOrMultipleRoots {
                rounds: 1,
                remaining: 2
            }
        );
    }
}
