//! Domain entities: input member records and their parent pairs

use serde::{Deserialize, Serialize};

/// Unique key of a member record.
pub type MemberId = u64;

/// One person in the input dataset with up to two parent references.
///
/// Records are never mutated in place: boundary clearing and depth
/// annotation always happen on clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub parent1_id: Option<MemberId>,
    #[serde(default)]
    pub parent2_id: Option<MemberId>,
    /// Generation distance from the seeding target, set during collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_offset: Option<u32>,
}

impl Member {
    /// Create a parentless member.
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent1_id: None,
            parent2_id: None,
            depth_offset: None,
        }
    }

    pub fn with_parents(mut self, parent1: Option<MemberId>, parent2: Option<MemberId>) -> Self {
        self.parent1_id = parent1;
        self.parent2_id = parent2;
        self
    }

    /// Present parent ids in slot order.
    pub fn parent_ids(&self) -> impl Iterator<Item = MemberId> {
        self.parent1_id.into_iter().chain(self.parent2_id)
    }

    pub fn has_parents(&self) -> bool {
        self.parent1_id.is_some() || self.parent2_id.is_some()
    }

    pub fn is_child_of(&self, parent: MemberId) -> bool {
        self.parent_ids().any(|id| id == parent)
    }

    /// Copy of this record annotated with `depth`.
    pub fn at_depth(&self, depth: u32) -> Self {
        Self {
            depth_offset: Some(depth),
            ..self.clone()
        }
    }

    /// Copy of this record with both parent links cleared, so traversal
    /// treats it as an opaque leaf.
    pub fn as_boundary(&self, depth: u32) -> Self {
        Self {
            parent1_id: None,
            parent2_id: None,
            ..self.at_depth(depth)
        }
    }
}

/// Order-independent identity of the parents a member descends from.
///
/// `anchor` is always the lower id. Two records naming the same parents in
/// swapped slots produce equal pairs; a record naming one parent (in either
/// slot) produces a pair without spouse, which never equals a couple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParentPair {
    pub anchor: MemberId,
    pub spouse: Option<MemberId>,
}

impl ParentPair {
    pub fn new(first: Option<MemberId>, second: Option<MemberId>) -> Option<Self> {
        match (first, second) {
            (Some(a), Some(b)) if a == b => Some(Self::single(a)),
            (Some(a), Some(b)) => Some(Self {
                anchor: a.min(b),
                spouse: Some(a.max(b)),
            }),
            (Some(a), None) | (None, Some(a)) => Some(Self::single(a)),
            (None, None) => None,
        }
    }

    fn single(anchor: MemberId) -> Self {
        Self {
            anchor,
            spouse: None,
        }
    }

    /// Parent pair of `member`, `None` for parentless records.
    pub fn of(member: &Member) -> Option<Self> {
        Self::new(member.parent1_id, member.parent2_id)
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.anchor == id || self.spouse == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_swapped_slots_when_building_pair_then_pairs_are_equal() {
        let a = Member::new(3, "a").with_parents(Some(1), Some(2));
        let b = Member::new(4, "b").with_parents(Some(2), Some(1));

        assert_eq!(ParentPair::of(&a), ParentPair::of(&b));
        assert_eq!(ParentPair::of(&a).map(|p| p.anchor), Some(1));
    }

    #[test]
    fn given_single_parent_in_either_slot_when_building_pair_then_no_spouse() {
        let first = Member::new(3, "first").with_parents(Some(7), None);
        let second = Member::new(4, "second").with_parents(None, Some(7));

        assert_eq!(ParentPair::of(&first), ParentPair::of(&second));
        assert_eq!(ParentPair::of(&first).and_then(|p| p.spouse), None);
        assert_ne!(
            ParentPair::of(&first),
            ParentPair::new(Some(7), Some(8)),
            "single parent must never equal a couple"
        );
    }

    #[test]
    fn given_same_parent_twice_when_building_pair_then_collapses_to_single() {
        assert_eq!(ParentPair::new(Some(5), Some(5)), ParentPair::new(Some(5), None));
    }

    #[test]
    fn given_member_when_made_boundary_then_original_keeps_parents() {
        let member = Member::new(3, "child").with_parents(Some(1), Some(2));

        let boundary = member.as_boundary(1);

        assert!(!boundary.has_parents());
        assert_eq!(boundary.depth_offset, Some(1));
        assert!(member.has_parents());
        assert_eq!(member.depth_offset, None);
    }
}
