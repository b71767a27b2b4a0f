use generational_arena::{Arena, Index};
use serde_json::Value;
use tracing::instrument;

use crate::domain::{DisplayConfig, Member, MemberId};

/// Depth of a node whose member was never annotated.
pub const UNASSIGNED_DEPTH: i32 = -1;

/// One person in the output tree together with their marriages.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: MemberId,
    pub name: String,
    /// Generation distance from the seeding target, [`UNASSIGNED_DEPTH`] if unknown
    pub depth_offset: i32,
    pub class: String,
    pub text_class: String,
    pub extra: Value,
    /// Marriages owned by this node, in insertion order
    pub marriages: Vec<Marriage>,
}

impl TreeNode {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            depth_offset: UNASSIGNED_DEPTH,
            class: String::new(),
            text_class: String::new(),
            extra: Value::Object(Default::default()),
            marriages: Vec::new(),
        }
    }

    /// Build a marriage-less node from `member`, running the display hooks.
    pub fn from_member(member: &Member, display: &DisplayConfig) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            depth_offset: member
                .depth_offset
                .and_then(|depth| i32::try_from(depth).ok())
                .unwrap_or(UNASSIGNED_DEPTH),
            class: display.class_of(member),
            text_class: display.text_class_of(member),
            extra: display.extra_of(member),
            marriages: Vec::new(),
        }
    }

    pub fn with_depth(mut self, depth_offset: i32) -> Self {
        self.depth_offset = depth_offset;
        self
    }
}

/// Union between the owning node and an optional spouse.
///
/// Holds arena indices only; it has no back-reference to its owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marriage {
    /// `None` when the co-parent is unknown
    pub spouse: Option<Index>,
    pub children: Vec<Index>,
}

impl Marriage {
    pub fn new(spouse: Option<Index>, children: Vec<Index>) -> Self {
        Self { spouse, children }
    }
}

/// Generational arena owning every node of a forest or tree.
///
/// Re-rooting and splicing rewrite indices instead of moving nodes, so a node
/// can change its position in the hierarchy without being copied.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Arena<TreeNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: TreeNode) -> Index {
        self.nodes.insert(node)
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode> {
        self.nodes.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.nodes.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Indices handed to these two are always created by this crate and
    // still live, so direct indexing cannot miss.
    pub(crate) fn node(&self, idx: Index) -> &TreeNode {
        &self.nodes[idx]
    }

    pub(crate) fn node_mut(&mut self, idx: Index) -> &mut TreeNode {
        &mut self.nodes[idx]
    }

    /// Remove `idx` and everything reachable through its marriages.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn release(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                for marriage in node.marriages {
                    stack.extend(marriage.spouse);
                    stack.extend(marriage.children);
                }
            }
        }
    }
}

/// Flat collection of independently grouped couple stubs.
#[derive(Debug, Default)]
pub struct Forest {
    pub(crate) arena: NodeArena,
    pub(crate) roots: Vec<Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node without making it a root; attach it via [`Forest::add_marriage`].
    pub fn insert(&mut self, node: TreeNode) -> Index {
        self.arena.insert(node)
    }

    pub fn add_root(&mut self, node: TreeNode) -> Index {
        let idx = self.arena.insert(node);
        self.roots.push(idx);
        idx
    }

    pub fn add_marriage(&mut self, owner: Index, spouse: Option<Index>, children: Vec<Index>) {
        if let Some(node) = self.arena.get_mut(owner) {
            node.marriages.push(Marriage::new(spouse, children));
        }
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.roots.iter().map(|&idx| self.arena.node(idx))
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Single-rooted family tree, the result of a successful seed.
#[derive(Debug)]
pub struct FamilyTree {
    arena: NodeArena,
    root: Index,
}

impl FamilyTree {
    pub(crate) fn new(arena: NodeArena, root: Index) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode {
        self.arena.node(self.root)
    }

    pub fn node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// First node with `id` in pre-order.
    pub fn find(&self, id: MemberId) -> Option<&TreeNode> {
        self.iter().map(|(_, node)| node).find(|node| node.id == id)
    }

    /// Pre-order walk: a node, then per marriage its spouse and the children's subtrees.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of nodes reachable from the root, spouses included.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of generations below and including the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        match self.arena.get(idx) {
            Some(node) => {
                1 + node
                    .marriages
                    .iter()
                    .flat_map(|m| m.children.iter())
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    pub(crate) fn arena(&self) -> &NodeArena {
        &self.arena
    }
}

pub struct TreeIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current) {
                // Push in reverse for left-to-right traversal
                for marriage in node.marriages.iter().rev() {
                    self.stack.extend(marriage.children.iter().rev());
                    self.stack.extend(marriage.spouse);
                }
                return Some((current, node));
            }
        }
        None
    }
}
