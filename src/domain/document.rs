//! Owned, nested views of a [`FamilyTree`] for renderers and terminals.

use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use termtree::Tree;

use crate::domain::{FamilyTree, MemberId, NodeArena, TreeNode};

/// Serialisable tree node as handed to an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDocument {
    pub id: MemberId,
    pub name: String,
    pub depth_offset: i32,
    pub class: String,
    pub text_class: String,
    pub extra: Value,
    pub marriages: Vec<MarriageDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarriageDocument {
    pub spouse: Option<Box<NodeDocument>>,
    pub children: Vec<NodeDocument>,
}

impl NodeDocument {
    /// Depth-first search by id, spouses included.
    pub fn find(&self, id: MemberId) -> Option<&NodeDocument> {
        if self.id == id {
            return Some(self);
        }
        self.marriages.iter().find_map(|marriage| {
            marriage
                .spouse
                .as_deref()
                .filter(|spouse| spouse.id == id)
                .or_else(|| marriage.children.iter().find_map(|child| child.find(id)))
        })
    }

    /// Every id in the document, pre-order, spouses after their partner.
    pub fn ids(&self) -> Vec<MemberId> {
        let mut ids = vec![self.id];
        for marriage in &self.marriages {
            ids.extend(marriage.spouse.as_ref().map(|spouse| spouse.id));
            for child in &marriage.children {
                ids.extend(child.ids());
            }
        }
        ids
    }
}

impl FamilyTree {
    /// Owned nested copy of the whole tree.
    pub fn to_document(&self) -> NodeDocument {
        build_document(self.arena(), self.root())
    }

    /// Human-readable rendering: one line per person, one branch per marriage.
    pub fn to_termtree(&self) -> Tree<String> {
        build_termtree(self.arena(), self.root())
    }
}

impl fmt::Display for FamilyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_termtree())
    }
}

fn build_document(arena: &NodeArena, idx: Index) -> NodeDocument {
    let node = arena.node(idx);
    NodeDocument {
        id: node.id,
        name: node.name.clone(),
        depth_offset: node.depth_offset,
        class: node.class.clone(),
        text_class: node.text_class.clone(),
        extra: node.extra.clone(),
        marriages: node
            .marriages
            .iter()
            .map(|marriage| MarriageDocument {
                spouse: marriage
                    .spouse
                    .map(|spouse| Box::new(build_document(arena, spouse))),
                children: marriage
                    .children
                    .iter()
                    .map(|&child| build_document(arena, child))
                    .collect(),
            })
            .collect(),
    }
}

fn label(node: &TreeNode) -> String {
    format!("{} #{} (depth {})", node.name, node.id, node.depth_offset)
}

fn build_termtree(arena: &NodeArena, idx: Index) -> Tree<String> {
    let node = arena.node(idx);
    let marriages = node.marriages.iter().map(|marriage| {
        let spouse = marriage
            .spouse
            .map(|spouse| label(arena.node(spouse)))
            .unwrap_or_else(|| "unknown".to_string());
        let children = marriage
            .children
            .iter()
            .map(|&child| build_termtree(arena, child));
        Tree::new(format!("+ {}", spouse)).with_leaves(children)
    });
    Tree::new(label(node)).with_leaves(marriages)
}
