//! Arena of explored moves.
//!
//! Every position reached from the setup position is a node whose parent is
//! the position before it. Nodes are addressed by index so the board can hold
//! the "current node" without borrowing the tree.

use super::error::BoardError;
use super::types::Move;

/// Index of a node in a [`MoveTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The setup position.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct MoveNode {
    pub(crate) mv: Move,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    /// Written by the search engine.
    pub(crate) value: i32,
}

/// Append-only move history tree (truncated when search plies unwind).
#[derive(Clone, Debug)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
}

impl MoveTree {
    pub(crate) fn new() -> Self {
        MoveTree {
            nodes: vec![MoveNode {
                mv: Move::empty(),
                parent: None,
                depth: 0,
                value: 0,
            }],
        }
    }

    pub(crate) fn push(&mut self, parent: NodeId, mv: Move) -> NodeId {
        let depth = self.nodes[parent.index()].depth + 1;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MoveNode {
            mv,
            parent: Some(parent),
            depth,
            value: 0,
        });
        id
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &MoveNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut MoveNode {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<(), BoardError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(BoardError::UnknownNode { id: id.index() })
        }
    }

    /// Number of nodes, usable as a truncation mark.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node created after `mark`. The root always survives.
    pub(crate) fn truncate(&mut self, mark: usize) {
        self.nodes.truncate(mark.max(1));
    }

    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    #[inline]
    #[must_use]
    pub fn depth(&self, id: NodeId) -> u32 {
        self.nodes.get(id.index()).map_or(0, |n| n.depth)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Move> {
        self.nodes.get(id.index()).map(|n| &n.mv)
    }

    /// Walk from `id` up to (but excluding) the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cursor = Some(id);
        std::iter::from_fn(move || {
            let here = cursor?;
            let node = self.nodes.get(here.index())?;
            node.parent?;
            cursor = node.parent;
            Some(here)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_tracks_depth_and_parent() {
        let mut tree = MoveTree::new();
        let a = tree.push(NodeId::ROOT, Move::empty());
        let b = tree.push(a, Move::empty());
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_truncate_keeps_root() {
        let mut tree = MoveTree::new();
        tree.push(NodeId::ROOT, Move::empty());
        tree.truncate(0);
        assert_eq!(tree.len(), 1);
        assert!(tree.check(NodeId(1)).is_err());
    }
}
