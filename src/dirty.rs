//! Dirty tracking.
//!
//! Mutators set a per-node dirty marker; the root driver maps every marked node to
//! its layout root, re-walks those roots and clears the marker on each node it
//! actually wrote bounds for.

use rustc_hash::FxHashSet;

use crate::id::NodeId;
use crate::tree::{ElementTree, NodeFlags};

/// Root driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutState {
    /// No pending work.
    #[default]
    Clean,
    /// At least one root or marked subtree needs recomputing.
    Dirty,
}

impl ElementTree {
    /// Flags `node` for recomputation on the next update. Unknown nodes are ignored.
    pub fn mark_dirty(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.flags.insert(NodeFlags::DIRTY);
            self.pending = true;
        }
    }

    #[inline]
    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.flags(node).contains(NodeFlags::DIRTY)
    }

    /// `Dirty` while any node has been marked since the last update.
    pub fn state(&self) -> LayoutState {
        if self.pending {
            LayoutState::Dirty
        } else {
            LayoutState::Clean
        }
    }

    /// Every node currently carrying the dirty marker.
    pub fn dirty_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.flags.contains(NodeFlags::DIRTY))
            .map(|(id, _)| id)
    }

    /// The nearest root-tagged node at or above `node`.
    pub fn layout_root(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.is_root(id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// True when `node` or any of its ancestors is hidden.
    pub fn is_hidden_in_tree(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.is_hidden(id) {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Layout roots owning at least one dirty node.
    ///
    /// Marked nodes inside hidden subtrees are not counted: they cannot change
    /// anything visible, and un-hiding marks the toggled node itself.
    pub(crate) fn dirty_roots(&self) -> FxHashSet<NodeId> {
        self.dirty_nodes()
            .filter(|&node| !self.is_hidden_in_tree(node))
            .filter_map(|node| self.layout_root(node))
            .collect()
    }

    #[inline]
    pub(crate) fn clear_dirty(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.flags.remove(NodeFlags::DIRTY);
        }
    }

    /// Clears the marker on `node` and every descendant.
    pub(crate) fn clear_dirty_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.get_mut(current) {
                data.flags.remove(NodeFlags::DIRTY);
                stack.extend(data.children.iter().copied());
            }
        }
    }

    /// Called by the root driver once its walk is complete.
    #[inline]
    pub(crate) fn settle(&mut self) {
        self.pending = false;
    }
}
