//! Element tree store.
//!
//! Nodes live in a slot-map arena addressed by [`NodeId`]. Layout data is kept in
//! one column per component type so a node may carry any subset of them. Marker
//! tags (hidden, root, overlay, dirty) are packed into [`NodeFlags`].

use bitflags::bitflags;
use slotmap::{SecondaryMap, SlotMap};

use crate::errors::TreeError;
use crate::id::{Label, NodeId};
use crate::layout::{FlexContainer, Rect, Style};
use crate::math::{Axis, BoundingBox, Dimensions, Edges};

bitflags! {
    /// Per-node marker tags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Removes the node and its subtree from measurement and arrangement.
        const HIDDEN = 1 << 0;
        /// Entry point for the root driver; laid out against the screen.
        const ROOT = 1 << 1;
        /// Menus and popovers: excluded from the parent's content measurement.
        const OVERLAY = 1 << 2;
        /// Bounds need recomputing on the next update.
        const DIRTY = 1 << 3;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
    pub(crate) label: Label,
}

impl Node {
    fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            flags: NodeFlags::DIRTY,
            label: Label::empty(),
        }
    }
}

/// Ownership graph of UI nodes plus their layout components.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) rects: SecondaryMap<NodeId, Rect>,
    pub(crate) flex: SecondaryMap<NodeId, FlexContainer>,
    pub(crate) styles: SecondaryMap<NodeId, Style>,
    /// Set whenever a node is marked dirty; cleared by the root driver.
    pub(crate) pending: bool,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a detached node without any components.
    pub fn spawn_empty(&mut self) -> NodeId {
        self.pending = true;
        self.nodes.insert(Node::new())
    }

    /// Creates a detached node with rect data.
    pub fn spawn(&mut self, rect: Rect) -> NodeId {
        let node = self.spawn_empty();
        self.rects.insert(node, rect);
        node
    }

    /// Creates a root-tagged node with rect data.
    pub fn spawn_root(&mut self, rect: Rect) -> NodeId {
        let node = self.spawn(rect);
        if let Some(data) = self.nodes.get_mut(node) {
            data.flags.insert(NodeFlags::ROOT);
        }
        node
    }

    /// Creates a node with rect data as the last child of `parent`.
    pub fn spawn_child(&mut self, parent: NodeId, rect: Rect) -> Result<NodeId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let node = self.spawn(rect);
        self.set_parent(node, Some(parent))?;
        Ok(node)
    }

    /// Removes `node` and its whole subtree.
    pub fn despawn(&mut self, node: NodeId) -> Result<(), TreeError> {
        let parent = self.nodes.get(node).ok_or(TreeError::NodeNotFound(node))?.parent;
        if let Some(parent) = parent {
            if let Some(parent_data) = self.nodes.get_mut(parent) {
                parent_data.children.retain(|&child| child != node);
            }
            self.mark_dirty(parent);
        }

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.remove(current) {
                stack.extend(data.children);
            }
            self.rects.remove(current);
            self.flex.remove(current);
            self.styles.remove(current);
        }
        Ok(())
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|data| data.parent)
    }

    /// Children in tree order. Empty for unknown nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    /// Moves `child` under `parent` (appended last), or detaches it when `parent` is `None`.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), TreeError> {
        let old_parent = self
            .nodes
            .get(child)
            .ok_or(TreeError::NodeNotFound(child))?
            .parent;

        if let Some(parent) = parent {
            if parent == child {
                return Err(TreeError::SelfParent(child));
            }
            if !self.contains(parent) {
                return Err(TreeError::NodeNotFound(parent));
            }
            let mut ancestor = Some(parent);
            while let Some(current) = ancestor {
                if current == child {
                    return Err(TreeError::CycleDetected { child, parent });
                }
                ancestor = self.parent(current);
            }
        }

        if let Some(old_parent) = old_parent {
            if let Some(data) = self.nodes.get_mut(old_parent) {
                data.children.retain(|&c| c != child);
            }
            self.mark_dirty(old_parent);
        }
        if let Some(parent) = parent {
            if let Some(data) = self.nodes.get_mut(parent) {
                data.children.push(child);
            }
            self.mark_dirty(parent);
        }
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = parent;
        }
        self.mark_dirty(child);
        Ok(())
    }

    /// Appends `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.set_parent(child, Some(parent))
    }

    /// All root-tagged nodes, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.flags.contains(NodeFlags::ROOT))
            .map(|(id, _)| id)
    }

    // ========================================================================
    // Markers
    // ========================================================================

    pub fn flags(&self, node: NodeId) -> NodeFlags {
        self.nodes
            .get(node)
            .map(|data| data.flags)
            .unwrap_or(NodeFlags::empty())
    }

    #[inline]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.flags(node).contains(NodeFlags::HIDDEN)
    }

    #[inline]
    pub fn is_root(&self, node: NodeId) -> bool {
        self.flags(node).contains(NodeFlags::ROOT)
    }

    #[inline]
    pub fn is_overlay(&self, node: NodeId) -> bool {
        self.flags(node).contains(NodeFlags::OVERLAY)
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) -> Result<(), TreeError> {
        self.set_flag(node, NodeFlags::HIDDEN, hidden)?;
        // Siblings shift when a flex child appears or disappears.
        if let Some(parent) = self.parent(node) {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    pub fn set_root(&mut self, node: NodeId, root: bool) -> Result<(), TreeError> {
        self.set_flag(node, NodeFlags::ROOT, root)?;
        if let Some(parent) = self.parent(node) {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    pub fn set_overlay(&mut self, node: NodeId, overlay: bool) -> Result<(), TreeError> {
        self.set_flag(node, NodeFlags::OVERLAY, overlay)?;
        if let Some(parent) = self.parent(node) {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    fn set_flag(&mut self, node: NodeId, flag: NodeFlags, value: bool) -> Result<(), TreeError> {
        let data = self.nodes.get_mut(node).ok_or(TreeError::NodeNotFound(node))?;
        data.flags.set(flag, value);
        self.mark_dirty(node);
        Ok(())
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn rect(&self, node: NodeId) -> Option<&Rect> {
        self.rects.get(node)
    }

    /// Mutable rect access. Marks the node dirty.
    pub fn rect_mut(&mut self, node: NodeId) -> Option<&mut Rect> {
        if self.rects.contains_key(node) {
            self.mark_dirty(node);
        }
        self.rects.get_mut(node)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> Result<(), TreeError> {
        if !self.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        self.rects.insert(node, rect);
        self.mark_dirty(node);
        Ok(())
    }

    pub fn remove_rect(&mut self, node: NodeId) -> Option<Rect> {
        let removed = self.rects.remove(node);
        if removed.is_some() {
            self.mark_dirty(node);
        }
        removed
    }

    pub fn flex(&self, node: NodeId) -> Option<&FlexContainer> {
        self.flex.get(node)
    }

    /// Mutable flex access. Marks the node dirty.
    pub fn flex_mut(&mut self, node: NodeId) -> Option<&mut FlexContainer> {
        if self.flex.contains_key(node) {
            self.mark_dirty(node);
        }
        self.flex.get_mut(node)
    }

    pub fn set_flex(&mut self, node: NodeId, flex: FlexContainer) -> Result<(), TreeError> {
        if !self.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        self.flex.insert(node, flex);
        self.mark_dirty(node);
        Ok(())
    }

    pub fn remove_flex(&mut self, node: NodeId) -> Option<FlexContainer> {
        let removed = self.flex.remove(node);
        if removed.is_some() {
            self.mark_dirty(node);
        }
        removed
    }

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.styles.get(node)
    }

    /// Mutable style access. Marks the node dirty.
    pub fn style_mut(&mut self, node: NodeId) -> Option<&mut Style> {
        if self.styles.contains_key(node) {
            self.mark_dirty(node);
        }
        self.styles.get_mut(node)
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<(), TreeError> {
        if !self.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        self.styles.insert(node, style);
        self.mark_dirty(node);
        Ok(())
    }

    /// Padding from the node's style, zero when it has none.
    #[inline]
    pub fn padding(&self, node: NodeId) -> Edges {
        self.styles
            .get(node)
            .map(|style| style.padding)
            .unwrap_or(Edges::ZERO)
    }

    pub fn label(&self, node: NodeId) -> &str {
        self.nodes
            .get(node)
            .map(|data| data.label.as_str())
            .unwrap_or("")
    }

    pub fn set_label(&mut self, node: NodeId, label: impl Into<Label>) -> Result<(), TreeError> {
        let data = self.nodes.get_mut(node).ok_or(TreeError::NodeNotFound(node))?;
        data.label = label.into();
        Ok(())
    }

    // ========================================================================
    // Layout output
    // ========================================================================

    /// Bounds from the most recent update that visited `node`.
    pub fn bounds(&self, node: NodeId) -> Option<BoundingBox> {
        self.rects.get(node).map(|rect| rect.bounds)
    }

    /// Writes an explicit size from an external mutator (drag-resize, maximize),
    /// clamped into the rect's min/max range.
    pub fn resize(&mut self, node: NodeId, width: f32, height: f32) -> Result<(), TreeError> {
        if !self.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        if let Some(rect) = self.rect_mut(node) {
            rect.size = Dimensions::new(rect.clamp(Axis::X, width), rect.clamp(Axis::Y, height));
        }
        Ok(())
    }

    /// Engine-side write of computed layout. Does not touch dirty markers.
    pub(crate) fn write_layout(&mut self, node: NodeId, bounds: BoundingBox, z_index: i32) {
        if let Some(rect) = self.rects.get_mut(node) {
            rect.bounds = bounds;
            rect.z_index = z_index;
        }
    }

    /// Zeroes the bounds of a hidden node; its subtree keeps stale values.
    pub(crate) fn collapse_bounds(&mut self, node: NodeId) {
        if let Some(rect) = self.rects.get_mut(node) {
            rect.bounds = BoundingBox::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_child_links_both_directions() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        let a = tree.spawn_child(root, Rect::fixed(10.0, 10.0)).unwrap();
        let b = tree.spawn_child(root, Rect::fixed(10.0, 10.0)).unwrap();

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert!(tree.is_root(root));
        assert!(!tree.is_root(a));
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn reparent_moves_child() {
        let mut tree = ElementTree::new();
        let first = tree.spawn(Rect::default());
        let second = tree.spawn(Rect::default());
        let child = tree.spawn_child(first, Rect::default()).unwrap();

        tree.set_parent(child, Some(second)).unwrap();
        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[child]);

        tree.set_parent(child, None).unwrap();
        assert!(tree.children(second).is_empty());
        assert_eq!(tree.parent(child), None);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut tree = ElementTree::new();
        let a = tree.spawn(Rect::default());
        let b = tree.spawn_child(a, Rect::default()).unwrap();
        let c = tree.spawn_child(b, Rect::default()).unwrap();

        assert_eq!(tree.set_parent(a, Some(a)), Err(TreeError::SelfParent(a)));
        assert_eq!(
            tree.set_parent(a, Some(c)),
            Err(TreeError::CycleDetected { child: a, parent: c })
        );
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn despawn_removes_subtree() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        let panel = tree.spawn_child(root, Rect::default()).unwrap();
        let leaf = tree.spawn_child(panel, Rect::default()).unwrap();
        tree.set_flex(panel, FlexContainer::vertical()).unwrap();

        tree.despawn(panel).unwrap();
        assert!(!tree.contains(panel));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert!(tree.flex(panel).is_none());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.despawn(panel), Err(TreeError::NodeNotFound(panel)));
    }

    #[test]
    fn resize_clamps_to_constraints() {
        let mut tree = ElementTree::new();
        let window = tree.spawn(
            Rect::fixed(300.0, 200.0)
                .min_size((100.0, 80.0))
                .max_size((800.0, 600.0)),
        );

        tree.resize(window, 20.0, 2000.0).unwrap();
        let rect = tree.rect(window).unwrap();
        assert_eq!(rect.size, Dimensions::new(100.0, 600.0));
    }

    fn settled(tree: &mut ElementTree) {
        let nodes: Vec<NodeId> = tree.nodes.keys().collect();
        for node in nodes {
            tree.clear_dirty(node);
        }
        tree.settle();
    }

    #[test]
    fn component_mutators_mark_dirty() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        tree.set_flex(root, FlexContainer::horizontal()).unwrap();
        tree.set_style(root, Style::default()).unwrap();
        let child = tree.spawn_child(root, Rect::fixed(10.0, 10.0)).unwrap();

        settled(&mut tree);
        tree.flex_mut(root).unwrap().spacing = 4.0;
        assert!(tree.is_dirty(root));

        settled(&mut tree);
        tree.style_mut(root).unwrap().padding = Edges::all(2.0);
        assert!(tree.is_dirty(root));

        settled(&mut tree);
        assert!(tree.remove_flex(root).is_some());
        assert!(tree.is_dirty(root));

        settled(&mut tree);
        assert!(tree.remove_flex(root).is_none());
        assert!(!tree.is_dirty(root));

        settled(&mut tree);
        assert!(tree.remove_rect(child).is_some());
        assert!(tree.is_dirty(child));
        assert!(!tree.is_dirty(root));
        assert_eq!(tree.state(), crate::dirty::LayoutState::Dirty);
    }

    #[test]
    fn set_overlay_marks_node_and_parent() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        let menu = tree.spawn_child(root, Rect::default()).unwrap();

        settled(&mut tree);
        tree.set_overlay(menu, true).unwrap();
        assert!(tree.is_dirty(menu));
        assert!(tree.is_dirty(root));
    }

    #[test]
    fn marker_toggles() {
        let mut tree = ElementTree::new();
        let node = tree.spawn(Rect::default());
        tree.set_hidden(node, true).unwrap();
        tree.set_overlay(node, true).unwrap();
        assert!(tree.is_hidden(node));
        assert!(tree.is_overlay(node));
        tree.set_hidden(node, false).unwrap();
        assert!(!tree.is_hidden(node));
        assert!(tree.flags(node).contains(NodeFlags::OVERLAY));
    }

    #[test]
    fn missing_components_read_as_none() {
        let mut tree = ElementTree::new();
        let node = tree.spawn_empty();
        assert!(tree.rect(node).is_none());
        assert!(tree.bounds(node).is_none());
        assert_eq!(tree.padding(node), Edges::ZERO);
        assert!(tree.rect_mut(node).is_none());
    }
}
