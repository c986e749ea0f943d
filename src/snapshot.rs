//! Read-only capture of computed layout, ordered for drawing.

use std::fmt;

use crate::config::LayoutSettings;
use crate::id::NodeId;
use crate::math::BoundingBox;
use crate::tree::ElementTree;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub id: NodeId,
    pub label: String,
    /// Distance from the node's layout root.
    pub depth: usize,
    pub bounds: BoundingBox,
    pub z_index: i32,
}

/// Visible nodes with their bounds, sorted back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl LayoutSnapshot {
    /// Walks every visible root in pre-order, then stable-sorts by effective z-index,
    /// so equal z keeps tree order.
    ///
    /// Nodes deeper than `settings.max_depth` are left out, matching what the engine
    /// arranges. Bounds are read as stored: roots changed since the last update report
    /// their previous layout.
    pub fn capture(tree: &ElementTree, settings: &LayoutSettings) -> Self {
        let mut entries = Vec::new();
        for root in tree.roots() {
            if tree.is_hidden_in_tree(root) {
                continue;
            }
            collect(tree, root, 0, settings.max_depth, &mut entries);
        }
        entries.sort_by_key(|entry| entry.z_index);
        Self { entries }
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Node ids back to front.
    pub fn draw_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    pub fn get(&self, node: NodeId) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|entry| entry.id == node)
    }
}

fn collect(
    tree: &ElementTree,
    node: NodeId,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<SnapshotEntry>,
) {
    if depth > max_depth {
        return;
    }
    let Some(rect) = tree.rect(node) else {
        return;
    };
    out.push(SnapshotEntry {
        id: node,
        label: tree.label(node).to_string(),
        depth,
        bounds: rect.bounds(),
        z_index: rect.z_index(),
    });
    for &child in tree.children(node) {
        if tree.is_hidden(child) || tree.is_root(child) {
            continue;
        }
        collect(tree, child, depth + 1, max_depth, out);
    }
}

impl fmt::Display for LayoutSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let b = entry.bounds;
            let name = if entry.label.is_empty() {
                format!("{:?}", entry.id)
            } else {
                entry.label.clone()
            };
            writeln!(
                f,
                "{:indent$}{} [{}, {}, {} x {}] z={}",
                "",
                name,
                b.x,
                b.y,
                b.width,
                b.height,
                entry.z_index,
                indent = entry.depth * 2
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LayoutEngine;
    use crate::layout::{FlexContainer, Rect};
    use crate::math::Dimensions;

    fn laid_out(tree: &mut ElementTree) {
        LayoutEngine::new(Dimensions::new(200.0, 100.0)).update(tree, 0.0);
    }

    #[test]
    fn captures_visible_nodes_in_tree_order() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        tree.set_flex(root, FlexContainer::horizontal()).unwrap();
        let a = tree.spawn_child(root, Rect::fixed(50.0, 50.0)).unwrap();
        let hidden = tree.spawn_child(root, Rect::fixed(50.0, 50.0)).unwrap();
        let b = tree.spawn_child(root, Rect::fixed(50.0, 50.0)).unwrap();
        tree.set_hidden(hidden, true).unwrap();
        laid_out(&mut tree);

        let snapshot = LayoutSnapshot::capture(&tree, &LayoutSettings::default());
        assert_eq!(snapshot.draw_order().collect::<Vec<_>>(), vec![root, a, b]);
        assert_eq!(snapshot.get(b).unwrap().bounds.x, 50.0);
        assert_eq!(snapshot.get(b).unwrap().depth, 1);
        assert!(snapshot.get(hidden).is_none());
    }

    #[test]
    fn higher_z_draws_later() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        let popup = tree.spawn_child(root, Rect::fixed(20.0, 20.0).z(5)).unwrap();
        let panel = tree.spawn_child(root, Rect::stretch()).unwrap();
        laid_out(&mut tree);

        let snapshot = LayoutSnapshot::capture(&tree, &LayoutSettings::default());
        assert_eq!(snapshot.draw_order().collect::<Vec<_>>(), vec![root, panel, popup]);
        assert_eq!(snapshot.get(popup).unwrap().z_index, 5);
    }

    #[test]
    fn hidden_roots_are_omitted() {
        let mut tree = ElementTree::new();
        let shown = tree.spawn_root(Rect::stretch());
        let hidden = tree.spawn_root(Rect::stretch());
        tree.set_hidden(hidden, true).unwrap();
        laid_out(&mut tree);

        let snapshot = LayoutSnapshot::capture(&tree, &LayoutSettings::default());
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(shown).is_some());
    }

    #[test]
    fn depth_limit_matches_engine() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        let panel = tree.spawn_child(root, Rect::stretch()).unwrap();
        let deep = tree.spawn_child(panel, Rect::stretch()).unwrap();

        let settings = LayoutSettings::new().with_max_depth(1);
        LayoutEngine::with_settings(Dimensions::new(200.0, 100.0), settings)
            .update(&mut tree, 0.0);

        let snapshot = LayoutSnapshot::capture(&tree, &settings);
        assert_eq!(snapshot.draw_order().collect::<Vec<_>>(), vec![root, panel]);
        assert!(snapshot.get(deep).is_none());
    }

    #[test]
    fn display_indents_by_depth() {
        let mut tree = ElementTree::new();
        let root = tree.spawn_root(Rect::stretch());
        tree.set_label(root, "root").unwrap();
        let child = tree.spawn_child(root, Rect::fixed(10.0, 20.0)).unwrap();
        tree.set_label(child, "child").unwrap();
        laid_out(&mut tree);

        let dump = LayoutSnapshot::capture(&tree, &LayoutSettings::default()).to_string();
        assert_eq!(dump, "root [0, 0, 200 x 100] z=0\n  child [0, 0, 10 x 20] z=0\n");
    }
}
