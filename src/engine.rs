//! Root driver of the layout engine.
//!
//! Each update walks every visible root that needs work: a post-order measurement
//! pass over its subtree, then a pre-order arrangement pass that writes bounds,
//! starting from the screen rectangle.

use rustc_hash::FxHashSet;

use crate::anchor::resolve_anchored;
use crate::config::LayoutSettings;
use crate::dirty::LayoutState;
use crate::flex::{arrange_flex, FlexItem};
use crate::id::NodeId;
use crate::layout::Rect;
use crate::measure::{IntrinsicCache, Measurer};
use crate::math::{BoundingBox, Dimensions};
use crate::tree::ElementTree;

/// Counters describing what a single [`LayoutEngine::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Roots that were measured and arranged.
    pub roots_processed: usize,
    /// Roots selected for work but skipped because they are hidden or lack rect data.
    pub roots_skipped: usize,
    /// Nodes whose bounds were written.
    pub nodes_arranged: usize,
}

/// Per-frame layout driver. Holds the screen size and settings; the element tree is
/// passed in on every update.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    screen: Dimensions,
    settings: LayoutSettings,
    full_rewalk: bool,
    intrinsic: IntrinsicCache,
    frame: u64,
}

impl LayoutEngine {
    pub fn new(screen: Dimensions) -> Self {
        Self::with_settings(screen, LayoutSettings::default())
    }

    pub fn with_settings(screen: Dimensions, settings: LayoutSettings) -> Self {
        Self {
            screen,
            settings,
            full_rewalk: true,
            intrinsic: IntrinsicCache::default(),
            frame: 0,
        }
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn screen_size(&self) -> Dimensions {
        self.screen
    }

    /// Sets the rectangle every root is laid out against. A change re-walks all roots.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        let screen = Dimensions::new(width, height);
        if screen != self.screen {
            self.screen = screen;
            self.full_rewalk = true;
        }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: LayoutSettings) {
        self.settings = settings;
        self.full_rewalk = true;
    }

    /// Forces every visible root to be re-walked on the next update.
    pub fn invalidate_all(&mut self) {
        self.full_rewalk = true;
    }

    /// Number of updates run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// `Dirty` while the tree has marked nodes or a full re-walk is pending.
    pub fn state(&self, tree: &ElementTree) -> LayoutState {
        if self.full_rewalk {
            LayoutState::Dirty
        } else {
            tree.state()
        }
    }

    /// Content size measured for `node` the last time its root was processed.
    pub fn intrinsic_size(&self, node: NodeId) -> Option<Dimensions> {
        self.intrinsic.get(&node).copied()
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Recomputes bounds for every visible root that has pending work.
    ///
    /// Never fails: nodes without rect data, hidden subtrees and degenerate
    /// containers are skipped.
    pub fn update(&mut self, tree: &mut ElementTree, delta_time: f32) -> UpdateSummary {
        self.frame += 1;
        let span = tracing::debug_span!("layout_update", frame = self.frame, delta_time);
        let _enter = span.enter();

        let mut summary = UpdateSummary::default();
        if self.state(tree) == LayoutState::Clean {
            tracing::trace!("layout clean, nothing to do");
            return summary;
        }

        let full = self.full_rewalk;
        let selected: FxHashSet<NodeId> = if full {
            FxHashSet::default()
        } else {
            tree.dirty_roots()
        };
        let roots: Vec<NodeId> = tree
            .roots()
            .filter(|root| full || selected.contains(root))
            .collect();

        if full {
            self.intrinsic.clear();
        } else {
            self.intrinsic.retain(|node, _| tree.contains(*node));
        }

        for root in roots {
            if tree.is_hidden_in_tree(root) {
                tracing::debug!(?root, "hidden root skipped");
                summary.roots_skipped += 1;
                continue;
            }
            let Some(rect) = tree.rect(root).copied() else {
                tracing::debug!(?root, "root without rect data skipped");
                summary.roots_skipped += 1;
                continue;
            };
            summary.nodes_arranged += self.layout_root(tree, root, &rect);
            summary.roots_processed += 1;
        }

        self.full_rewalk = false;
        tree.settle();
        tracing::debug!(
            roots = summary.roots_processed,
            skipped = summary.roots_skipped,
            nodes = summary.nodes_arranged,
            "layout updated"
        );
        summary
    }

    fn layout_root(&mut self, tree: &mut ElementTree, root: NodeId, rect: &Rect) -> usize {
        let mut measurer = Measurer::new(tree, &self.settings, &mut self.intrinsic);
        measurer.measure(root, 0);
        let mut depth_exceeded = measurer.depth_exceeded;

        let screen = BoundingBox::new(0.0, 0.0, self.screen.width, self.screen.height);
        let intrinsic = self.intrinsic.get(&root).copied().unwrap_or_default();
        let bounds = resolve_anchored(rect, screen, intrinsic, self.settings.epsilon);

        let mut arranger = Arranger {
            tree,
            intrinsic: &self.intrinsic,
            settings: &self.settings,
            arranged: 0,
            depth_exceeded: false,
        };
        arranger.place(root, bounds, i32::from(rect.local_z_index), 0);
        depth_exceeded |= arranger.depth_exceeded;

        if depth_exceeded {
            tracing::warn!(
                ?root,
                max_depth = self.settings.max_depth,
                "layout depth limit exceeded, deeper nodes skipped"
            );
        }
        arranger.arranged
    }
}

/// Pre-order placement pass over one root.
struct Arranger<'a> {
    tree: &'a mut ElementTree,
    intrinsic: &'a IntrinsicCache,
    settings: &'a LayoutSettings,
    arranged: usize,
    depth_exceeded: bool,
}

impl Arranger<'_> {
    fn intrinsic_of(&self, node: NodeId) -> Dimensions {
        self.intrinsic.get(&node).copied().unwrap_or_default()
    }

    /// Writes `bounds` for `node`, then places and recurses into its children.
    fn place(&mut self, node: NodeId, bounds: BoundingBox, z_index: i32, depth: usize) {
        if depth > self.settings.max_depth {
            // Deeper nodes keep their old bounds and lose their markers.
            self.depth_exceeded = true;
            self.tree.clear_dirty_subtree(node);
            return;
        }

        let bounds = if self.settings.round_to_pixels {
            bounds.snapped()
        } else {
            bounds
        };
        self.tree.write_layout(node, bounds, z_index);
        self.tree.clear_dirty(node);
        self.arranged += 1;

        let content = bounds.inset(self.tree.padding(node));
        let flex = self.tree.flex(node).copied();
        let epsilon = self.settings.epsilon;

        let mut hidden = Vec::new();
        let mut flow: Vec<(NodeId, Rect)> = Vec::new();
        let mut placements: Vec<(NodeId, BoundingBox)> = Vec::new();
        for &child in self.tree.children(node) {
            // Nested roots get their own pass against the screen.
            if self.tree.is_root(child) {
                continue;
            }
            if self.tree.is_hidden(child) {
                hidden.push(child);
                continue;
            }
            let Some(rect) = self.tree.rect(child) else {
                tracing::trace!(?child, "no rect data, skipped in arrangement");
                continue;
            };
            if flex.is_some() && !self.tree.is_overlay(child) {
                flow.push((child, *rect));
            } else {
                let intrinsic = self.intrinsic_of(child);
                placements.push((child, resolve_anchored(rect, content, intrinsic, epsilon)));
            }
        }

        for child in hidden {
            self.tree.collapse_bounds(child);
            self.tree.clear_dirty(child);
        }

        if let Some(flex) = flex {
            let items: Vec<FlexItem<'_>> = flow
                .iter()
                .map(|(child, rect)| FlexItem {
                    rect,
                    intrinsic: self.intrinsic_of(*child),
                })
                .collect();
            let boxes = arrange_flex(&flex, content, &items, epsilon);
            placements.extend(flow.iter().map(|(child, _)| *child).zip(boxes));
        }

        for (child, child_bounds) in placements {
            let local = self
                .tree
                .rect(child)
                .map(|rect| i32::from(rect.local_z_index))
                .unwrap_or(0);
            self.place(child, child_bounds, z_index + local, depth + 1);
        }
    }
}
