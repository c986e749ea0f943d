//! Intrinsic-size measurement.
//!
//! Post-order pass computing the content-driven size of every node below a root.
//! The arranger reads the result for `FitContent` axes.

use rustc_hash::FxHashMap;

use crate::config::LayoutSettings;
use crate::id::NodeId;
use crate::math::{Axis, Dimensions};
use crate::tree::ElementTree;

/// Content size per node, rebuilt on every pass over a root.
pub(crate) type IntrinsicCache = FxHashMap<NodeId, Dimensions>;

pub(crate) struct Measurer<'a> {
    tree: &'a ElementTree,
    settings: &'a LayoutSettings,
    cache: &'a mut IntrinsicCache,
    pub(crate) depth_exceeded: bool,
}

impl<'a> Measurer<'a> {
    pub(crate) fn new(
        tree: &'a ElementTree,
        settings: &'a LayoutSettings,
        cache: &'a mut IntrinsicCache,
    ) -> Self {
        Self {
            tree,
            settings,
            cache,
            depth_exceeded: false,
        }
    }

    /// Measures `node` and every visible descendant, children before parents.
    pub(crate) fn measure(&mut self, node: NodeId, depth: usize) -> Dimensions {
        if depth > self.settings.max_depth {
            self.depth_exceeded = true;
            return Dimensions::ZERO;
        }

        let tree = self.tree;
        let padding = tree.padding(node);
        let flex = tree.flex(node).copied();

        let mut count = 0usize;
        let mut sum = Dimensions::ZERO;
        let mut max = Dimensions::ZERO;

        for &child in tree.children(node) {
            if tree.is_hidden(child) || tree.is_root(child) {
                continue;
            }
            let Some(rect) = tree.rect(child) else {
                tracing::trace!(?child, "no rect data, skipped in measurement");
                continue;
            };
            let child_content = self.measure(child, depth + 1);
            // Overlays are measured for their own placement but never size the parent.
            if tree.is_overlay(child) {
                continue;
            }

            // Fill and Percentage have no parent extent yet and contribute zero
            // (after the child's own min/max clamp).
            let width = rect.resolve(Axis::X, 0.0, child_content, None);
            let height = rect.resolve(Axis::Y, 0.0, child_content, None);

            count += 1;
            sum.width += width;
            sum.height += height;
            max.width = max.width.max(width);
            max.height = max.height.max(height);
        }

        let content = match flex {
            Some(flex) => {
                let main_axis = flex.direction.main_axis();
                let cross_axis = main_axis.cross();
                let gaps = flex.spacing * count.saturating_sub(1) as f32;
                Dimensions::from_axes(
                    main_axis,
                    sum.along(main_axis) + gaps + padding.sum(main_axis),
                    max.along(cross_axis) + padding.sum(cross_axis),
                )
            }
            None => Dimensions::new(
                max.width + padding.sum(Axis::X),
                max.height + padding.sum(Axis::Y),
            ),
        };

        self.cache.insert(node, content);
        content
    }
}
