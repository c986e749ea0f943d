//! Anchor/pivot placement for children of containers without a flex descriptor.

use crate::layout::Rect;
use crate::math::{approx_eq_eps, Axis, BoundingBox, Dimensions};

/// Places `rect` inside the parent's content box.
///
/// Per axis, equal anchors form a point: the size comes from the size mode (Fill has
/// no distribution context here and resolves to zero) and the pivot is aligned on the
/// anchor point. Distinct anchors stretch the node between them minus the offsets.
pub(crate) fn resolve_anchored(
    rect: &Rect,
    content: BoundingBox,
    intrinsic: Dimensions,
    epsilon: f32,
) -> BoundingBox {
    let (x, width) = resolve_axis(rect, Axis::X, content, intrinsic, epsilon);
    let (y, height) = resolve_axis(rect, Axis::Y, content, intrinsic, epsilon);
    BoundingBox::new(x, y, width, height)
}

fn resolve_axis(
    rect: &Rect,
    axis: Axis,
    content: BoundingBox,
    intrinsic: Dimensions,
    epsilon: f32,
) -> (f32, f32) {
    let origin = content.start(axis);
    let extent = content.extent(axis);
    let anchor_min = rect.anchor_min.along(axis);
    let anchor_max = rect.anchor_max.along(axis);
    let low = origin + anchor_min * extent;
    let high = origin + anchor_max * extent;
    let offset_start = rect.offset.start(axis);

    if approx_eq_eps(anchor_min, anchor_max, epsilon) {
        let size = rect.resolve(axis, extent, intrinsic, None);
        let position = low - rect.pivot.along(axis) * size + offset_start;
        (position, size)
    } else {
        let size = rect.clamp(axis, high - low - offset_start - rect.offset.end(axis));
        (low + offset_start, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Sizing;
    use crate::math::{Edges, Vector2, EPSILON};

    fn place(rect: &Rect, content: BoundingBox) -> BoundingBox {
        resolve_anchored(rect, content, Dimensions::ZERO, EPSILON)
    }

    #[test]
    fn centered_fixed_child() {
        let screen = BoundingBox::new(0.0, 0.0, 1280.0, 720.0);
        let bounds = place(&Rect::centered(200.0, 100.0), screen);
        assert_eq!(bounds, BoundingBox::new(540.0, 310.0, 200.0, 100.0));
    }

    #[test]
    fn centering_holds_for_offset_parents() {
        for (parent, size) in [
            (BoundingBox::new(10.0, 20.0, 300.0, 200.0), (50.0, 40.0)),
            (BoundingBox::new(-5.0, 3.0, 33.0, 17.0), (11.0, 7.0)),
            (BoundingBox::new(0.0, 0.0, 10.0, 10.0), (40.0, 40.0)),
        ] {
            let bounds = place(&Rect::centered(size.0, size.1), parent);
            assert!(bounds.approx_eq(&BoundingBox::new(
                parent.x + (parent.width - size.0) / 2.0,
                parent.y + (parent.height - size.1) / 2.0,
                size.0,
                size.1,
            )));
        }
    }

    #[test]
    fn full_stretch_matches_parent() {
        for parent in [
            BoundingBox::new(0.0, 0.0, 0.0, 0.0),
            BoundingBox::new(12.0, 7.0, 100.0, 50.0),
            BoundingBox::new(0.0, 0.0, 1920.0, 1080.0),
        ] {
            assert_eq!(place(&Rect::stretch(), parent), parent);
        }
    }

    #[test]
    fn stretch_with_offsets() {
        let parent = BoundingBox::new(0.0, 0.0, 400.0, 300.0);
        let rect = Rect::stretch().offset(Edges::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(place(&rect, parent), BoundingBox::new(10.0, 20.0, 360.0, 240.0));
    }

    #[test]
    fn stretch_one_axis_point_other() {
        // Top bar: stretched horizontally, fixed height pinned to the top.
        let parent = BoundingBox::new(0.0, 0.0, 800.0, 600.0);
        let rect = Rect::fixed(0.0, 32.0).anchors((0.0, 0.0), (1.0, 0.0));
        assert_eq!(place(&rect, parent), BoundingBox::new(0.0, 0.0, 800.0, 32.0));
    }

    #[test]
    fn bottom_right_pivot_with_offset() {
        let parent = BoundingBox::new(0.0, 0.0, 800.0, 600.0);
        let rect = Rect::fixed(100.0, 50.0)
            .anchors(Vector2::ONE, Vector2::ONE)
            .pivot(Vector2::ONE)
            .offset(Edges::new(-8.0, -8.0, 0.0, 0.0));
        assert_eq!(place(&rect, parent), BoundingBox::new(692.0, 542.0, 100.0, 50.0));
    }

    #[test]
    fn point_anchor_modes() {
        let parent = BoundingBox::new(0.0, 0.0, 400.0, 200.0);
        let rect = Rect::new().width(Sizing::Percentage(0.25)).height(Sizing::Fill);
        assert_eq!(place(&rect, parent), BoundingBox::new(0.0, 0.0, 100.0, 0.0));

        let fit = Rect::new().width(Sizing::FitContent).height(Sizing::FitContent);
        let bounds = resolve_anchored(&fit, parent, Dimensions::new(64.0, 24.0), EPSILON);
        assert_eq!(bounds, BoundingBox::new(0.0, 0.0, 64.0, 24.0));
    }

    #[test]
    fn stretch_never_negative() {
        let parent = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
        let rect = Rect::stretch().offset(15.0);
        let bounds = place(&rect, parent);
        assert_eq!(bounds.width, 0.0);
        assert_eq!(bounds.height, 0.0);
    }
}
