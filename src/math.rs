#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tolerance for float comparisons in the layout passes.
pub const EPSILON: f32 = 0.01;

/// Returns true when `left` and `right` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(left: f32, right: f32) -> bool {
    approx_eq_eps(left, right, EPSILON)
}

#[inline]
pub(crate) fn approx_eq_eps(left: f32, right: f32, epsilon: f32) -> bool {
    let diff = left - right;
    diff < epsilon && diff > -epsilon
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const HALF: Self = Self::new(0.5, 0.5);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Builds dimensions from a main-axis and cross-axis extent.
    #[inline]
    pub fn from_axes(main_axis: Axis, main: f32, cross: f32) -> Self {
        match main_axis {
            Axis::X => Self::new(main, cross),
            Axis::Y => Self::new(cross, main),
        }
    }
}

impl From<(f32, f32)> for Dimensions {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Leading edge along `axis`.
    #[inline]
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        self.size().along(axis)
    }

    /// Shrinks the box by `edges`. Width and height never go negative.
    pub fn inset(&self, edges: Edges) -> Self {
        Self {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.left - edges.right).max(0.0),
            height: (self.height - edges.top - edges.bottom).max(0.0),
        }
    }

    /// Rounds the edges to whole pixels, deriving the size from the rounded edges.
    pub fn snapped(&self) -> Self {
        let x = self.x.round();
        let y = self.y.round();
        Self {
            x,
            y,
            width: (self.x + self.width).round() - x,
            height: (self.y + self.height).round() - y,
        }
    }

    /// Epsilon-tolerant equality on all four components.
    pub fn approx_eq(&self, other: &BoundingBox) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.width, other.width)
            && approx_eq(self.height, other.height)
    }
}

/// Four-sided edge values, used for padding and anchor offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edges {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Edges {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Sets the same value for all sides.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sets left and right. Top and bottom are set to `0`.
    pub const fn horizontal(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }

    /// Sets top and bottom. Left and right are set to `0`.
    pub const fn vertical(value: f32) -> Self {
        Self::new(0.0, value, 0.0, value)
    }

    /// Leading edge along `axis` (left or top).
    #[inline]
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Trailing edge along `axis` (right or bottom).
    #[inline]
    pub fn end(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Sum of both edges along `axis`.
    #[inline]
    pub fn sum(&self, axis: Axis) -> f32 {
        self.start(axis) + self.end(axis)
    }
}

impl From<f32> for Edges {
    fn from(value: f32) -> Self {
        Self::all(value)
    }
}

impl From<(f32, f32, f32, f32)> for Edges {
    /// Creates edges from a tuple in CSS order: (top, right, bottom, left).
    fn from((top, right, bottom, left): (f32, f32, f32, f32)) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

#[cfg(feature = "macroquad")]
mod macroquad_interop {
    use super::{BoundingBox, Vector2};

    impl From<BoundingBox> for macroquad::math::Rect {
        fn from(value: BoundingBox) -> Self {
            macroquad::math::Rect::new(value.x, value.y, value.width, value.height)
        }
    }

    impl From<Vector2> for macroquad::math::Vec2 {
        fn from(value: Vector2) -> Self {
            macroquad::math::Vec2::new(value.x, value.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_clamps_at_zero() {
        let bbox = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        let inner = bbox.inset(Edges::all(15.0));
        assert_eq!(inner.x, 25.0);
        assert_eq!(inner.y, 25.0);
        assert_eq!(inner.width, 0.0);
        assert_eq!(inner.height, 0.0);
    }

    #[test]
    fn edges_from_css_tuple() {
        let edges = Edges::from((1.0, 2.0, 3.0, 4.0));
        assert_eq!(edges.top, 1.0);
        assert_eq!(edges.right, 2.0);
        assert_eq!(edges.bottom, 3.0);
        assert_eq!(edges.left, 4.0);
        assert_eq!(edges.sum(Axis::X), 6.0);
        assert_eq!(edges.sum(Axis::Y), 4.0);
    }

    #[test]
    fn snapped_keeps_right_edge() {
        let bbox = BoundingBox::new(0.4, 0.6, 10.4, 10.0).snapped();
        assert_eq!(bbox.x, 0.0);
        assert_eq!(bbox.y, 1.0);
        assert_eq!(bbox.width, 11.0);
        assert_eq!(bbox.height, 10.0);
    }

    #[test]
    fn approx_eq_tolerates_sub_epsilon_drift() {
        assert!(approx_eq(1.0, 1.005));
        assert!(!approx_eq(1.0, 1.02));
    }
}
