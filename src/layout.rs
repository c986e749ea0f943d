use crate::align::{CrossAxisAlign, MainAxisAlign};
use crate::math::{Axis, BoundingBox, Dimensions, Edges, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Defines how a node's size along one axis is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SizeMode {
    /// The size is taken from [`Rect::size`] as-is.
    #[default]
    Fixed,
    /// The node takes an equal share of its flex line's leftover main-axis space.
    Fill,
    /// [`Rect::size`] is a fraction (`0.0..=1.0`) of the parent's content box.
    Percentage,
    /// The size is measured from the node's children.
    FitContent,
}

/// A size mode paired with its value, for setting one axis of a [`Rect`] at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Sets a fixed width/height.
    Fixed(f32),
    /// Fills leftover space in the parent's flex line.
    Fill,
    /// Sets width/height as a fraction of the parent. Value should be between `0.0` and `1.0`.
    Percentage(f32),
    /// Measures the node from its children.
    FitContent,
}

impl From<Sizing> for (SizeMode, f32) {
    fn from(value: Sizing) -> Self {
        match value {
            Sizing::Fixed(size) => (SizeMode::Fixed, size),
            Sizing::Fill => (SizeMode::Fill, 0.0),
            Sizing::Percentage(fraction) => (SizeMode::Percentage, fraction),
            Sizing::FitContent => (SizeMode::FitContent, 0.0),
        }
    }
}

/// Placement and sizing data for one node.
///
/// Everything except the computed bounds and z-index is input written by widget
/// construction or external mutators. The engine only writes [`Rect::bounds`] and
/// [`Rect::z_index`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Fractional point on the parent's content box tied to the node's leading edges.
    pub anchor_min: Vector2,
    /// Fractional point on the parent's content box tied to the node's trailing edges.
    pub anchor_max: Vector2,
    /// Fractional origin inside the node used by point anchors.
    pub pivot: Vector2,
    /// Insets from the anchor rectangle. Point anchors only use `left` and `top`.
    pub offset: Edges,
    /// Explicit size; its meaning depends on the axis [`SizeMode`].
    pub size: Dimensions,
    pub width_mode: SizeMode,
    pub height_mode: SizeMode,
    /// Lower clamp applied to every resolved size.
    pub min_size: Dimensions,
    /// Upper clamp applied to every resolved size.
    pub max_size: Dimensions,
    /// Z-order relative to the parent.
    pub local_z_index: i16,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) bounds: BoundingBox,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) z_index: i32,
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            anchor_min: Vector2::ZERO,
            anchor_max: Vector2::ZERO,
            pivot: Vector2::ZERO,
            offset: Edges::ZERO,
            size: Dimensions::ZERO,
            width_mode: SizeMode::Fixed,
            height_mode: SizeMode::Fixed,
            min_size: Dimensions::ZERO,
            max_size: Dimensions::new(f32::MAX, f32::MAX),
            local_z_index: 0,
            bounds: BoundingBox::ZERO,
            z_index: 0,
        }
    }
}

impl Rect {
    pub fn new() -> Self {
        Self::default()
    }

    /// A top-left anchored node with a fixed size.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self::new().width(Sizing::Fixed(width)).height(Sizing::Fixed(height))
    }

    /// A node stretched over its parent's whole content box.
    pub fn stretch() -> Self {
        Self::new().anchors(Vector2::ZERO, Vector2::ONE)
    }

    /// A fixed-size node centered in its parent.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::fixed(width, height)
            .anchors(Vector2::HALF, Vector2::HALF)
            .pivot(Vector2::HALF)
    }

    #[inline]
    pub fn width(mut self, sizing: Sizing) -> Self {
        let (mode, value) = sizing.into();
        self.width_mode = mode;
        self.size.width = value;
        self
    }

    #[inline]
    pub fn height(mut self, sizing: Sizing) -> Self {
        let (mode, value) = sizing.into();
        self.height_mode = mode;
        self.size.height = value;
        self
    }

    #[inline]
    pub fn anchors(mut self, min: impl Into<Vector2>, max: impl Into<Vector2>) -> Self {
        self.anchor_min = min.into();
        self.anchor_max = max.into();
        self
    }

    #[inline]
    pub fn pivot(mut self, pivot: impl Into<Vector2>) -> Self {
        self.pivot = pivot.into();
        self
    }

    #[inline]
    pub fn offset(mut self, offset: impl Into<Edges>) -> Self {
        self.offset = offset.into();
        self
    }

    #[inline]
    pub fn min_size(mut self, min: impl Into<Dimensions>) -> Self {
        self.min_size = min.into();
        self
    }

    #[inline]
    pub fn max_size(mut self, max: impl Into<Dimensions>) -> Self {
        self.max_size = max.into();
        self
    }

    #[inline]
    pub fn z(mut self, local_z_index: i16) -> Self {
        self.local_z_index = local_z_index;
        self
    }

    /// Bounds written by the most recent layout pass that visited this node.
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Effective z-index: the sum of `local_z_index` along the ancestor chain.
    #[inline]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    #[inline]
    pub fn mode(&self, axis: Axis) -> SizeMode {
        match axis {
            Axis::X => self.width_mode,
            Axis::Y => self.height_mode,
        }
    }

    /// Clamps `size` into this node's `[min_size, max_size]` range on `axis`, never below zero.
    #[inline]
    pub fn clamp(&self, axis: Axis, size: f32) -> f32 {
        let min = self.min_size.along(axis);
        let max = self.max_size.along(axis);
        f32::min(f32::max(size, min), max).max(0.0)
    }

    /// Resolves the size on `axis` for every mode that does not need a distribution context.
    ///
    /// `parent_extent` is the parent's content-box extent on that axis, `intrinsic` the
    /// measured content size. `Fill` resolves to `fill_share`, or zero when there is none.
    pub fn resolve(
        &self,
        axis: Axis,
        parent_extent: f32,
        intrinsic: Dimensions,
        fill_share: Option<f32>,
    ) -> f32 {
        let size = match self.mode(axis) {
            SizeMode::Fixed => self.size.along(axis),
            SizeMode::Percentage => self.size.along(axis) * parent_extent,
            SizeMode::FitContent => intrinsic.along(axis),
            SizeMode::Fill => fill_share.unwrap_or(0.0),
        };
        self.clamp(axis, size)
    }
}

/// Defines the direction children flow in a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FlexDirection {
    /// Arranges children from left to right.
    #[default]
    Horizontal,
    /// Arranges children from top to bottom.
    Vertical,
}

impl FlexDirection {
    #[inline]
    pub fn main_axis(self) -> Axis {
        match self {
            FlexDirection::Horizontal => Axis::X,
            FlexDirection::Vertical => Axis::Y,
        }
    }
}

/// Marks a node as arranging its children by flex distribution instead of anchors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlexContainer {
    pub direction: FlexDirection,
    pub main_axis_align: MainAxisAlign,
    pub cross_axis_align: CrossAxisAlign,
    /// Gap between consecutive children on the main axis, and between wrapped lines.
    pub spacing: f32,
    pub wrap: bool,
    /// Visits children in reverse tree order before placement.
    pub reverse_order: bool,
}

impl FlexContainer {
    pub fn horizontal() -> Self {
        Self::default()
    }

    pub fn vertical() -> Self {
        Self {
            direction: FlexDirection::Vertical,
            ..Self::default()
        }
    }

    /// Returns a builder seeded with this container.
    pub fn builder(self) -> FlexBuilder {
        FlexBuilder { config: self }
    }
}

/// Builder for configuring flex container properties.
pub struct FlexBuilder {
    pub(crate) config: FlexContainer,
}

impl FlexBuilder {
    /// Sets the spacing between child elements.
    #[inline]
    pub fn spacing(&mut self, spacing: f32) -> &mut Self {
        self.config.spacing = spacing;
        self
    }

    /// Sets main and cross axis alignment.
    #[inline]
    pub fn align(&mut self, main: MainAxisAlign, cross: CrossAxisAlign) -> &mut Self {
        self.config.main_axis_align = main;
        self.config.cross_axis_align = cross;
        self
    }

    /// Sets the flow direction.
    #[inline]
    pub fn direction(&mut self, direction: FlexDirection) -> &mut Self {
        self.config.direction = direction;
        self
    }

    #[inline]
    pub fn wrap(&mut self, wrap: bool) -> &mut Self {
        self.config.wrap = wrap;
        self
    }

    #[inline]
    pub fn reverse(&mut self, reverse_order: bool) -> &mut Self {
        self.config.reverse_order = reverse_order;
        self
    }

    #[inline]
    pub fn end(&mut self) -> FlexContainer {
        self.config
    }
}

/// Optional per-node style consumed by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    pub padding: Edges,
}

impl Style {
    pub fn padded(padding: impl Into<Edges>) -> Self {
        Self {
            padding: padding.into(),
        }
    }
}

/// Shorthand macro for [`Sizing::Fixed`].
#[macro_export]
macro_rules! fixed {
    ($val:expr) => {
        $crate::layout::Sizing::Fixed($val)
    };
}

/// Shorthand macro for [`Sizing::Fill`].
#[macro_export]
macro_rules! fill {
    () => {
        $crate::layout::Sizing::Fill
    };
}

/// Shorthand macro for [`Sizing::FitContent`].
#[macro_export]
macro_rules! fit {
    () => {
        $crate::layout::Sizing::FitContent
    };
}

/// Shorthand macro for [`Sizing::Percentage`].
/// The value has to be in range `0.0..=1.0`.
#[macro_export]
macro_rules! percent {
    ($percent:expr) => {{
        const _: () = assert!(
            $percent >= 0.0 && $percent <= 1.0,
            "Percent value must be between 0.0 and 1.0 inclusive!"
        );
        $crate::layout::Sizing::Percentage($percent)
    }};
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sizing_macros() {
        assert!(matches!(fixed!(123.0), Sizing::Fixed(123.0)));
        assert!(matches!(fill!(), Sizing::Fill));
        assert!(matches!(fit!(), Sizing::FitContent));
        assert!(matches!(percent!(0.5), Sizing::Percentage(0.5)));
    }

    #[test]
    fn rect_builder_sets_modes_and_values() {
        let rect = Rect::new().width(percent!(0.25)).height(fit!());
        assert_eq!(rect.width_mode, SizeMode::Percentage);
        assert_eq!(rect.size.width, 0.25);
        assert_eq!(rect.height_mode, SizeMode::FitContent);
    }

    #[test]
    fn resolve_clamps_into_min_max() {
        let rect = Rect::fixed(500.0, 5.0)
            .min_size((0.0, 10.0))
            .max_size((200.0, f32::MAX));
        assert_eq!(rect.resolve(Axis::X, 0.0, Dimensions::ZERO, None), 200.0);
        assert_eq!(rect.resolve(Axis::Y, 0.0, Dimensions::ZERO, None), 10.0);
    }

    #[test]
    fn resolve_percentage_and_fill() {
        let rect = Rect::new().width(percent!(0.5)).height(fill!());
        assert_eq!(rect.resolve(Axis::X, 300.0, Dimensions::ZERO, None), 150.0);
        assert_eq!(rect.resolve(Axis::Y, 300.0, Dimensions::ZERO, None), 0.0);
        assert_eq!(rect.resolve(Axis::Y, 300.0, Dimensions::ZERO, Some(42.0)), 42.0);
    }

    #[test]
    fn resolve_never_negative() {
        let rect = Rect::fixed(-20.0, 10.0);
        assert_eq!(rect.resolve(Axis::X, 0.0, Dimensions::ZERO, None), 0.0);
    }

    #[test]
    fn flex_builder() {
        let flex = FlexContainer::vertical()
            .builder()
            .spacing(8.0)
            .align(MainAxisAlign::Center, CrossAxisAlign::End)
            .wrap(true)
            .end();
        assert_eq!(flex.direction, FlexDirection::Vertical);
        assert_eq!(flex.spacing, 8.0);
        assert_eq!(flex.main_axis_align, MainAxisAlign::Center);
        assert_eq!(flex.cross_axis_align, CrossAxisAlign::End);
        assert!(flex.wrap);
        assert!(!flex.reverse_order);
    }
}
