#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distribution of children along a flex container's main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum MainAxisAlign {
    #[default]
    Start,
    End,
    Center,
    /// First child on the leading edge, last on the trailing edge. A single child stays at the start.
    SpaceBetween,
    /// Equal space on both sides of every child.
    SpaceAround,
    /// Equal space before, between and after the children.
    SpaceEvenly,
}

/// Placement of a child within its line on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum CrossAxisAlign {
    #[default]
    Start,
    End,
    Center,
}

impl CrossAxisAlign {
    /// Offset of a child of size `child` inside a line of size `line`.
    #[inline]
    pub(crate) fn offset(self, line: f32, child: f32) -> f32 {
        match self {
            CrossAxisAlign::Start => 0.0,
            CrossAxisAlign::Center => (line - child) / 2.0,
            CrossAxisAlign::End => line - child,
        }
    }
}
