//! Single import for building and laying out trees.
//!
//! ```rust
//! use keen_layout::prelude::*;
//! ```

// Core types
pub use crate::config::LayoutSettings;
pub use crate::dirty::LayoutState;
pub use crate::engine::{LayoutEngine, UpdateSummary};
pub use crate::errors::TreeError;
pub use crate::id::NodeId;
pub use crate::snapshot::LayoutSnapshot;
pub use crate::tree::{ElementTree, NodeFlags};

// Layout components
pub use crate::layout::{FlexContainer, FlexDirection, Rect, SizeMode, Sizing, Style};
pub use crate::math::{Axis, BoundingBox, Dimensions, Edges, Vector2};

// Macros
pub use crate::{fill, fit, fixed, percent};

// Alignment, type only
pub use crate::align::{CrossAxisAlign, MainAxisAlign};
