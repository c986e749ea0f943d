//! Retained layout engine for UI element trees.
//!
//! Nodes live in an [`ElementTree`] and carry a [`Rect`] (anchors, pivot, offsets,
//! size modes), optionally a [`FlexContainer`] that arranges their children along an
//! axis, and a [`Style`] with padding. Every frame the [`LayoutEngine`] re-walks the
//! roots with pending changes and writes a [`BoundingBox`] into each visible node.
//!
//! ```rust
//! use keen_layout::prelude::*;
//!
//! let mut tree = ElementTree::new();
//! let root = tree.spawn_root(Rect::stretch());
//! let dialog = tree.spawn_child(root, Rect::centered(200.0, 100.0)).unwrap();
//!
//! let mut engine = LayoutEngine::new(Dimensions::new(1280.0, 720.0));
//! engine.update(&mut tree, 0.016);
//!
//! assert_eq!(tree.bounds(dialog), Some(BoundingBox::new(540.0, 310.0, 200.0, 100.0)));
//! ```

pub mod align;
pub mod config;
pub mod dirty;
pub mod engine;
pub mod errors;
pub mod id;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod snapshot;
pub mod tree;

mod anchor;
mod flex;
mod measure;

pub use config::LayoutSettings;
pub use dirty::LayoutState;
pub use engine::{LayoutEngine, UpdateSummary};
pub use errors::TreeError;
pub use id::NodeId;
pub use layout::{FlexContainer, Rect, Sizing, Style};
pub use math::{BoundingBox, Dimensions, Edges, Vector2};
pub use snapshot::LayoutSnapshot;
pub use tree::ElementTree;
