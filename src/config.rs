//! Configuration for the layout engine

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::EPSILON;

const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables read by [`LayoutEngine`](crate::engine::LayoutEngine) on every update.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutSettings {
    /// Nodes deeper than this below their root are neither measured nor arranged.
    pub max_depth: usize,

    /// Round written bounds to whole pixels.
    pub round_to_pixels: bool,

    /// Tolerance for point-anchor detection and wrap threshold comparisons.
    pub epsilon: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            round_to_pixels: false,
            epsilon: EPSILON,
        }
    }
}

impl LayoutSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_pixel_rounding(mut self, round_to_pixels: bool) -> Self {
        self.round_to_pixels = round_to_pixels;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = LayoutSettings::default();
        assert_eq!(settings.max_depth, 256);
        assert!(!settings.round_to_pixels);
        assert_eq!(settings.epsilon, 0.01);
    }

    #[test]
    fn test_builder_pattern() {
        let settings = LayoutSettings::new()
            .with_max_depth(8)
            .with_pixel_rounding(true);
        assert_eq!(settings.max_depth, 8);
        assert!(settings.round_to_pixels);
    }
}
