//! Knuth-derived layout constants. Do not alter casually; these are load-bearing ratios.

/// Factor applied by [`crate::node::Node::shrink`] at each size level.
pub const SHRINK_FACTOR: f64 = 0.7;
/// `1 / SHRINK_FACTOR`, the factor applied by [`crate::node::Node::grow`].
pub const GROW_FACTOR: f64 = 1.0 / SHRINK_FACTOR;
/// Maximum size level; shrinking past this has no further visual effect.
pub const NUM_SIZE_LEVELS: u8 = 4;

/// Horizontal kern placed around a "spaced" symbol (binary operator, relation, arrow).
pub const SCRIPT_SPACE: f64 = 0.2;
/// Subscript drop below the nucleus baseline, in x-heights.
pub const SUBDROP: f64 = 0.3;
/// Minimum superscript shift-up, in x-heights.
pub const SUP1: f64 = 0.7;
/// Minimum subscript shift-down, in x-heights.
pub const SUB1: f64 = 0.0;
/// Italic-correction offset applied to a superscript when the nucleus is slanted.
pub const DELTA: f64 = 0.18;
