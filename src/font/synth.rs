//! Approximate, category-driven glyph metrics used by every font family as a fallback for any
//! codepoint that has no explicit entry in that family's override table.
//!
//! None of the three families (§4.1) parse a real font file — font-file discovery and glyph
//! rasterization are out of scope (§1) — so there is no outline to measure. Rather than hand-type
//! one metrics entry per Unicode codepoint, ordinary letters/digits/punctuation get a plausible
//! ink box derived from their Unicode category, matching the handful of constants Computer Modern
//! and STIX actually use (x-height ≈ 0.45em, cap-height/ascender ≈ 0.7em, typical descent ≈ 0.2em).
//! All values are in em units (1.0 = the current font size); [`crate::font::Fonts::get_metrics`]
//! applies the `fontsize * dpi / 72` scale on top.

use crate::dimensions::Unit;
use crate::font::Metrics;

const DESCENDERS: &str = "gjpqy";

/// Build a [`Metrics`] record whose depth works out to `depth_em` given how
/// [`crate::node::CharNode::depth`] derives depth from `iceberg` and `height`
/// (`depth = iceberg - height`, so `height` is solved backwards from the desired depth).
fn build(width_em: f64, advance_em: f64, iceberg_em: f64, depth_em: f64, slanted: bool) -> Metrics {
    Metrics {
        advance: Unit::new(advance_em),
        width: Unit::new(width_em),
        height: Unit::new(iceberg_em - depth_em),
        xmin: Unit::ZERO,
        xmax: Unit::new(width_em),
        ymin: Unit::new(-depth_em),
        ymax: Unit::new(iceberg_em),
        iceberg: Unit::new(iceberg_em),
        slanted,
    }
}

/// A representative ink box for `codepoint`, drawn in italic (`slanted`) or upright style.
pub fn approximate_metrics(codepoint: char, slanted: bool) -> Metrics {
    if codepoint == ' ' {
        return build(0.0, 0.25, 0.0, 0.0, false);
    }

    if codepoint.is_ascii_digit() {
        return build(0.5, 0.58, 0.7, 0.0, slanted);
    }

    if codepoint.is_ascii_uppercase() {
        let width = if "MW".contains(codepoint) { 0.8 } else { 0.62 };
        return build(width, width + 0.08, 0.7, 0.0, slanted);
    }

    if codepoint.is_ascii_lowercase() {
        let narrow = "ilj.,:;'".contains(codepoint);
        let width = if narrow { 0.25 } else { 0.48 };
        let ascender = "bdfhklt".contains(codepoint);
        let iceberg = if ascender { 0.7 } else { 0.45 };
        let depth = if DESCENDERS.contains(codepoint) { 0.2 } else { 0.0 };
        return build(width, width + 0.06, iceberg, depth, slanted);
    }

    // Greek letters: classify by descender the same way as Latin lowercase.
    if ('\u{03B1}'..='\u{03C9}').contains(&codepoint) {
        let depth = if "βγζξφ".contains(codepoint) { 0.2 } else { 0.0 };
        return build(0.5, 0.58, 0.55, depth, slanted);
    }
    if ('\u{0391}'..='\u{03A9}').contains(&codepoint) {
        return build(0.65, 0.73, 0.7, 0.0, slanted);
    }

    match crate::tables::classify(codepoint) {
        crate::font::SymbolClass::BinaryOperator | crate::font::SymbolClass::Relation => {
            build(0.6, 0.72, 0.4, 0.05, false)
        }
        crate::font::SymbolClass::Open | crate::font::SymbolClass::Close => {
            build(0.35, 0.4, 0.7, 0.2, false)
        }
        crate::font::SymbolClass::Punctuation => build(0.2, 0.28, 0.1, 0.05, false),
        crate::font::SymbolClass::LargeOp => build(0.9, 1.0, 0.75, 0.25, false),
        crate::font::SymbolClass::Ordinary => build(0.5, 0.58, 0.45, 0.0, slanted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descender_produces_positive_depth() {
        let m = approximate_metrics('g', true);
        assert!((m.iceberg - m.height).value() > 0.0);
    }

    #[test]
    fn space_has_zero_width_but_positive_advance() {
        let m = approximate_metrics(' ', false);
        assert_eq!(m.width, Unit::ZERO);
        assert!(m.advance.value() > 0.0);
    }
}
