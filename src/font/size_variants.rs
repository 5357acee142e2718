//! A reusable table of pre-sized delimiter/radical/wide-accent variants, shared by
//! [`crate::font::bakoma::Bakoma`] and [`crate::font::stix::Stix`] (§4.1 "get_sized_alternatives").
//!
//! Grounded on `BakomaFonts._size_alternatives` / `get_sized_alternatives_for_symbol` in the
//! original implementation, which both `BakomaFonts` and (through `UnicodeFonts`) `StixFonts`
//! rely on the same shape of table for. Since this crate has no "ex" font file to draw the larger
//! variants from, each level is synthesized as a Private-Use-Area codepoint whose metrics are the
//! base entry scaled by a fixed growth factor — this is the one spot where the two families
//! genuinely share logic rather than just similar shape, so it is factored out instead of copied.

use crate::dimensions::Unit;
use crate::font::Metrics;

/// The base (unscaled) entry for one sizeable symbol.
#[derive(Debug, Clone, Copy)]
pub struct DelimEntry {
    pub symbol: char,
    pub width_em: f64,
    pub height_em: f64,
    pub depth_em: f64,
}

/// A family's full set of sizeable symbols, each expanded into `levels` synthetic larger variants.
pub struct SizeVariantTable {
    entries: &'static [DelimEntry],
    pua_base: u32,
    levels: u8,
    growth: f64,
}

impl SizeVariantTable {
    pub const fn new(entries: &'static [DelimEntry], pua_base: u32, levels: u8, growth: f64) -> Self {
        SizeVariantTable { entries, pua_base, levels, growth }
    }

    fn index_of(&self, symbol: char) -> Option<usize> {
        self.entries.iter().position(|e| e.symbol == symbol)
    }

    fn variant_char(&self, idx: usize, level: u8) -> char {
        char::from_u32(self.pua_base + (idx as u32) * 16 + level as u32)
            .expect("size-variant PUA codepoints are constructed in-range")
    }

    /// `(role, symbol)` pairs from smallest (the base glyph itself) to largest, or empty if
    /// `symbol` has no sized variants in this family.
    pub fn sized_alternatives<R: Copy>(&self, role: R, symbol: char) -> Vec<(R, char)> {
        match self.index_of(symbol) {
            None => Vec::new(),
            Some(idx) => {
                let mut out = Vec::with_capacity(self.levels as usize + 1);
                out.push((role, symbol));
                for level in 1..=self.levels {
                    out.push((role, self.variant_char(idx, level)));
                }
                out
            }
        }
    }

    /// Raw metrics for either a base entry or one of its synthesized larger variants, or `None`
    /// if `symbol` does not belong to this table at all.
    pub fn metrics_for(&self, symbol: char) -> Option<Metrics> {
        if let Some(idx) = self.index_of(symbol) {
            return Some(self.metrics_at(idx, 0));
        }
        let code = symbol as u32;
        if code < self.pua_base {
            return None;
        }
        let offset = code - self.pua_base;
        let idx = (offset / 16) as usize;
        let level = (offset % 16) as u8;
        if level >= 1 && level <= self.levels && idx < self.entries.len() {
            Some(self.metrics_at(idx, level))
        } else {
            None
        }
    }

    fn metrics_at(&self, idx: usize, level: u8) -> Metrics {
        let e = &self.entries[idx];
        let factor = self.growth.powi(level as i32);
        let (width, height, depth) = (e.width_em * factor, e.height_em * factor, e.depth_em * factor);
        Metrics {
            advance: Unit::new(width),
            width: Unit::new(width),
            height: Unit::new(height),
            xmin: Unit::ZERO,
            xmax: Unit::new(width),
            ymin: Unit::new(-depth),
            ymax: Unit::new(height),
            iceberg: Unit::new(height),
            slanted: false,
        }
    }
}
