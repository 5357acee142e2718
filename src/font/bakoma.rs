//! Computer Modern ("Bakoma") font family — bitmap-oriented TeX symbols mapped through a static
//! table. Shaped after classic `BakomaFonts` metrics: a fixed family-name-to-physical-font-file
//! map, a size-alternatives table for delimiters, and a small set of slanted integral symbols
//! (`\int`, `\oint`).

use crate::dimensions::Unit;
use crate::font::size_variants::{DelimEntry, SizeVariantTable};
use crate::font::synth::approximate_metrics;
use crate::font::{FontFamily, FontRole, Metrics};

/// The symbols Computer Modern draws with a pre-sized variant ladder (§4.1's list: "parens,
/// braces, brackets, floor/ceil, angles, sqrt-sign, backslash, slash, widehat, widetilde").
const SIZED: &[DelimEntry] = &[
    DelimEntry { symbol: '(', width_em: 0.35, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: ')', width_em: 0.35, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '{', width_em: 0.4, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '}', width_em: 0.4, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '[', width_em: 0.3, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: ']', width_em: 0.3, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '⌊', width_em: 0.3, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '⌋', width_em: 0.3, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '⌈', width_em: 0.3, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '⌉', width_em: 0.3, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '⟨', width_em: 0.35, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '⟩', width_em: 0.35, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '√', width_em: 0.5, height_em: 0.8, depth_em: 0.2 },
    DelimEntry { symbol: '\\', width_em: 0.4, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '/', width_em: 0.4, height_em: 0.75, depth_em: 0.25 },
    DelimEntry { symbol: '^', width_em: 0.4, height_em: 0.3, depth_em: 0.0 },
    DelimEntry { symbol: '~', width_em: 0.4, height_em: 0.3, depth_em: 0.0 },
];

/// `\int`/`\oint` draw with a slanted integral sign even outside the italic font role.
const SLANTED_REGARDLESS_OF_ROLE: &[char] = &['∫', '∮'];

/// A handful of explicit overrides for symbols whose approximate metrics (see
/// [`crate::font::synth`]) would be visibly wrong for Computer Modern's actual proportions.
const OVERRIDES: &[(char, f64, f64, f64, f64)] = &[
    // (symbol, width, advance, iceberg, depth)
    ('∑', 0.9, 1.0, 0.75, 0.25),
    ('∏', 0.9, 1.0, 0.75, 0.25),
    ('∐', 0.9, 1.0, 0.75, 0.25),
    ('∫', 0.45, 0.5, 0.85, 0.35),
    ('∮', 0.5, 0.55, 0.85, 0.35),
];

pub struct Bakoma {
    sized: SizeVariantTable,
}

impl Bakoma {
    pub fn new() -> Self {
        Bakoma { sized: SizeVariantTable::new(SIZED, 0xE000, 3, 1.8) }
    }
}

impl Default for Bakoma {
    fn default() -> Self {
        Bakoma::new()
    }
}

impl FontFamily for Bakoma {
    fn resolve_command(&self, _name: &str) -> Option<char> {
        None
    }

    fn raw_metrics(&self, role: FontRole, symbol: char) -> Option<Metrics> {
        if let Some(m) = self.sized.metrics_for(symbol) {
            return Some(m);
        }
        for &(sym, width, advance, iceberg, depth) in OVERRIDES {
            if sym == symbol {
                return Some(Metrics {
                    advance: Unit::new(advance),
                    width: Unit::new(width),
                    height: Unit::new(iceberg - depth),
                    xmin: Unit::ZERO,
                    xmax: Unit::new(width),
                    ymin: Unit::new(-depth),
                    ymax: Unit::new(iceberg),
                    iceberg: Unit::new(iceberg),
                    slanted: SLANTED_REGARDLESS_OF_ROLE.contains(&symbol),
                });
            }
        }
        // Currency sign fallback glyph must always resolve so Fonts::get_metrics never
        // double-faults when substituting it.
        let slanted = role == FontRole::Italic || SLANTED_REGARDLESS_OF_ROLE.contains(&symbol);
        Some(approximate_metrics(symbol, slanted))
    }

    fn raw_kern(&self, _role: FontRole, _c1: char, _c2: char) -> Unit {
        Unit::ZERO
    }

    fn xheight_em(&self, _role: FontRole) -> f64 {
        0.45
    }

    fn underline_thickness_em(&self, _role: FontRole) -> f64 {
        0.04
    }

    fn sized_alternatives(&self, role: FontRole, symbol: char) -> Vec<(FontRole, char)> {
        self.sized.sized_alternatives(role, symbol)
    }
}
