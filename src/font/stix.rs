//! The STIX font family: adds a calligraphic-letter remap into the Private Use Area and six
//! size-variant families for delimiters (§4.1). Grounded on `StixFonts(UnicodeFonts)` in the
//! original implementation, in particular `sym = unichr(ord(sym) + 0xe22d - ord('A'))` for
//! calligraphic uppercase letters.

use crate::dimensions::Unit;
use crate::font::size_variants::{DelimEntry, SizeVariantTable};
use crate::font::synth::approximate_metrics;
use crate::font::{FontFamily, FontRole, Metrics};

const CALLIGRAPHIC_PUA_BASE: u32 = 0xE22D;

/// STIX ships six size-variant families for its sizeable delimiters/radical (§4.1: "6
/// size-variant families"), one more level than Bakoma's four.
const SIZED: &[DelimEntry] = &[
    DelimEntry { symbol: '(', width_em: 0.36, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: ')', width_em: 0.36, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '{', width_em: 0.42, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '}', width_em: 0.42, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '[', width_em: 0.32, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: ']', width_em: 0.32, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '⌊', width_em: 0.32, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '⌋', width_em: 0.32, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '⌈', width_em: 0.32, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '⌉', width_em: 0.32, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '⟨', width_em: 0.36, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '⟩', width_em: 0.36, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '√', width_em: 0.52, height_em: 0.82, depth_em: 0.22 },
    DelimEntry { symbol: '\\', width_em: 0.42, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '/', width_em: 0.42, height_em: 0.78, depth_em: 0.26 },
    DelimEntry { symbol: '^', width_em: 0.4, height_em: 0.3, depth_em: 0.0 },
    DelimEntry { symbol: '~', width_em: 0.4, height_em: 0.3, depth_em: 0.0 },
];

pub struct Stix {
    sized: SizeVariantTable,
}

impl Stix {
    pub fn new() -> Self {
        Stix { sized: SizeVariantTable::new(SIZED, 0xF000, 5, 1.6) }
    }

    /// Calligraphic uppercase letters remap into the Private Use Area before any lookup (§4.1).
    fn remap(role: FontRole, symbol: char) -> char {
        if role == FontRole::Calligraphic && symbol.is_ascii_uppercase() {
            char::from_u32(CALLIGRAPHIC_PUA_BASE + (symbol as u32 - 'A' as u32))
                .expect("calligraphic PUA remap stays in a valid codepoint range")
        } else {
            symbol
        }
    }
}

impl Default for Stix {
    fn default() -> Self {
        Stix::new()
    }
}

impl FontFamily for Stix {
    fn resolve_command(&self, _name: &str) -> Option<char> {
        None
    }

    fn raw_metrics(&self, role: FontRole, symbol: char) -> Option<Metrics> {
        let remapped = Self::remap(role, symbol);
        if let Some(m) = self.sized.metrics_for(remapped) {
            return Some(m);
        }
        let slanted = role == FontRole::Italic;
        Some(approximate_metrics(remapped, slanted))
    }

    fn raw_kern(&self, _role: FontRole, _c1: char, _c2: char) -> Unit {
        Unit::ZERO
    }

    fn xheight_em(&self, _role: FontRole) -> f64 {
        0.46
    }

    fn underline_thickness_em(&self, _role: FontRole) -> f64 {
        0.04
    }

    fn sized_alternatives(&self, role: FontRole, symbol: char) -> Vec<(FontRole, char)> {
        self.sized.sized_alternatives(role, Self::remap(role, symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calligraphic_uppercase_remaps_into_pua() {
        let remapped = Stix::remap(FontRole::Calligraphic, 'A');
        assert_eq!(remapped, '\u{E22D}');
        let remapped_z = Stix::remap(FontRole::Calligraphic, 'Z');
        assert_eq!(remapped_z, char::from_u32(0xE22D + 25).unwrap());
    }

    #[test]
    fn non_calligraphic_role_is_untouched() {
        assert_eq!(Stix::remap(FontRole::Italic, 'A'), 'A');
    }

    #[test]
    fn radical_has_six_size_variants() {
        let stix = Stix::new();
        let variants = stix.sized_alternatives(FontRole::Roman, '√');
        assert_eq!(variants.len(), 6);
    }
}
