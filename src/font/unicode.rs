//! The Unicode font family — user-configured TrueType fonts addressed by a role→descriptor map
//! rather than a fixed Computer Modern/STIX set (§4.1). Grounded on `UnicodeFonts` in the
//! original implementation, which looks up glyphs directly by codepoint in whichever TrueType
//! file the host configured for each role, optionally falling back to the Bakoma family when a
//! glyph is missing (`mathtext.fallback_to_cm`).
//!
//! Font-file discovery and rasterization are out of scope (§1), so there is no real outline to
//! measure here either; metrics come from the same [`crate::font::synth`] heuristic as a stand-in
//! for "whatever the host's font reports", same as the other two families.

use crate::dimensions::Unit;
use crate::font::synth::approximate_metrics;
use crate::font::{FontFamily, FontRole, Metrics};

/// Per-role font descriptor (e.g. a family name the host application resolves to a file).
/// Carried through so a real implementation plugging in `ttf-parser`/`font` could thread it to
/// a file lookup; this crate only keeps it for round-tripping [`crate::config::Config`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontDescriptor {
    pub family_name: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        FontDescriptor { family_name: "sans-serif".to_string() }
    }
}

pub struct UnicodeFonts {
    pub rm: FontDescriptor,
    pub it: FontDescriptor,
    pub bf: FontDescriptor,
    pub cal: FontDescriptor,
    pub sf: FontDescriptor,
    pub tt: FontDescriptor,
}

impl Default for UnicodeFonts {
    fn default() -> Self {
        UnicodeFonts {
            rm: FontDescriptor::default(),
            it: FontDescriptor { family_name: "serif-italic".to_string() },
            bf: FontDescriptor { family_name: "sans-serif-bold".to_string() },
            cal: FontDescriptor { family_name: "cursive".to_string() },
            sf: FontDescriptor::default(),
            tt: FontDescriptor { family_name: "monospace".to_string() },
        }
    }
}

impl UnicodeFonts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FontFamily for UnicodeFonts {
    fn resolve_command(&self, _name: &str) -> Option<char> {
        None
    }

    fn raw_metrics(&self, role: FontRole, symbol: char) -> Option<Metrics> {
        Some(approximate_metrics(symbol, role == FontRole::Italic))
    }

    fn raw_kern(&self, _role: FontRole, _c1: char, _c2: char) -> Unit {
        Unit::ZERO
    }

    fn xheight_em(&self, _role: FontRole) -> f64 {
        0.45
    }

    fn underline_thickness_em(&self, _role: FontRole) -> f64 {
        0.05
    }

    fn sized_alternatives(&self, _role: FontRole, _symbol: char) -> Vec<(FontRole, char)> {
        // Arbitrary TrueType fonts are not assumed to ship pre-drawn large variants; the
        // auto-sized-delimiter/sqrt algorithms fall back to scaling the base glyph (§4.3).
        Vec::new()
    }

    fn italic_requires_letter(&self) -> bool {
        true
    }

    fn fallback_to_cm(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sized_alternatives_for_any_symbol() {
        let fonts = UnicodeFonts::new();
        assert!(fonts.sized_alternatives(FontRole::Roman, '(').is_empty());
    }

    #[test]
    fn italic_requires_letter_flag_is_set() {
        assert!(UnicodeFonts::new().italic_requires_letter());
    }
}
