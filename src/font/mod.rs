//! Per-font-family glyph lookup, metric extraction, kerning, x-height, underline thickness and
//! size-variant enumeration. Shaped after a `FontContext`/`MathFont` split — here there is no
//! font-file-backed `MathFont` implementor, so the per-family behavior lives behind a
//! [`FontFamily`] trait backed by static tables instead of a font-file-parsing adaptor, after the
//! classic `BakomaFonts`/`UnicodeFonts`/`StixFonts` family classes.

pub mod bakoma;
pub mod size_variants;
pub mod stix;
pub mod synth;
pub mod unicode;

use crate::backend::Backend;
use crate::dimensions::Unit;
use crate::error::{LayoutError, Warning};
use std::collections::HashMap;

/// A logical font role a symbol may be drawn in (TeX's family/series, not a concrete typeface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Roman,
    Italic,
    Bold,
    SansSerif,
    Monospace,
    Calligraphic,
}

impl Default for FontRole {
    fn default() -> Self {
        FontRole::Italic
    }
}

/// Coarse classification used for inter-symbol spacing. Narrower than TeX's full eight-class
/// `AtomType`/`TexSymbolType` system — this crate's spacing rules distinguish only the classes
/// that actually get distinct spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Ordinary,
    Operator,
    BinaryOperator,
    Relation,
    Open,
    Close,
    Punctuation,
    /// A "large operator" such as `\sum`/`\int`: stacks limits over/under rather than as scripts
    /// in display style (§4.3 "operator_limits").
    LargeOp,
}

/// Everything one glyph lookup needs to know: advance, ink box, and baseline bearing
/// ("iceberg", TeX's term for the highest point of ink above the baseline).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub advance: Unit,
    pub width: Unit,
    pub height: Unit,
    pub xmin: Unit,
    pub xmax: Unit,
    pub ymin: Unit,
    pub ymax: Unit,
    pub iceberg: Unit,
    pub slanted: bool,
}

impl Metrics {
    /// `height + depth` using the same derivation [`crate::node::CharNode`] uses
    /// (`depth = iceberg - height`), so a delimiter/radical variant picked by this extent lines up
    /// with the vertical space the chosen glyph will actually occupy once it becomes a `CharNode`.
    pub fn total_extent(&self) -> Unit {
        self.iceberg + (self.iceberg - self.height)
    }
}

/// A key into the glyph cache. `fontsize`/`dpi` are bit-identical floats, not rounded, since
/// formulas are re-rendered at the same handful of sizes within a process lifetime (§5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GlyphKey {
    role: FontRole,
    symbol: char,
    fontsize_bits: u64,
    dpi_bits: u64,
}

impl GlyphKey {
    fn new(role: FontRole, symbol: char, fontsize: f64, dpi: f64) -> Self {
        GlyphKey { role, symbol, fontsize_bits: fontsize.to_bits(), dpi_bits: dpi.to_bits() }
    }
}

/// Per-family static data: symbol resolution, metrics, kerning, x-height, underline thickness,
/// and sized-delimiter-variant enumeration. Implemented by [`bakoma::Bakoma`],
/// [`unicode::UnicodeFonts`] and [`stix::Stix`].
pub trait FontFamily {
    /// Resolve a TeX command name (without the backslash) to the codepoint it draws, if this
    /// family has one (§4.1 "symbol resolution policy" — falls through to the single-codepoint
    /// case at a higher layer when this returns `None`).
    fn resolve_command(&self, name: &str) -> Option<char>;

    /// Raw glyph metrics in this family, before the `dpi`/`fontsize` scale is applied.
    fn raw_metrics(&self, role: FontRole, symbol: char) -> Option<Metrics>;

    /// Kern between two adjacent glyphs of the *same* family/size; zero otherwise per §4.1.
    fn raw_kern(&self, role: FontRole, c1: char, c2: char) -> Unit;

    /// x-height in font design units (1.0 = one em), scaled by the caller.
    fn xheight_em(&self, role: FontRole) -> f64;

    /// Underline/fraction-rule thickness in font design units.
    fn underline_thickness_em(&self, role: FontRole) -> f64;

    /// Ordered `(role, codepoint)` size variants for a delimiter, largest last. Empty if this
    /// family draws the symbol at a single fixed size.
    fn sized_alternatives(&self, role: FontRole, symbol: char) -> Vec<(FontRole, char)>;

    /// Whether this family restricts italic substitution the way Unicode fonts do (§4.1:
    /// "Letter category and not GREEK CAPITAL"). Bakoma/STIX have fixed glyph sets and ignore it.
    fn italic_requires_letter(&self) -> bool {
        false
    }

    fn fallback_to_cm(&self) -> bool {
        false
    }
}

/// The font layer proper: wraps one [`FontFamily`] and the [`Backend`] it draws through, with a
/// shared glyph-metrics cache (§4.1 "all three share a glyph cache"). Owns the backend by value
/// — no back-reference exists, so there is no teardown call to sequence (DESIGN.md Open Question
/// resolution #1).
pub struct Fonts {
    family: Box<dyn FontFamily>,
    backend: Box<dyn Backend>,
    cache: HashMap<GlyphKey, Metrics>,
}

/// Fallback glyph substituted when a symbol is missing from the selected family (§4.1, §7
/// "Unknown-symbol warning"). Also used by [`crate::parser::symbol`] when a command name itself
/// does not resolve to any codepoint, per §8's `"$\unknownfoo$"` scenario ("warning + substituted
/// glyph, not an error").
pub(crate) const FALLBACK_GLYPH: char = '\u{00A4}'; // currency sign

/// True for the Greek capital letter block (§4.1: italic substitutes to roman "for non-Letter
/// codepoints and for GREEK CAPITAL").
fn is_greek_capital(c: char) -> bool {
    ('\u{0391}'..='\u{03A9}').contains(&c)
}

/// Map a TeX font-switch name (as stored on `CharNode::font`) to its [`FontRole`]. Unknown names
/// fall back to italic, the default math font (§4.3 "font-switch tokens").
pub fn role_from_name(name: &str) -> FontRole {
    match name {
        "rm" => FontRole::Roman,
        "bf" => FontRole::Bold,
        "sf" => FontRole::SansSerif,
        "tt" => FontRole::Monospace,
        "cal" => FontRole::Calligraphic,
        _ => FontRole::Italic,
    }
}

impl Fonts {
    pub fn new(family: Box<dyn FontFamily>, backend: Box<dyn Backend>) -> Self {
        Fonts { family, backend, cache: HashMap::new() }
    }

    /// Resolve a symbol to final scaled metrics, substituting the fallback glyph (and emitting a
    /// warning) if the family has no entry for it.
    pub fn get_metrics(
        &mut self,
        role: FontRole,
        symbol: char,
        fontsize: f64,
        dpi: f64,
        warnings: &mut Vec<Warning>,
    ) -> Result<Metrics, LayoutError> {
        let key = GlyphKey::new(role, symbol, fontsize, dpi);
        if let Some(m) = self.cache.get(&key) {
            return Ok(*m);
        }

        let scale = fontsize * dpi / 72.0;
        let lookup_role = if role == FontRole::Italic
            && self.family.italic_requires_letter()
            && (!symbol.is_alphabetic() || is_greek_capital(symbol))
        {
            FontRole::Roman
        } else {
            role
        };
        let raw = match self.family.raw_metrics(lookup_role, symbol) {
            Some(m) => m,
            None => {
                log::warn!("no glyph for '{}' in the selected font, substituting fallback glyph", symbol);
                warnings.push(Warning::UnknownSymbol { codepoint: symbol });
                self.family.raw_metrics(role, FALLBACK_GLYPH).ok_or(LayoutError::MissingGlyph {
                    codepoint: symbol,
                    font: format!("{:?}", role),
                })?
            }
        };

        let scaled = Metrics {
            advance: raw.advance.scale(scale),
            width: raw.width.scale(scale),
            height: raw.height.scale(scale),
            xmin: raw.xmin.scale(scale),
            xmax: raw.xmax.scale(scale),
            ymin: raw.ymin.scale(scale),
            ymax: raw.ymax.scale(scale),
            iceberg: raw.iceberg.scale(scale),
            slanted: raw.slanted,
        };
        self.cache.insert(key, scaled);
        Ok(scaled)
    }

    /// Zero unless `font1 == font2` and `size1 == size2`, per §4.1.
    pub fn get_kern(
        &self,
        font1: FontRole,
        c1: char,
        size1: f64,
        font2: FontRole,
        c2: char,
        size2: f64,
        dpi: f64,
    ) -> Unit {
        if font1 != font2 || (size1 - size2).abs() > f64::EPSILON {
            return Unit::ZERO;
        }
        let scale = size1 * dpi / 72.0;
        self.family.raw_kern(font1, c1, c2).scale(scale)
    }

    pub fn get_xheight(&self, role: FontRole, fontsize: f64, dpi: f64) -> Unit {
        let scale = fontsize * dpi / 72.0;
        Unit::new(self.family.xheight_em(role) * scale)
    }

    /// Underline/rule thickness, clamped to at least one device unit after scaling (§4.1).
    pub fn get_underline_thickness(&self, role: FontRole, fontsize: f64, dpi: f64) -> Unit {
        let scale = fontsize * dpi / 72.0;
        let raw = self.family.underline_thickness_em(role) * scale;
        Unit::new(raw.max(1.0))
    }

    /// Family-specific command resolution (§4.1 "symbol resolution policy"): consulted by the
    /// parser *before* falling back to the family-independent [`crate::tables::TEX2UNI`] table,
    /// so a family's own `latex_to_bakoma`/`latex_to_cmex`-style overrides win when present (§6).
    pub fn resolve_command(&self, name: &str) -> Option<char> {
        self.family.resolve_command(name)
    }

    pub fn get_sized_alternatives(&self, role: FontRole, symbol: char) -> Vec<(FontRole, char)> {
        let variants = self.family.sized_alternatives(role, symbol);
        if variants.is_empty() {
            vec![(role, symbol)]
        } else {
            variants
        }
    }

    pub fn render_glyph(&mut self, ox: Unit, oy: Unit, role: FontRole, symbol: char, fontsize: f64, dpi: f64) {
        self.backend.render_glyph(ox, oy, role, symbol, fontsize, dpi);
    }

    pub fn render_rect_filled(&mut self, x1: Unit, y1: Unit, x2: Unit, y2: Unit) {
        self.backend.render_rect_filled(x1, y1, x2, y2);
    }

    pub fn set_canvas_size(&mut self, width: Unit, height: Unit) {
        self.backend.set_canvas_size(width, height);
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        &mut *self.backend
    }

    /// Swap in a different backend, keeping this instance's font family and glyph-metrics cache
    /// (used e.g. to re-ship against the real backend once [`crate::backend::BBoxBackend`]'s
    /// pre-pass has determined a tight canvas size, §4.4).
    pub fn set_backend(&mut self, backend: Box<dyn Backend>) {
        self.backend = backend;
    }

    pub fn fallback_to_cm(&self) -> bool {
        self.family.fallback_to_cm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::font::bakoma::Bakoma;

    #[test]
    fn missing_glyph_falls_back_to_currency_sign_with_warning() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut warnings = Vec::new();
        let result = fonts.get_metrics(FontRole::Roman, '\u{1F600}', 10.0, 100.0, &mut warnings);
        assert!(result.is_ok());
        assert!(!warnings.is_empty());
    }

    #[test]
    fn cache_returns_identical_metrics_on_second_lookup() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut warnings = Vec::new();
        let first = fonts.get_metrics(FontRole::Italic, 'x', 10.0, 100.0, &mut warnings).unwrap();
        let second = fonts.get_metrics(FontRole::Italic, 'x', 10.0, 100.0, &mut warnings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn kern_is_zero_across_different_fonts() {
        let fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let kern = fonts.get_kern(FontRole::Roman, 'A', 10.0, FontRole::Italic, 'V', 10.0, 100.0);
        assert_eq!(kern, Unit::ZERO);
    }
}
