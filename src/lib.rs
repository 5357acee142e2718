/*! # typeset-math
 *
 * A mathematical-formula typesetting engine in the spirit of Knuth's TeX: it parses a TeX-style
 * math subset (e.g. `\sum_{i=0}^\infty \frac{1}{i!}`) and lays it out as a tree of boxes and glue,
 * then ships the finished tree as a sequence of `render_glyph`/`render_rect_filled` calls for a
 * caller-supplied backend to rasterize, emit as PostScript/SVG, or otherwise consume.
 *
 * The architecture is one-stage: the parser builds and packs [`node::Node`] trees directly rather
 * than through an intermediate math-list / layout-node split, and glyphs come from built-in
 * static font tables (Bakoma, STIX, and user-configured Unicode families) rather than a live
 * OpenType `MATH` font, since font-file parsing is out of scope (see `DESIGN.md`).
 *
 * ## Basic usage
 *
 * To typeset a formula you need a [`config::Config`] (selecting a font family) and a
 * [`backend::Backend`] to receive the draw calls:
 *
 * ```
 * use typeset_math::config::Config;
 * use typeset_math::backend::RecordingBackend;
 * use typeset_math::Typesetter;
 *
 * let config = Config::default(); // Bakoma / Computer Modern
 * let mut typesetter = Typesetter::new(&config, Box::new(RecordingBackend::new()));
 *
 * let warnings = typesetter
 *     .render(r"e = \lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^n", 16.0)
 *     .expect("parse error");
 * assert!(warnings.is_empty());
 * ```
 *
 * `render` places the first glyph's baseline at `(0, 0)`, using the given font size in points at
 * the `dpi` configured on `Config` (100 by default). Every [`dimensions::Unit`] downstream is a
 * device unit — a pixel at that dpi.
 *
 * ## More complex cases
 *
 * [`Typesetter::render`] is a convenience wrapper around the three steps a caller can run
 * separately for more control — for instance to measure a formula before deciding how large a
 * canvas to allocate:
 *
 * 1. [`parser::parse`] turns the input string into a packed root [`node::List`] (an `Hlist`),
 *    consulting a [`font::Fonts`] instance for glyph metrics as it goes.
 * 2. [`layout::ship`] walks the packed tree and emits draw calls to a [`backend::Backend`].
 * 3. A [`backend::BBoxBackend`] wraps any backend and collects the tight bounding box of
 *    everything that would have been drawn, without requiring a pre-sized canvas — §4.4's
 *    "bounding-box pre-pass": ship once to measure, resize the real canvas, ship again.
 *
 * ```
 * use typeset_math::config::Config;
 * use typeset_math::backend::{BBoxBackend, RecordingBackend};
 * use typeset_math::dimensions::Unit;
 *
 * let config = Config::default();
 * let mut fonts = config.build_fonts(Box::new(BBoxBackend::new(RecordingBackend::new())));
 *
 * let (root, _warnings) = typeset_math::parser::parse(r"\sqrt{x+1}", &mut fonts, 16.0, config.dpi)
 *     .expect("parse error");
 *
 * let mut ship_warnings = Vec::new();
 * typeset_math::layout::ship(&mut fonts, Unit::ZERO, Unit::ZERO, &root, &mut ship_warnings);
 * ```
 *
 * ## Implementing a backend
 *
 * Any rasterizer, PostScript/PDF/SVG emitter, or test harness implements [`backend::Backend`]:
 * `render_glyph`, `render_rect_filled`, and optionally `set_canvas_size`/`get_hinting_type`. A
 * real backend resolves `(role, codepoint, fontsize, dpi)` to whatever font file it has loaded
 * itself — this crate supplies metrics and glyph selection, not rasterization (§1).
 */

#[macro_use]
mod macros;

pub mod backend;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod parser;
mod tables;

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::backend::Backend;
use crate::config::Config;
use crate::dimensions::Unit;
use crate::error::{Error, Warning};
use crate::font::Fonts;
use crate::node::List;

/// One entry in the process-lifetime result cache (§3, §5, §10): a finished, packed tree plus the
/// warnings collecting it produced, keyed on the inputs that determine it bit-for-bit.
struct CacheEntry {
    root: List,
    warnings: Vec<Warning>,
}

/// `(expression, dpi, font_properties_hash)`, per §3: "a process-lifetime cache in the top-level
/// parser maps `(expression_string, dpi, font_properties_hash)` to a final result". Fontsize is
/// folded in alongside dpi: two different sizes of the same expression are not the same cache
/// entry, any more than two different dpis are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    expression: String,
    dpi_bits: u64,
    fontsize_bits: u64,
}

impl CacheKey {
    fn new(expression: &str, dpi: f64, fontsize: f64) -> Self {
        CacheKey { expression: expression.to_string(), dpi_bits: dpi.to_bits(), fontsize_bits: fontsize.to_bits() }
    }
}

/// Hash a [`Config`]'s font-selecting fields with `sha2` (§10: "hashes the font properties with
/// `sha2` ... avoids deriving `Hash` for font config structs that may contain floats"). Computed
/// once at construction, since a single [`Typesetter`] has one `Config` for its whole lifetime —
/// every cache entry it ever creates shares this prefix.
fn hash_font_properties(config: &Config) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([config.fontset as u8, config.fallback_to_cm as u8]);
    for descriptor in [
        &config.custom_fonts.rm,
        &config.custom_fonts.it,
        &config.custom_fonts.bf,
        &config.custom_fonts.cal,
        &config.custom_fonts.sf,
        &config.custom_fonts.tt,
    ] {
        hasher.update(descriptor.family_name.as_bytes());
        hasher.update([0u8]); // separator: distinguishes ("ab","c") from ("a","bc")
    }
    hasher.finalize().into()
}

/// The crate's top-level entry point (§3, §5, §9): owns the single [`Fonts`] instance — and
/// therefore the backend it draws through, and the glyph-metrics cache inside it — plus the
/// process-lifetime result cache. Per §5, a `Typesetter` is single-threaded and synchronous;
/// parallelizing across expressions means one `Typesetter` (and its own `Config`/backend) per
/// thread, not sharing one across threads.
pub struct Typesetter {
    fonts: Fonts,
    props_hash: [u8; 32],
    dpi: f64,
    cache: HashMap<CacheKey, CacheEntry>,
}

impl Typesetter {
    /// Build a typesetter for `config`'s font family and dpi, drawing through `backend`.
    pub fn new(config: &Config, backend: Box<dyn Backend>) -> Self {
        Typesetter {
            fonts: config.build_fonts(backend),
            props_hash: hash_font_properties(config),
            dpi: config.dpi,
            cache: HashMap::new(),
        }
    }

    /// Parse (or recall from cache) `expression` at `fontsize` points, then ship it to the
    /// backend with the first glyph's baseline at `(0, 0)`. Returns the warnings collected during
    /// parsing and packing (§7: warnings don't interrupt layout); a cache hit replays the warnings
    /// recorded the first time rather than re-deriving them (§8 "Cache determinism").
    pub fn render(&mut self, expression: &str, fontsize: f64) -> Result<Vec<Warning>, Error> {
        let (root, warnings) = self.parse_cached(expression, fontsize)?;
        let mut ship_warnings = Vec::new();
        crate::layout::ship(&mut self.fonts, Unit::ZERO, Unit::ZERO, &root, &mut ship_warnings);
        Ok(warnings)
    }

    /// Parse `expression` without shipping it, for callers that want the packed tree's dimensions
    /// (e.g. to size a canvas) before deciding whether or where to render it. Also populates the
    /// cache, so a following [`Typesetter::render`] call with the same arguments is a hit.
    pub fn measure(&mut self, expression: &str, fontsize: f64) -> Result<(List, Vec<Warning>), Error> {
        self.parse_cached(expression, fontsize)
    }

    fn parse_cached(&mut self, expression: &str, fontsize: f64) -> Result<(List, Vec<Warning>), Error> {
        let key = CacheKey::new(expression, self.dpi, fontsize);
        if let Some(entry) = self.cache.get(&key) {
            return Ok((entry.root.clone(), entry.warnings.clone()));
        }
        let (root, warnings) = crate::parser::parse(expression, &mut self.fonts, fontsize, self.dpi)?;
        self.cache.insert(key, CacheEntry { root: root.clone(), warnings: warnings.clone() });
        Ok((root, warnings))
    }

    /// Release the process-lifetime result cache (§5: "on cache clear ... transient per-expression
    /// state ... is released"). The glyph-metrics cache inside [`Fonts`] is unaffected — it holds
    /// no per-expression state, only per-`(font, symbol, size, dpi)` metrics that remain valid.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Swap in a different backend (e.g. to ship the §4.4 bounding-box pre-pass, read off the
    /// tight size, then re-ship against the real backend). Does not clear the cache: a packed
    /// tree never references the backend it was first shipped to.
    pub fn set_backend(&mut self, backend: Box<dyn Backend>) {
        self.fonts.set_backend(backend);
    }

    /// A stable digest of this typesetter's font configuration, for callers that want to key
    /// their own cache (e.g. of rasterized bitmaps) alongside this crate's expression cache.
    pub fn font_properties_hash(&self) -> [u8; 32] {
        self.props_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    #[test]
    fn render_produces_no_warnings_for_a_simple_expression() {
        let config = Config::default();
        let mut ts = Typesetter::new(&config, Box::new(RecordingBackend::new()));
        let warnings = ts.render("$x$", 16.0).expect("parse error");
        assert!(warnings.is_empty());
    }

    #[test]
    fn second_render_of_the_same_expression_is_a_cache_hit() {
        // TESTABLE PROPERTIES #7 "Cache determinism".
        let config = Config::default();
        let mut ts = Typesetter::new(&config, Box::new(RecordingBackend::new()));
        let (first, _) = ts.measure(r"\frac{1}{2}", 12.0).expect("parse error");
        assert_eq!(ts.cache.len(), 1);
        let (second, _) = ts.measure(r"\frac{1}{2}", 12.0).expect("parse error");
        assert_eq!(ts.cache.len(), 1);
        assert_eq!(first.width, second.width);
        assert_eq!(first.height, second.height);
        assert_eq!(first.depth, second.depth);
    }

    #[test]
    fn different_fontsize_is_a_distinct_cache_entry() {
        let config = Config::default();
        let mut ts = Typesetter::new(&config, Box::new(RecordingBackend::new()));
        ts.measure("$x$", 10.0).expect("parse error");
        ts.measure("$x$", 20.0).expect("parse error");
        assert_eq!(ts.cache.len(), 2);
    }

    #[test]
    fn clear_drops_the_result_cache() {
        let config = Config::default();
        let mut ts = Typesetter::new(&config, Box::new(RecordingBackend::new()));
        ts.measure("$x$", 10.0).expect("parse error");
        assert_eq!(ts.cache.len(), 1);
        ts.clear();
        assert_eq!(ts.cache.len(), 0);
    }

    #[test]
    fn parse_error_surfaces_as_err_with_position() {
        let config = Config::default();
        let mut ts = Typesetter::new(&config, Box::new(RecordingBackend::new()));
        let err = ts.render("$x_a_b$", 12.0).unwrap_err();
        match err {
            Error::Parse(failure) => {
                assert_eq!(failure.error, crate::error::ParseError::ExcessiveScript { token: '_' });
            }
            Error::Layout(_) => panic!("expected a parse error"),
        }
    }
}
