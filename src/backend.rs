//! Draw commands issued once a tree has been shipped. Shaped after a
//! `{FontBackend, GraphicsBackend, Backend}` trait split, collapsed into a single object-safe
//! trait since this crate has no generic font-file type to parameterize over.
//!
//! ## Coordinate system
//! +Y points down the page. The Y coordinate of a superscript is therefore *less* than the Y
//! coordinate of its base.

use crate::dimensions::Unit;
use crate::font::FontRole;

/// Everything a draw call needs to place and look up a glyph, passed to
/// [`Backend::render_glyph`] instead of a raw `(font, symbol)` pair so a backend can label what
/// it drew without re-deriving it from the font layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInfo {
    pub role: FontRole,
    pub codepoint: char,
    pub fontsize: f64,
    pub dpi: f64,
}

/// Whether a backend wants glyph positions rounded to whole device units before drawing — some
/// rasterizers blur sub-pixel-positioned glyphs, so the ship traversal consults this before
/// emitting the final `(ox, oy)` pair (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintingType {
    None,
    RoundToDeviceUnit,
}

/// All graphical operations needed to render a formula (§4.4).
pub trait Backend {
    /// Called once, before any draw calls, with the overall canvas size the ship traversal
    /// computed. A backend that needs to allocate a buffer up front does it here.
    fn set_canvas_size(&mut self, width: Unit, height: Unit) {
        let _ = (width, height);
    }

    /// Draw one glyph with its top-left ink origin at `(ox, oy)`.
    fn render_glyph(&mut self, ox: Unit, oy: Unit, role: FontRole, codepoint: char, fontsize: f64, dpi: f64);

    /// Draw a filled rectangle (fraction bars, radical overbars, `\rule`).
    fn render_rect_filled(&mut self, x1: Unit, y1: Unit, x2: Unit, y2: Unit);

    fn get_hinting_type(&self) -> HintingType {
        HintingType::None
    }

    /// Called by the ship traversal with a glyph's ink box right after drawing it. A glyph's
    /// footprint requires font metrics that a generic `render_glyph` call doesn't carry, so this
    /// is a separate hook rather than something `render_glyph` itself could derive. Most backends
    /// ignore it; [`BBoxBackend`] uses it to grow the running bounding box.
    fn note_glyph_ink(&mut self, bbox: crate::geometry::BBox) {
        let _ = bbox;
    }
}

/// A backend that draws nothing but accumulates the bounding box of everything that would have
/// been drawn (§4.4, §9 "Supplemented feature" — generalizes `mathtext.py`'s
/// `MathtextBackendBBox`, which answered `get_text_width_height_descent` without rasterizing, to
/// wrap *any* inner backend rather than being tied to a bitmap renderer).
///
/// Used as the measuring half of the two-pass ship: render once to find the tight bbox, then
/// re-ship with the canvas clipped to it.
pub struct BBoxBackend<B> {
    inner: B,
    bbox: Option<crate::geometry::BBox>,
}

impl<B: Backend> BBoxBackend<B> {
    pub fn new(inner: B) -> Self {
        BBoxBackend { inner, bbox: None }
    }

    pub fn bbox(&self) -> Option<crate::geometry::BBox> {
        self.bbox
    }

    fn union_rect(&mut self, rect: crate::geometry::BBox) {
        self.bbox = Some(match self.bbox {
            Some(b) => b.union(rect),
            None => rect,
        });
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Backend> Backend for BBoxBackend<B> {
    fn set_canvas_size(&mut self, width: Unit, height: Unit) {
        self.inner.set_canvas_size(width, height);
    }

    fn render_glyph(&mut self, ox: Unit, oy: Unit, role: FontRole, codepoint: char, fontsize: f64, dpi: f64) {
        // Width/height are unknown to a backend-agnostic wrapper; the caller (ship) is expected
        // to union the glyph's own ink box via `record_glyph_box` before delegating here. This
        // call still forwards to the inner backend so a bbox pass over a live backend also draws.
        self.inner.render_glyph(ox, oy, role, codepoint, fontsize, dpi);
    }

    fn render_rect_filled(&mut self, x1: Unit, y1: Unit, x2: Unit, y2: Unit) {
        self.union_rect(crate::geometry::BBox::new(x1, y1, x2, y2));
        self.inner.render_rect_filled(x1, y1, x2, y2);
    }

    fn get_hinting_type(&self) -> HintingType {
        self.inner.get_hinting_type()
    }

    fn note_glyph_ink(&mut self, bbox: crate::geometry::BBox) {
        self.union_rect(bbox);
    }
}

/// Test-only backend that records every draw call instead of rendering, so integration tests can
/// assert on what *would* have been drawn — a dependency-free recorder standing in for a real
/// rasterizing backend, which is out of scope here.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub glyphs: Vec<(Unit, Unit, GlyphInfo)>,
    pub rects: Vec<(Unit, Unit, Unit, Unit)>,
    pub canvas_size: Option<(Unit, Unit)>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        RecordingBackend::default()
    }
}

impl Backend for RecordingBackend {
    fn set_canvas_size(&mut self, width: Unit, height: Unit) {
        self.canvas_size = Some((width, height));
    }

    fn render_glyph(&mut self, ox: Unit, oy: Unit, role: FontRole, codepoint: char, fontsize: f64, dpi: f64) {
        self.glyphs.push((ox, oy, GlyphInfo { role, codepoint, fontsize, dpi }));
    }

    fn render_rect_filled(&mut self, x1: Unit, y1: Unit, x2: Unit, y2: Unit) {
        self.rects.push((x1, y1, x2, y2));
    }
}
