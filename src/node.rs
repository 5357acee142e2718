//! The typographic box model: a tagged variant [`Node`] (`{Char, Accent, Rule, Glue, Kern, Hlist,
//! Vlist}`) with shared dimension/mutation methods implemented by matching on the tag, rather than
//! dynamic dispatch per node kind. Shaped after a `LayoutNode`/`LayoutVariant` split seen in
//! similar box-model crates, and after the classic `Char`/`Accent`/`Hlist`/`Vlist`/`Rule`/`Glue`/
//! `Kern` box taxonomy.

use crate::dimensions::Unit;
use crate::font::Metrics;
use crate::layout::constants::{NUM_SIZE_LEVELS, SHRINK_FACTOR};

/// Sign of the glue distribution chosen by `hpack`/`vpack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlueSign {
    Shrinking,
    Normal,
    Stretching,
}

/// An elastic-whitespace specification: natural width plus stretch/shrink amounts and orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlueSpec {
    pub width: Unit,
    pub stretch: Unit,
    pub stretch_order: u8,
    pub shrink: Unit,
    pub shrink_order: u8,
}

impl GlueSpec {
    pub const ZERO: GlueSpec = GlueSpec {
        width: Unit::ZERO,
        stretch: Unit::ZERO,
        stretch_order: 0,
        shrink: Unit::ZERO,
        shrink_order: 0,
    };

    /// `\,`-style symmetric stretch/shrink glue at order 1 (`ss`, used to center content).
    pub fn ss() -> GlueSpec {
        GlueSpec {
            width: Unit::ZERO,
            stretch: Unit::new(1.0),
            stretch_order: 1,
            shrink: Unit::new(1.0),
            shrink_order: 1,
        }
    }

    pub fn fil(width: Unit) -> GlueSpec {
        GlueSpec { width, stretch: Unit::new(1.0), stretch_order: 1, shrink: Unit::ZERO, shrink_order: 0 }
    }

    pub fn fill(width: Unit) -> GlueSpec {
        GlueSpec { width, stretch: Unit::new(1.0), stretch_order: 2, shrink: Unit::ZERO, shrink_order: 0 }
    }

    pub fn filll(width: Unit) -> GlueSpec {
        GlueSpec { width, stretch: Unit::new(1.0), stretch_order: 3, shrink: Unit::ZERO, shrink_order: 0 }
    }

    fn shrink_in_place(&mut self) {
        self.width = self.width.scale(SHRINK_FACTOR);
        self.stretch = self.stretch.scale(SHRINK_FACTOR);
        self.shrink = self.shrink.scale(SHRINK_FACTOR);
    }

    fn grow_in_place(&mut self) {
        let factor = 1.0 / SHRINK_FACTOR;
        self.width = self.width.scale(factor);
        self.stretch = self.stretch.scale(factor);
        self.shrink = self.shrink.scale(factor);
    }
}

/// The glue-resolution state computed by `hpack`/`vpack` on a [`List`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlueResolution {
    pub glue_set: f64,
    pub glue_sign: GlueSign,
    pub glue_order: u8,
}

impl Default for GlueResolution {
    fn default() -> Self {
        GlueResolution { glue_set: 0.0, glue_sign: GlueSign::Normal, glue_order: 0 }
    }
}

/// An ordered sequence of child nodes, shared by [`Node::Hlist`] and [`Node::Vlist`].
#[derive(Debug, Clone, Default)]
pub struct List {
    pub contents: Vec<Node>,
    pub width: Unit,
    pub height: Unit,
    pub depth: Unit,
    /// Offset applied by the parent when placing this list (TeX's "shift_amount").
    pub shift: Unit,
    pub glue: GlueResolution,
    pub size_level: u8,
}

impl List {
    pub fn new() -> Self {
        List::default()
    }
}

/// A single cached glyph occupying a node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CharNode {
    pub codepoint: char,
    pub font: String,
    pub fontsize: f64,
    pub dpi: f64,
    pub metrics: Metrics,
    pub size_level: u8,
}

impl CharNode {
    /// Width per §3: the glyph's ink width, except the space character uses its advance.
    pub fn width(&self) -> Unit {
        if self.codepoint == ' ' {
            self.metrics.advance
        } else {
            self.metrics.width
        }
    }

    /// Height is the iceberg (bearing above baseline).
    pub fn height(&self) -> Unit {
        self.metrics.iceberg
    }

    /// Depth is `iceberg - height_metric`.
    pub fn depth(&self) -> Unit {
        self.metrics.iceberg - self.metrics.height
    }
}

/// An accent glyph: width/height come from the ink bbox, depth is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AccentNode {
    pub codepoint: char,
    pub font: String,
    pub fontsize: f64,
    pub dpi: f64,
    pub metrics: Metrics,
    pub size_level: u8,
}

impl AccentNode {
    pub fn width(&self) -> Unit {
        self.metrics.xmax - self.metrics.xmin
    }

    pub fn height(&self) -> Unit {
        self.metrics.ymax - self.metrics.ymin
    }

    pub fn depth(&self) -> Unit {
        Unit::ZERO
    }

    /// Render offset `(-xmin, +ymin)` per §3.
    pub fn render_offset(&self) -> (Unit, Unit) {
        (-self.metrics.xmin, self.metrics.ymin)
    }
}

/// A tagged variant over every kind of layout element (§3, §9 "Dynamic dispatch on Node kind").
#[derive(Debug, Clone)]
pub enum Node {
    Char(CharNode),
    Accent(AccentNode),
    /// A solid rectangle. Any of `width`/`height`/`depth` may be [`Unit::INFINITE`], meaning
    /// "stretch to enclosing box" — resolved at ship time, never stored past pack in practice
    /// since `hpack`/`vpack` replace the sentinel with the enclosing box's real dimension before
    /// the rule is appended to a packed list.
    Rule { width: Unit, height: Unit, depth: Unit },
    Glue(GlueSpec),
    Kern(Unit),
    Hlist(List),
    Vlist(List),
}

impl Node {
    pub fn width(&self) -> Unit {
        match self {
            Node::Char(c) => c.width(),
            Node::Accent(a) => a.width(),
            Node::Rule { width, .. } => *width,
            Node::Glue(g) => g.width,
            Node::Kern(k) => *k,
            Node::Hlist(l) | Node::Vlist(l) => l.width,
        }
    }

    pub fn height(&self) -> Unit {
        match self {
            Node::Char(c) => c.height(),
            Node::Accent(a) => a.height(),
            Node::Rule { height, .. } => *height,
            Node::Glue(_) | Node::Kern(_) => Unit::ZERO,
            Node::Hlist(l) | Node::Vlist(l) => l.height,
        }
    }

    pub fn depth(&self) -> Unit {
        match self {
            Node::Char(c) => c.depth(),
            Node::Accent(a) => a.depth(),
            Node::Rule { depth, .. } => *depth,
            Node::Glue(_) | Node::Kern(_) => Unit::ZERO,
            Node::Hlist(l) | Node::Vlist(l) => l.depth,
        }
    }

    /// Is this node a glyph that may be addressed for kerning/italic-correction purposes?
    pub fn as_char(&self) -> Option<&CharNode> {
        match self {
            Node::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Recursively shrink by one size level (§4.2). No-op past [`NUM_SIZE_LEVELS`]. `Char`/`Accent`
    /// re-derive their metrics by re-consulting `fonts` at the new `fontsize`, since a glyph's
    /// advance/ink-box/iceberg are a function of `(font, char, fontsize, dpi)` and mutating
    /// `fontsize` without re-deriving them would leave stale metrics behind (§3's invariant).
    pub fn shrink(&mut self, fonts: &mut crate::font::Fonts, warnings: &mut Vec<crate::error::Warning>) {
        match self {
            Node::Char(c) => {
                if c.size_level < NUM_SIZE_LEVELS {
                    c.size_level += 1;
                    c.fontsize *= SHRINK_FACTOR;
                    if let Ok(m) = fonts.get_metrics(crate::font::role_from_name(&c.font), c.codepoint, c.fontsize, c.dpi, warnings) {
                        c.metrics = m;
                    }
                }
            }
            Node::Accent(a) => {
                if a.size_level < NUM_SIZE_LEVELS {
                    a.size_level += 1;
                    a.fontsize *= SHRINK_FACTOR;
                    if let Ok(m) = fonts.get_metrics(crate::font::role_from_name(&a.font), a.codepoint, a.fontsize, a.dpi, warnings) {
                        a.metrics = m;
                    }
                }
            }
            Node::Rule { width, height, depth } => {
                if !width.is_infinite() {
                    *width = width.scale(SHRINK_FACTOR);
                }
                if !height.is_infinite() {
                    *height = height.scale(SHRINK_FACTOR);
                }
                if !depth.is_infinite() {
                    *depth = depth.scale(SHRINK_FACTOR);
                }
            }
            Node::Glue(g) => g.shrink_in_place(),
            Node::Kern(k) => *k = k.scale(SHRINK_FACTOR),
            Node::Hlist(l) | Node::Vlist(l) => {
                if l.size_level < NUM_SIZE_LEVELS {
                    l.size_level += 1;
                    l.width = l.width.scale(SHRINK_FACTOR);
                    l.height = l.height.scale(SHRINK_FACTOR);
                    l.depth = l.depth.scale(SHRINK_FACTOR);
                    l.shift = l.shift.scale(SHRINK_FACTOR);
                    l.glue.glue_set *= SHRINK_FACTOR;
                    for child in &mut l.contents {
                        child.shrink(fonts, warnings);
                    }
                }
            }
        }
    }

    /// Recursively grow by one size level; the inverse of [`Node::shrink`], uncapped. `Char`/
    /// `Accent` re-derive their metrics the same way `shrink` does.
    pub fn grow(&mut self, fonts: &mut crate::font::Fonts, warnings: &mut Vec<crate::error::Warning>) {
        let factor = 1.0 / SHRINK_FACTOR;
        match self {
            Node::Char(c) => {
                c.size_level = c.size_level.saturating_sub(1);
                c.fontsize *= factor;
                if let Ok(m) = fonts.get_metrics(crate::font::role_from_name(&c.font), c.codepoint, c.fontsize, c.dpi, warnings) {
                    c.metrics = m;
                }
            }
            Node::Accent(a) => {
                a.size_level = a.size_level.saturating_sub(1);
                a.fontsize *= factor;
                if let Ok(m) = fonts.get_metrics(crate::font::role_from_name(&a.font), a.codepoint, a.fontsize, a.dpi, warnings) {
                    a.metrics = m;
                }
            }
            Node::Rule { width, height, depth } => {
                if !width.is_infinite() {
                    *width = width.scale(factor);
                }
                if !height.is_infinite() {
                    *height = height.scale(factor);
                }
                if !depth.is_infinite() {
                    *depth = depth.scale(factor);
                }
            }
            Node::Glue(g) => g.grow_in_place(),
            Node::Kern(k) => *k = k.scale(factor),
            Node::Hlist(l) | Node::Vlist(l) => {
                l.size_level = l.size_level.saturating_sub(1);
                l.width = l.width.scale(factor);
                l.height = l.height.scale(factor);
                l.depth = l.depth.scale(factor);
                l.shift = l.shift.scale(factor);
                l.glue.glue_set *= factor;
                for child in &mut l.contents {
                    child.grow(fonts, warnings);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::font::bakoma::Bakoma;
    use crate::font::{FontRole, Fonts, Metrics};

    fn test_fonts() -> Fonts {
        Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()))
    }

    /// A char node whose metrics actually came from `fonts`, so re-deriving them after `shrink`
    /// scales every field by the same ratio as `fontsize` (needed for `shrink_monotonicity` below;
    /// the other tests in this module don't call `shrink`/`grow` and can use hand-rolled metrics).
    fn font_derived_char(fonts: &mut Fonts, warnings: &mut Vec<crate::error::Warning>) -> Node {
        let metrics = fonts.get_metrics(FontRole::Italic, 'x', 10.0, 100.0, warnings).unwrap();
        Node::Char(CharNode { codepoint: 'x', font: "it".into(), fontsize: 10.0, dpi: 100.0, metrics, size_level: 0 })
    }

    fn sample_char() -> Node {
        Node::Char(CharNode {
            codepoint: 'x',
            font: "it".into(),
            fontsize: 10.0,
            dpi: 100.0,
            metrics: Metrics {
                advance: Unit::new(6.0),
                width: Unit::new(5.0),
                height: Unit::new(4.0),
                xmin: Unit::ZERO,
                xmax: Unit::new(5.0),
                ymin: Unit::ZERO,
                ymax: Unit::new(4.0),
                iceberg: Unit::new(4.0),
                slanted: true,
            },
            size_level: 0,
        })
    }

    #[test]
    fn shrink_monotonicity() {
        // TESTABLE PROPERTIES #4: width scales by 0.7^min(k,4) within 1 ulp.
        let mut fonts = test_fonts();
        let mut warnings = Vec::new();
        let original_width = font_derived_char(&mut fonts, &mut warnings).width().value();
        let mut node = font_derived_char(&mut fonts, &mut warnings);
        for k in 1..=6u32 {
            node.shrink(&mut fonts, &mut warnings);
            let expected = original_width * SHRINK_FACTOR.powi(k.min(NUM_SIZE_LEVELS as u32) as i32);
            assert_close!(node.width().value(), expected, 1e-9);
        }
    }

    #[test]
    fn char_in_vlist_is_representable_but_flagged_elsewhere() {
        // Construction does not forbid it (§3's invariant is enforced during ship, see
        // `layout::ship::vlist_out`), but `as_char` must still recognize it for validation code.
        let node = sample_char();
        assert!(node.as_char().is_some());
    }

    #[test]
    fn space_width_uses_advance() {
        let mut node = sample_char();
        if let Node::Char(c) = &mut node {
            c.codepoint = ' ';
        }
        assert_eq!(node.width(), Unit::new(6.0));
    }
}
