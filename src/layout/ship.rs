//! The `ship` traversal: turns an already-packed tree into a stream of `render_glyph`/
//! `render_rect_filled` calls. Modeled on TeX's `hlist_out`/`vlist_out` — two mutually recursive
//! walks tracking a horizontal and a vertical cursor, glue contributions resolved against the
//! enclosing list's chosen `glue_order`, and Rule dimensions resolved against the enclosing box
//! rather than stored as infinities.
//!
//! Coordinates here are absolute device units in the backend's own convention (`+y` down the
//! page, per [`crate::backend::Backend`]'s doc comment); TeX's `off_h`/`off_v` plus `cur_h`/`cur_v`
//! bookkeeping collapses to a single running `(x, y)` position threaded through the recursion,
//! which is equivalent and simpler to get right.

use crate::error::Warning;
use crate::font::{role_from_name, Fonts};
use crate::geometry::BBox;
use crate::node::{GlueResolution, GlueSign, GlueSpec, List, Node};

/// Ship a fully packed root `Hlist` to `fonts`'s backend, with the first glyph's baseline placed
/// at `(ox, oy)`.
pub fn ship(fonts: &mut Fonts, ox: crate::dimensions::Unit, oy: crate::dimensions::Unit, root: &List, warnings: &mut Vec<Warning>) {
    fonts.set_canvas_size(root.width, root.height + root.depth);
    let mut x = ox;
    hlist_out(fonts, root, &mut x, oy + root.height, warnings);
}

/// Resolve a [`Node::Rule`]'s possibly-infinite dimensions against its enclosing list (§9
/// "Running dimensions").
fn resolve_rule_dims(
    enclosing: &List,
    width: crate::dimensions::Unit,
    height: crate::dimensions::Unit,
    depth: crate::dimensions::Unit,
) -> (crate::dimensions::Unit, crate::dimensions::Unit, crate::dimensions::Unit) {
    (
        if width.is_infinite() { enclosing.width } else { width },
        if height.is_infinite() { enclosing.height } else { height },
        if depth.is_infinite() { enclosing.depth } else { depth },
    )
}

/// `round(clamp(glue_set * accumulated_stretch_or_shrink, ±1e9))` — contributes zero unless this
/// glue's order matches the enclosing list's chosen `glue_order` (§4.2 "Glue distribution rule").
fn glue_contribution(glue: &GlueResolution, spec: &GlueSpec) -> crate::dimensions::Unit {
    match glue.glue_sign {
        GlueSign::Normal => crate::dimensions::Unit::ZERO,
        GlueSign::Stretching if spec.stretch_order == glue.glue_order => {
            crate::dimensions::Unit::new(glue.glue_set * spec.stretch.value()).clamp_abs(1e9).round()
        }
        GlueSign::Shrinking if spec.shrink_order == glue.glue_order => {
            crate::dimensions::Unit::new(glue.glue_set * spec.shrink.value()).clamp_abs(1e9).round()
        }
        _ => crate::dimensions::Unit::ZERO,
    }
}

fn hlist_out(fonts: &mut Fonts, list: &List, x: &mut crate::dimensions::Unit, y: crate::dimensions::Unit, warnings: &mut Vec<Warning>) {
    for child in &list.contents {
        match child {
            Node::Char(c) => {
                let role = role_from_name(&c.font);
                fonts.render_glyph(*x, y, role, c.codepoint, c.fontsize, c.dpi);
                let m = &c.metrics;
                fonts.backend_mut().note_glyph_ink(BBox::new(
                    *x + m.xmin,
                    y - m.ymax,
                    *x + m.xmax,
                    y - m.ymin,
                ));
                *x += c.width();
            }
            Node::Accent(a) => {
                let role = role_from_name(&a.font);
                let pos_x = *x - a.metrics.xmin;
                let pos_y = y - a.metrics.ymin;
                fonts.render_glyph(pos_x, pos_y, role, a.codepoint, a.fontsize, a.dpi);
                fonts.backend_mut().note_glyph_ink(BBox::new(
                    pos_x + a.metrics.xmin,
                    pos_y - a.metrics.ymax,
                    pos_x + a.metrics.xmax,
                    pos_y - a.metrics.ymin,
                ));
                *x += a.width();
            }
            Node::Rule { width, height, depth } => {
                let (w, h, d) = resolve_rule_dims(list, *width, *height, *depth);
                fonts.render_rect_filled(*x, y - h, *x + w, y + d);
                *x += w;
            }
            Node::Glue(spec) => {
                *x += spec.width + glue_contribution(&list.glue, spec);
            }
            Node::Kern(k) => {
                *x += *k;
            }
            Node::Hlist(inner) => {
                let start = *x;
                let mut local_x = start;
                hlist_out(fonts, inner, &mut local_x, y + inner.shift, warnings);
                *x = start + inner.width;
            }
            Node::Vlist(inner) => {
                let start = *x;
                vlist_out(fonts, inner, start, y + inner.shift, warnings);
                *x = start + inner.width;
            }
        }
    }
}

fn vlist_out(fonts: &mut Fonts, list: &List, x: crate::dimensions::Unit, top_y: crate::dimensions::Unit, warnings: &mut Vec<Warning>) {
    if list.contents.is_empty() {
        return;
    }
    let mut y = top_y;
    for child in &list.contents {
        match child {
            Node::Char(_) => {
                // §3's invariant: a Char never appears inside a Vlist. Violating it is a parser
                // or pack bug, not a malformed-input condition, so this is fatal (§7 "Internal
                // invariant violation"). DESIGN.md records this as the resolution to the
                // original's unreachable `vlist_out` `Box` branch with an undefined `baseline`.
                panic!("internal invariant violation: Char node found inside a Vlist during ship");
            }
            Node::Accent(_) => {
                panic!("internal invariant violation: Accent node found inside a Vlist during ship");
            }
            Node::Rule { width, height, depth } => {
                let (w, h, d) = resolve_rule_dims(list, *width, *height, *depth);
                y += h;
                fonts.render_rect_filled(x, y - h, x + w, y + d);
                y += d;
            }
            Node::Glue(spec) => {
                y += spec.width + glue_contribution(&list.glue, spec);
            }
            Node::Kern(k) => {
                y += *k;
            }
            Node::Hlist(inner) => {
                y += inner.height;
                let mut local_x = x + inner.shift;
                hlist_out(fonts, inner, &mut local_x, y, warnings);
                y += inner.depth;
            }
            Node::Vlist(inner) => {
                y += inner.height;
                vlist_out(fonts, inner, x + inner.shift, y, warnings);
                y += inner.depth;
            }
        }
    }
}
