//! Subscript/superscript placement (§4.3 "subsuper"). Two regimes:
//!   - over/under: a large operator (`\sum`) or a named limit-taking function (`\lim`) stacks its
//!     scripts vertically, each centered on the widest of the three, connected by kerns — grounded
//!     on the TeXbook's "above and below" rule for `\mathop` limits, adapted from
//!     `Parser._make_subscript`-style stacking in the original.
//!   - inline: an ordinary nucleus places its scripts using Knuth's shift_up/shift_down formulas
//!     (Appendix G rules 18a-18f of The TeXbook), using [`SUP1`]/[`SUB1`]/[`SUBDROP`]/[`DELTA`]
//!     from [`crate::layout::constants`].

use super::NucleusKind;
use crate::dimensions::Unit;
use crate::error::Warning;
use crate::font::{FontRole, Fonts};
use crate::layout::constants::{DELTA, SUB1, SUBDROP, SUP1};
use crate::layout::pack::{hpack, vpack, PackMode};
use crate::node::{GlueSpec, List, Node};
use crate::tables;

/// Wrap a single node in an `Hlist` by itself (so it carries its own packed width/height/depth
/// independent of whatever list it ends up nested in).
fn to_hlist(node: Node, warnings: &mut Vec<Warning>) -> List {
    let mut list = List::new();
    list.contents.push(node);
    hpack(&mut list, PackMode::Additional(0), warnings);
    list
}

/// Center `node` within a box of `width` device units, via symmetric stretch/shrink glue either
/// side (§4.3's fraction/over-under centering rule). Shared between [`super::frac`] and the
/// over/under stacking below.
pub(crate) fn center_to_width(node: Node, width: Unit, warnings: &mut Vec<Warning>) -> Node {
    let mut list = List::new();
    list.contents.push(Node::Glue(GlueSpec::ss()));
    list.contents.push(node);
    list.contents.push(Node::Glue(GlueSpec::ss()));
    hpack(&mut list, PackMode::Exactly(width.round().value() as i64), warnings);
    Node::Hlist(list)
}

/// Place `sub`/`sup` relative to `nucleus`, dispatching to the over/under or inline regime
/// according to `kind`.
pub(crate) fn place_scripts(
    fonts: &mut Fonts,
    nucleus: Node,
    kind: NucleusKind,
    sub: Option<Node>,
    sup: Option<Node>,
    role: FontRole,
    fontsize: f64,
    dpi: f64,
    warnings: &mut Vec<Warning>,
) -> Node {
    match kind {
        NucleusKind::LargeOp => place_overunder(fonts, nucleus, sub, sup, role, fontsize, dpi, warnings),
        NucleusKind::DropSub | NucleusKind::Ordinary => {
            place_inline(fonts, nucleus, kind, sub, sup, role, fontsize, dpi, warnings)
        }
    }
}

fn place_overunder(
    fonts: &mut Fonts,
    nucleus: Node,
    sub: Option<Node>,
    sup: Option<Node>,
    role: FontRole,
    fontsize: f64,
    dpi: f64,
    warnings: &mut Vec<Warning>,
) -> Node {
    let thickness = fonts.get_underline_thickness(role, fontsize, dpi);
    let gap = thickness.scale(2.0);

    let nucleus_width = nucleus.width();
    let nucleus_depth = nucleus.depth();
    let sup_width = sup.as_ref().map(Node::width).unwrap_or(Unit::ZERO);
    let sub_width = sub.as_ref().map(Node::width).unwrap_or(Unit::ZERO);
    let width = Unit::max(nucleus_width, Unit::max(sup_width, sub_width));

    let mut below = Unit::ZERO;
    let mut vlist = List::new();
    if let Some(sup) = sup {
        let boxed = center_to_width(sup, width, warnings);
        vlist.contents.push(boxed);
        vlist.contents.push(Node::Kern(gap));
    }
    vlist.contents.push(center_to_width(nucleus, width, warnings));
    if let Some(sub) = sub {
        let boxed = center_to_width(sub, width, warnings);
        below = boxed.height() + boxed.depth() + gap;
        vlist.contents.push(Node::Kern(gap));
        vlist.contents.push(boxed);
    }
    vpack(&mut vlist, PackMode::Additional(0), Unit::INFINITE, warnings);

    // Shift keys off the sub block (zero if no sub) plus half the nucleus's own depth, not the
    // sup block: the nucleus's baseline is not the group's reference point here, unlike the
    // inline-script regime below.
    vlist.shift = below + nucleus_depth.scale(0.5);
    Node::Vlist(vlist)
}

fn place_inline(
    fonts: &mut Fonts,
    nucleus: Node,
    kind: NucleusKind,
    sub: Option<Node>,
    sup: Option<Node>,
    role: FontRole,
    fontsize: f64,
    dpi: f64,
    warnings: &mut Vec<Warning>,
) -> Node {
    let xheight = fonts.get_xheight(role, fontsize, dpi);
    let thickness = fonts.get_underline_thickness(role, fontsize, dpi);
    let slanted = nucleus.as_char().map(|c| tables::is_slanted(c.codepoint)).unwrap_or(false);
    let delta = if slanted { Unit::from_points(DELTA * fontsize, dpi) } else { Unit::ZERO };

    let nucleus_height = nucleus.height();
    let nucleus_depth = nucleus.depth();

    let sup_hlist = sup.map(|n| to_hlist(n, warnings));
    let sub_hlist = sub.map(|n| to_hlist(n, warnings));

    let mut shift_up = xheight.scale(SUP1);
    if let Some(h) = &sup_hlist {
        shift_up = Unit::max(shift_up, nucleus_height - xheight.scale(0.25));
        shift_up = Unit::max(shift_up, h.depth + xheight.scale(0.25));
    }

    // `\int`/`\oint` (§4.3 "dropsub operator") additionally drop the subscript by the nucleus's
    // own depth, on top of the ordinary SUBDROP clearance.
    let mut shift_down = xheight.scale(SUB1);
    if sub_hlist.is_some() {
        let extra_drop = if kind == NucleusKind::DropSub { nucleus_depth } else { Unit::ZERO };
        shift_down = Unit::max(shift_down, nucleus_depth + xheight.scale(SUBDROP) + extra_drop);
    }

    match (sup_hlist, sub_hlist) {
        (None, None) => nucleus,
        (Some(sup_hlist), None) => {
            let mut vlist = List::new();
            if !delta.is_zero() {
                vlist.contents.push(wrap_with_left_kern(Node::Hlist(sup_hlist.clone()), delta, warnings));
            } else {
                vlist.contents.push(Node::Hlist(sup_hlist.clone()));
            }
            vpack(&mut vlist, PackMode::Additional(0), Unit::INFINITE, warnings);
            vlist.shift = -shift_up - sup_hlist.height;
            combine(nucleus, Node::Vlist(vlist), warnings)
        }
        (None, Some(sub_hlist)) => {
            let mut vlist = List::new();
            vlist.contents.push(Node::Hlist(sub_hlist.clone()));
            vpack(&mut vlist, PackMode::Additional(0), Unit::INFINITE, warnings);
            vlist.shift = shift_down - sub_hlist.height;
            combine(nucleus, Node::Vlist(vlist), warnings)
        }
        (Some(sup_hlist), Some(sub_hlist)) => {
            let clearance_needed = thickness.scale(2.0);
            let clearance = (shift_up - sup_hlist.depth) + (shift_down - sub_hlist.height);
            if clearance < clearance_needed {
                let deficit = clearance_needed - clearance;
                shift_up += deficit.scale(0.5);
                shift_down += deficit.scale(0.5);
            }
            let inner_gap = shift_up + shift_down - sup_hlist.depth - sub_hlist.height;

            let mut vlist = List::new();
            if !delta.is_zero() {
                vlist.contents.push(wrap_with_left_kern(Node::Hlist(sup_hlist.clone()), delta, warnings));
            } else {
                vlist.contents.push(Node::Hlist(sup_hlist.clone()));
            }
            vlist.contents.push(Node::Kern(inner_gap));
            vlist.contents.push(Node::Hlist(sub_hlist));
            vpack(&mut vlist, PackMode::Additional(0), Unit::INFINITE, warnings);
            vlist.shift = -shift_up - sup_hlist.height;
            combine(nucleus, Node::Vlist(vlist), warnings)
        }
    }
}

fn wrap_with_left_kern(node: Node, kern: Unit, warnings: &mut Vec<Warning>) -> Node {
    let mut list = List::new();
    list.contents.push(Node::Kern(kern));
    list.contents.push(node);
    hpack(&mut list, PackMode::Additional(0), warnings);
    Node::Hlist(list)
}

fn combine(nucleus: Node, scripts: Node, warnings: &mut Vec<Warning>) -> Node {
    let mut list = List::new();
    list.contents.push(nucleus);
    list.contents.push(scripts);
    hpack(&mut list, PackMode::Additional(0), warnings);
    Node::Hlist(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::font::bakoma::Bakoma;
    use crate::node::CharNode;

    fn fonts() -> Fonts {
        Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()))
    }

    fn char_node(fonts: &mut Fonts, c: char, role: FontRole) -> Node {
        let mut warnings = Vec::new();
        let metrics = fonts.get_metrics(role, c, 10.0, 100.0, &mut warnings).unwrap();
        Node::Char(CharNode { codepoint: c, font: "it".into(), fontsize: 10.0, dpi: 100.0, metrics, size_level: 0 })
    }

    #[test]
    fn superscript_only_shifts_baseline_up() {
        let mut f = fonts();
        let mut warnings = Vec::new();
        let nucleus = char_node(&mut f, 'x', FontRole::Italic);
        let mut sup = char_node(&mut f, '2', FontRole::Italic);
        sup.shrink(&mut f, &mut warnings);
        let result = place_scripts(&mut f, nucleus, NucleusKind::Ordinary, None, Some(sup), FontRole::Italic, 10.0, 100.0, &mut warnings);
        match result {
            Node::Hlist(list) => {
                assert_eq!(list.contents.len(), 2);
                assert!(matches!(list.contents[1], Node::Vlist(_)));
            }
            other => panic!("expected Hlist, got {:?}", other),
        }
    }

    #[test]
    fn overunder_stacks_sup_and_sub_around_nucleus() {
        let mut f = fonts();
        let mut warnings = Vec::new();
        let nucleus = char_node(&mut f, '∑', FontRole::Roman);
        let mut sub = char_node(&mut f, 'i', FontRole::Italic);
        sub.shrink(&mut f, &mut warnings);
        let mut sup = char_node(&mut f, 'n', FontRole::Italic);
        sup.shrink(&mut f, &mut warnings);
        let result = place_scripts(&mut f, nucleus, NucleusKind::LargeOp, Some(sub), Some(sup), FontRole::Roman, 10.0, 100.0, &mut warnings);
        match result {
            Node::Vlist(list) => assert_eq!(list.contents.len(), 5),
            other => panic!("expected Vlist, got {:?}", other),
        }
    }

    #[test]
    fn combined_scripts_maintain_minimum_clearance() {
        let mut f = fonts();
        let mut warnings = Vec::new();
        let nucleus = char_node(&mut f, 'x', FontRole::Italic);
        let mut sub = char_node(&mut f, 'i', FontRole::Italic);
        sub.shrink(&mut f, &mut warnings);
        let mut sup = char_node(&mut f, '2', FontRole::Italic);
        sup.shrink(&mut f, &mut warnings);
        let result = place_scripts(&mut f, nucleus, NucleusKind::Ordinary, Some(sub), Some(sup), FontRole::Italic, 10.0, 100.0, &mut warnings);
        assert!(matches!(result, Node::Hlist(_)));
    }
}
