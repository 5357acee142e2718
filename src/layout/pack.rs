//! `hpack`/`vpack`: the dimensional-resolution half of TeX's box-and-glue model. Modeled on
//! `Hlist.hpack`/`Vlist.vpack` for the exact glue arithmetic, and on a running-totals accumulation
//! style (`width += node.width`, `height = max(height, node.height)`, …) for how a list accumulates
//! its children's dimensions node-by-node rather than in a separate summary pass.

use crate::dimensions::Unit;
use crate::node::{GlueSign, List, Node};

/// Target-width/height resolution mode for `hpack`/`vpack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackMode {
    /// The target is the exact final dimension.
    Exactly(i64),
    /// The target is added to the natural dimension (`Additional(0)` means "use natural size").
    Additional(i64),
}

impl PackMode {
    fn target(self, natural: Unit) -> Unit {
        match self {
            PackMode::Exactly(target) => Unit::new(target as f64),
            PackMode::Additional(extra) => natural + Unit::new(extra as f64),
        }
    }
}

/// Totals of stretch/shrink glue at each of the four orders, used to pick the dominant order.
#[derive(Debug, Clone, Copy, Default)]
struct GlueTotals {
    stretch: [Unit; 4],
    shrink: [Unit; 4],
}

impl GlueTotals {
    fn highest_nonzero_stretch(&self) -> Option<u8> {
        (0..4).rev().find(|&o| !self.stretch[o].is_zero()).map(|o| o as u8)
    }

    fn highest_nonzero_shrink(&self) -> Option<u8> {
        (0..4).rev().find(|&o| !self.shrink[o].is_zero()).map(|o| o as u8)
    }
}

/// Horizontally pack a list: set `width`/`height`/`depth` and resolve glue (§4.2 "hpack").
///
/// `height`/`depth` ignore Rule children with infinite height/depth — those are resolved later,
/// at ship time, against the *enclosing* box (§9 "Running dimensions").
pub fn hpack(list: &mut List, mode: PackMode, warnings: &mut Vec<crate::error::Warning>) {
    let mut natural = Unit::ZERO;
    let mut height = Unit::ZERO;
    let mut depth = Unit::ZERO;
    let mut totals = GlueTotals::default();

    for child in &list.contents {
        natural += child.width();
        if let Node::Glue(g) = child {
            totals.stretch[g.stretch_order as usize] += g.stretch;
            totals.shrink[g.shrink_order as usize] += g.shrink;
        }
        let (child_height, child_depth) = match child {
            Node::Rule { height, depth, .. } => (
                if height.is_infinite() { None } else { Some(*height) },
                if depth.is_infinite() { None } else { Some(*depth) },
            ),
            _ => (Some(child.height()), Some(child.depth())),
        };
        if let Some(h) = child_height {
            height = Unit::max(height, h - list.shift);
        }
        if let Some(d) = child_depth {
            depth = Unit::max(depth, d + list.shift);
        }
    }

    list.height = height;
    list.depth = depth;
    list.width = mode.target(natural);

    let surplus = list.width - natural;
    resolve_glue(list, surplus, &totals, !list.contents.is_empty(), warnings, true);
}

/// Vertically pack a list: analogous to [`hpack`] but accumulating `height + previous_depth`
/// between consecutive boxes, and clamping the final depth to `max_depth` (§4.2 "vpack").
pub fn vpack(list: &mut List, mode: PackMode, max_depth: Unit, warnings: &mut Vec<crate::error::Warning>) {
    let mut natural = Unit::ZERO;
    let mut width = Unit::ZERO;
    let mut prev_depth = Unit::ZERO;
    let mut totals = GlueTotals::default();

    for child in &list.contents {
        natural += prev_depth;
        prev_depth = match child {
            Node::Rule { depth, .. } if depth.is_infinite() => Unit::ZERO,
            _ => child.depth(),
        };
        let child_height = match child {
            Node::Rule { height, .. } if height.is_infinite() => Unit::ZERO,
            _ => child.height(),
        };
        natural += child_height;

        if let Node::Glue(g) = child {
            totals.stretch[g.stretch_order as usize] += g.stretch;
            totals.shrink[g.shrink_order as usize] += g.shrink;
        }
        width = Unit::max(width, child.width() - list.shift);
    }

    if prev_depth > max_depth {
        natural += prev_depth - max_depth;
        prev_depth = max_depth;
    }

    list.width = width;
    list.depth = prev_depth;
    list.height = mode.target(natural);

    let surplus = list.height - natural;
    resolve_glue(list, surplus, &totals, !list.contents.is_empty(), warnings, false);
}

fn resolve_glue(
    list: &mut List,
    surplus: Unit,
    totals: &GlueTotals,
    nonempty: bool,
    warnings: &mut Vec<crate::error::Warning>,
    horizontal: bool,
) {
    if surplus.is_zero() {
        list.glue.glue_set = 0.0;
        list.glue.glue_sign = GlueSign::Normal;
        list.glue.glue_order = 0;
        return;
    }

    if surplus.value() > 0.0 {
        match totals.highest_nonzero_stretch() {
            Some(order) => {
                list.glue.glue_set = surplus.value() / totals.stretch[order as usize].value();
                list.glue.glue_sign = GlueSign::Stretching;
                list.glue.glue_order = order;
                if order == 0 && nonempty {
                    log::warn!("underfull {} box, needed {} more of stretch", if horizontal { "h" } else { "v" }, surplus);
                    warnings.push(crate::error::Warning::Underfull { horizontal, amount: surplus });
                }
            }
            None => {
                list.glue.glue_set = 0.0;
                list.glue.glue_sign = GlueSign::Normal;
                list.glue.glue_order = 0;
                if nonempty {
                    log::warn!("underfull {} box, needed {} more of stretch", if horizontal { "h" } else { "v" }, surplus);
                    warnings.push(crate::error::Warning::Underfull { horizontal, amount: surplus });
                }
            }
        }
    } else {
        match totals.highest_nonzero_shrink() {
            Some(order) => {
                list.glue.glue_set = surplus.value() / totals.shrink[order as usize].value();
                list.glue.glue_sign = GlueSign::Shrinking;
                list.glue.glue_order = order;
                if order == 0 && nonempty {
                    log::warn!("overfull {} box by {}", if horizontal { "h" } else { "v" }, -surplus);
                    warnings.push(crate::error::Warning::Overfull { horizontal, amount: -surplus });
                }
            }
            None => {
                list.glue.glue_set = 0.0;
                list.glue.glue_sign = GlueSign::Normal;
                list.glue.glue_order = 0;
                if nonempty {
                    log::warn!("overfull {} box by {}", if horizontal { "h" } else { "v" }, -surplus);
                    warnings.push(crate::error::Warning::Overfull { horizontal, amount: -surplus });
                }
            }
        }
    }
}
