//! `\hat \tilde \bar … \widehat \widetilde` (§4.3 "accent"). Grounded on `mathtext.py`'s
//! `_accent`-style handling: fixed accents draw a combining-mark [`crate::node::Node::Accent`]
//! centered over the nucleus hpacked to the nucleus's own width; the *wide* accents instead select
//! a sized variant from [`crate::font::Fonts::get_sized_alternatives`] matching the nucleus width,
//! the same selection [`super::pick_sized_variant`] uses for delimiters and radicals.

use super::script::center_to_width;
use super::{NucleusKind, Parser};
use crate::error::{ParseError, ParseResult};
use crate::layout::pack::{vpack, PackMode};
use crate::node::{AccentNode, List, Node};
use crate::tables;

/// Vertical gap left between the accent glyph and the nucleus, in units of rule thickness
/// (§4.3 "Accents": "`2×thickness` vertical space").
const GAP_THICKNESSES: f64 = 2.0;

/// Both the control-word spellings (`\hat`, `\widehat`, …) and the control-symbol spellings
/// (`` \` ``, `\'`, `\"`, `\~`, `\.`, `\^`) are read by a single [`Parser::try_read_command`] call
/// — it already treats a lone non-letter after `\` as a one-character command name, and
/// [`tables::FIXED_ACCENTS`] lists both spellings' names.
pub(crate) fn try_parse(parser: &mut Parser) -> ParseResult<Option<(Node, NucleusKind)>> {
    if !parser.input.starts_with('\\') {
        return Ok(None);
    }
    let saved = parser.input;
    let name = match parser.try_read_command() {
        Some(n) => n,
        None => return Ok(None),
    };

    if let Some(&(_, mark)) = tables::WIDE_ACCENTS.iter().find(|(n, _)| *n == name) {
        return Ok(Some(wide_accent(parser, mark)?));
    }
    if let Some(&(_, mark)) = tables::FIXED_ACCENTS.iter().find(|(n, _)| *n == name) {
        return Ok(Some(fixed_accent(parser, mark, "accent")?));
    }

    parser.input = saved;
    Ok(None)
}

fn fixed_accent(parser: &mut Parser, mark: char, command: &'static str) -> ParseResult<(Node, NucleusKind)> {
    let nucleus = parser
        .placeable()?
        .ok_or(ParseError::MissingArgument { command })?
        .0;

    let role = parser.role();
    let fontsize = parser.fontsize();
    let dpi = parser.dpi();
    let metrics = parser
        .fonts
        .get_metrics(role, mark, fontsize, dpi, &mut parser.warnings)
        .map_err(|_| ParseError::UnrecognizedSymbol(mark))?;
    let accent = Node::Accent(AccentNode {
        codepoint: mark,
        font: font_name(role),
        fontsize,
        dpi,
        metrics,
        size_level: 0,
    });

    Ok((stack_over_nucleus(parser, accent, nucleus, role, fontsize, dpi), NucleusKind::Ordinary))
}

fn wide_accent(parser: &mut Parser, mark: char) -> ParseResult<(Node, NucleusKind)> {
    let nucleus = parser
        .placeable()?
        .ok_or(ParseError::MissingArgument { command: "widehat" })?
        .0;

    let role = parser.role();
    let fontsize = parser.fontsize();
    let dpi = parser.dpi();
    let target_width = nucleus.width();
    let accent = super::pick_sized_variant(parser, role, mark, fontsize, target_width)?;

    Ok((stack_over_nucleus(parser, accent, nucleus, role, fontsize, dpi), NucleusKind::Ordinary))
}

/// Center `accent` over `nucleus` hpacked to the nucleus's own width, separated by `2×thickness`
/// of vertical space, then stack them in a `Vlist` with the nucleus's own baseline preserved.
fn stack_over_nucleus(
    parser: &mut Parser,
    accent: Node,
    nucleus: Node,
    role: crate::font::FontRole,
    fontsize: f64,
    dpi: f64,
) -> Node {
    let thickness = parser.fonts.get_underline_thickness(role, fontsize, dpi);
    let gap = thickness.scale(GAP_THICKNESSES);
    let width = nucleus.width();

    let accent_centered = center_to_width(accent, width, &mut parser.warnings);
    let accent_extent = accent_centered.height() + accent_centered.depth();

    // `nucleus` may be a bare `Node::Char` (e.g. `\hat x` with no braces) — always wrap it the
    // same way `center_to_width` does before it becomes a direct child of this `Vlist`, since a
    // bare `Char` inside a `Vlist` is a fatal internal-invariant violation at ship time.
    let nucleus_centered = center_to_width(nucleus, width, &mut parser.warnings);

    let mut vlist = List::new();
    vlist.contents.push(accent_centered);
    vlist.contents.push(Node::Kern(gap));
    vlist.contents.push(nucleus_centered);
    vpack(&mut vlist, PackMode::Additional(0), crate::dimensions::Unit::INFINITE, &mut parser.warnings);

    vlist.shift = -(accent_extent + gap);
    Node::Vlist(vlist)
}

fn font_name(role: crate::font::FontRole) -> String {
    use crate::font::FontRole;
    match role {
        FontRole::Roman => "rm",
        FontRole::Italic => "it",
        FontRole::Bold => "bf",
        FontRole::SansSerif => "sf",
        FontRole::Monospace => "tt",
        FontRole::Calligraphic => "cal",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::font::bakoma::Bakoma;
    use crate::font::Fonts;

    fn parser_for<'i, 'f>(input: &'i str, fonts: &'f mut Fonts) -> Parser<'i, 'f> {
        Parser {
            original: input,
            input,
            fonts,
            stack: vec![super::super::State { font: "it".to_string(), fontsize: 10.0, dpi: 100.0 }],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn fixed_accent_stacks_mark_over_nucleus() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\hat{x}", &mut fonts);
        let (node, kind) = try_parse(&mut parser).unwrap().unwrap();
        assert_eq!(kind, NucleusKind::Ordinary);
        match node {
            Node::Vlist(list) => assert_eq!(list.contents.len(), 3),
            other => panic!("expected Vlist, got {:?}", other),
        }
        assert!(parser.is_empty());
    }

    #[test]
    fn fixed_accent_over_a_bare_unbraced_symbol_does_not_panic() {
        // `\hat x` (no braces around the nucleus) resolves to a bare `Node::Char` from `symbol`;
        // it must not end up as a direct `Vlist` child or `ship` panics on the Char-in-Vlist
        // invariant (layout/ship.rs).
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\hat x", &mut fonts);
        let (node, _) = try_parse(&mut parser).unwrap().unwrap();
        match node {
            Node::Vlist(list) => {
                assert!(list.contents.iter().all(|n| !matches!(n, Node::Char(_))));
            }
            other => panic!("expected Vlist, got {:?}", other),
        }
    }

    #[test]
    fn wide_accent_sizes_to_nucleus_width() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\widehat{xy}", &mut fonts);
        let (node, _) = try_parse(&mut parser).unwrap().unwrap();
        assert!(matches!(node, Node::Vlist(_)));
    }

    #[test]
    fn missing_nucleus_is_an_error() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\hat", &mut fonts);
        assert!(try_parse(&mut parser).is_err());
    }

    #[test]
    fn does_not_match_an_unrelated_command() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\frac{1}{2}", &mut fonts);
        assert!(try_parse(&mut parser).unwrap().is_none());
    }
}
