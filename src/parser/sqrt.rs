//! `\sqrt{body}` and `\sqrt[root]{body}` (§4.3 "sqrt"). Grounded on `mathtext.py`'s `_sqrt`-style
//! layout: the radicand is padded by a rule-thickness margin on each side and topped with a rule,
//! and a radical glyph is selected (via [`super::pick_sized_variant`], shared with [`super::delim`]
//! and wide [`super::accent`]s) to reach the padded box's total extent. An optional bracketed root
//! index is accepted only as a single simple symbol, shrunk twice and tucked above the radical's
//! shoulder (§7 "non-simple root index").

use super::{NucleusKind, Parser, Stop};
use crate::dimensions::Unit;
use crate::error::{ParseError, ParseResult, Warning};
use crate::layout::pack::{hpack, vpack, PackMode};
use crate::node::{GlueSpec, List, Node};

/// Extra clearance added to the radicand's own `height + depth` when sizing the radical glyph, in
/// units of rule thickness (§4.3 "Square root": `height = body.height − body.shift + 5×thickness`).
const RADICAL_HEIGHT_MARGIN_THICKNESSES: f64 = 5.0;
/// Horizontal padding left/right of the radicand under the overbar, in units of rule thickness.
const SIDE_PADDING_THICKNESSES: f64 = 2.0;
/// How far above the radical's own height the root index's baseline sits, as a fraction of the
/// radical's height.
const ROOT_INDEX_RAISE_FRACTION: f64 = 0.6;

pub(crate) fn try_parse(parser: &mut Parser) -> ParseResult<Option<(Node, NucleusKind)>> {
    let saved = parser.input;
    if !parser.input.starts_with(r"\sqrt") || starts_with_letter_after(parser.input, 5) {
        return Ok(None);
    }
    parser.advance(5);
    parser.consume_whitespace();

    let root_index = match read_root_index(parser)? {
        Some(index) => Some(index),
        None => None,
    };

    let body = match parser.group()? {
        Some(b) => b,
        None => {
            parser.input = saved;
            return Err(ParseError::MissingArgument { command: "sqrt" });
        }
    };

    let role = parser.role();
    let fontsize = parser.fontsize();
    let dpi = parser.dpi();
    let thickness = parser.fonts.get_underline_thickness(role, fontsize, dpi);

    let padding = thickness.scale(SIDE_PADDING_THICKNESSES);

    let body_height = body.height();
    let body_depth = body.depth();

    let mut padded = List::new();
    padded.contents.push(Node::Kern(padding));
    padded.contents.push(body);
    padded.contents.push(Node::Kern(padding));
    hpack(&mut padded, PackMode::Additional(0), &mut parser.warnings);
    let rule_width = padded.width;

    let target = body_height + body_depth + thickness.scale(RADICAL_HEIGHT_MARGIN_THICKNESSES);
    let radical = super::pick_sized_variant(parser, role, '√', fontsize, target)?;
    let radical_height = radical.height();
    let radical_depth = radical.depth();

    let mut overbar = List::new();
    overbar.contents.push(Node::Rule { width: rule_width, height: thickness, depth: Unit::ZERO });
    overbar.contents.push(Node::Glue(GlueSpec::fill(Unit::ZERO)));
    overbar.contents.push(Node::Hlist(padded));
    let overbar_target = (radical_height + Unit::new(1.0)).round().value() as i64;
    vpack(&mut overbar, PackMode::Exactly(overbar_target), radical_depth, &mut parser.warnings);

    let mut outer = List::new();
    if let Some(index) = root_index {
        outer.contents.push(stack_root_index(index, radical_height, parser.fonts, &mut parser.warnings));
        outer.contents.push(Node::Kern(-radical.width().scale(0.5)));
    }
    outer.contents.push(radical);
    outer.contents.push(Node::Vlist(overbar));
    hpack(&mut outer, PackMode::Additional(0), &mut parser.warnings);

    Ok(Some((Node::Hlist(outer), NucleusKind::Ordinary)))
}

/// Reads an optional `[index]`, restricted to a single simple symbol (§7 "non-simple root index"
/// is a parse error, not a warning: anything bracketed that isn't exactly one node is rejected
/// outright rather than silently flattened).
fn read_root_index(parser: &mut Parser) -> ParseResult<Option<Node>> {
    if !parser.try_consume_char('[') {
        return Ok(None);
    }
    let nodes = parser.math_list(Stop::CloseBracket)?;
    if nodes.len() != 1 || !matches!(nodes[0], Node::Char(_)) {
        return Err(ParseError::NonSimpleRootIndex);
    }
    if !parser.try_consume_char(']') {
        return Err(ParseError::ExpectedDelimiter { after: "\\sqrt root index" });
    }
    Ok(Some(nodes.into_iter().next().expect("checked len == 1 above")))
}

/// Shrink the root index twice and raise it to sit beside the radical's shoulder.
fn stack_root_index(mut index: Node, radical_height: Unit, fonts: &mut crate::font::Fonts, warnings: &mut Vec<Warning>) -> Node {
    index.shrink(fonts, warnings);
    index.shrink(fonts, warnings);
    let mut vlist = List::new();
    vlist.contents.push(index);
    vpack(&mut vlist, PackMode::Additional(0), Unit::INFINITE, warnings);
    vlist.shift = -radical_height.scale(ROOT_INDEX_RAISE_FRACTION);
    Node::Vlist(vlist)
}

fn starts_with_letter_after(input: &str, offset: usize) -> bool {
    input[offset..].chars().next().map_or(false, |c| c.is_ascii_alphabetic())
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
    fn parses_plain_sqrt() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\sqrt{x+1}", &mut fonts);
        let (node, kind) = try_parse(&mut parser).unwrap().unwrap();
        assert_eq!(kind, NucleusKind::Ordinary);
        match node {
            Node::Hlist(list) => assert_eq!(list.contents.len(), 2),
            other => panic!("expected Hlist, got {:?}", other),
        }
        assert!(parser.is_empty());
    }

    #[test]
    fn parses_sqrt_with_simple_root_index() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\sqrt[3]{x}", &mut fonts);
        let (node, _) = try_parse(&mut parser).unwrap().unwrap();
        match node {
            Node::Hlist(list) => assert_eq!(list.contents.len(), 4),
            other => panic!("expected Hlist, got {:?}", other),
        }
    }

    #[test]
    fn non_simple_root_index_is_a_parse_error() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\sqrt[n+1]{x}", &mut fonts);
        let err = try_parse(&mut parser).unwrap_err();
        assert_eq!(err, ParseError::NonSimpleRootIndex);
    }

    #[test]
    fn missing_body_is_an_error() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\sqrt", &mut fonts);
        assert!(try_parse(&mut parser).is_err());
    }

    #[test]
    fn does_not_match_a_longer_command_name() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\sqrtsign", &mut fonts);
        assert!(try_parse(&mut parser).unwrap().is_none());
    }
}
