//! `\frac{num}{den}` (§4.3 "frac"). Grounded on `mathtext.py`'s `Fraction`/`_genfrac`-style layout:
//! both operands shrink one size level, are centered on the wider of the two plus a fixed margin,
//! and are stacked around a rule whose thickness comes from the current font family (§4.1
//! `underline_thickness_em`) — vertically positioned so the rule lines up with the font's axis
//! height rather than with either operand's own baseline.

use super::script::center_to_width;
use super::{NucleusKind, Parser};
use crate::dimensions::Unit;
use crate::error::ParseResult;
use crate::layout::pack::{vpack, PackMode};
use crate::node::{List, Node};

/// Horizontal margin added either side of the wider operand, in units of rule thickness.
const SIDE_MARGIN_THICKNESSES: f64 = 10.0;
/// Gap between the numerator and the rule, in units of rule thickness.
const NUM_GAP_THICKNESSES: f64 = 2.0;
/// Gap between the rule and the denominator, in units of rule thickness.
const DEN_GAP_THICKNESSES: f64 = 4.0;

pub(crate) fn try_parse(parser: &mut Parser) -> ParseResult<Option<(Node, NucleusKind)>> {
    let saved = parser.input;
    if !parser.input.starts_with(r"\frac") || starts_with_letter_after(parser.input, 5) {
        return Ok(None);
    }
    parser.advance(5);
    parser.consume_whitespace();

    let numerator = match parser.group()? {
        Some(n) => n,
        None => {
            parser.input = saved;
            return Err(crate::error::ParseError::MissingArgument { command: "frac" });
        }
    };
    let denominator = match parser.group()? {
        Some(d) => d,
        None => return Err(crate::error::ParseError::MissingArgument { command: "frac" }),
    };

    let role = parser.role();
    let fontsize = parser.fontsize();
    let dpi = parser.dpi();
    let thickness = parser.fonts.get_underline_thickness(role, fontsize, dpi);

    let mut num = numerator;
    let mut den = denominator;
    num.shrink(parser.fonts, &mut parser.warnings);
    den.shrink(parser.fonts, &mut parser.warnings);

    let width = Unit::max(num.width(), den.width()) + thickness.scale(SIDE_MARGIN_THICKNESSES);
    let num_centered = center_to_width(num, width, &mut parser.warnings);
    let den_centered = center_to_width(den, width, &mut parser.warnings);
    let num_extent = num_centered.height() + num_centered.depth();

    let num_gap = thickness.scale(NUM_GAP_THICKNESSES);
    let den_gap = thickness.scale(DEN_GAP_THICKNESSES);

    let mut vlist = List::new();
    vlist.contents.push(num_centered);
    vlist.contents.push(Node::Kern(num_gap));
    vlist.contents.push(Node::Rule { width, height: thickness, depth: Unit::ZERO });
    vlist.contents.push(Node::Kern(den_gap));
    vlist.contents.push(den_centered);
    vpack(&mut vlist, PackMode::Additional(0), Unit::INFINITE, &mut parser.warnings);

    let axis_height = axis_height(parser, role, fontsize, dpi);
    vlist.shift = -(axis_height + num_extent + num_gap + thickness.scale(0.5));

    Ok(Some((Node::Vlist(vlist), NucleusKind::Ordinary)))
}

/// Half the height of the family's `=` glyph: the vertical midpoint TeX calls "axis height",
/// approximated here by the ink-top of a symmetric relation glyph (§9 "axis height approximation").
fn axis_height(parser: &mut Parser, role: crate::font::FontRole, fontsize: f64, dpi: f64) -> Unit {
    match parser.fonts.get_metrics(role, '=', fontsize, dpi, &mut parser.warnings) {
        Ok(metrics) => metrics.height.scale(0.5),
        Err(_) => Unit::ZERO,
    }
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
    fn parses_frac_with_two_groups() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for("{1}{2}", &mut fonts);
        let (node, kind) = try_parse(&mut parser).unwrap().unwrap();
        assert_eq!(kind, NucleusKind::Ordinary);
        match node {
            Node::Vlist(list) => assert_eq!(list.contents.len(), 5),
            other => panic!("expected Vlist, got {:?}", other),
        }
        assert!(parser.is_empty());
    }

    #[test]
    fn missing_denominator_is_an_error() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for("{1}", &mut fonts);
        assert!(try_parse(&mut parser).is_err());
    }

    #[test]
    fn does_not_match_a_longer_command_name() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\fracture", &mut fonts);
        assert!(try_parse(&mut parser).unwrap().is_none());
    }
}
