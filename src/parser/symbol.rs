//! Command/symbol resolution: the leaf of the `placeable` grammar production that is neither an
//! accent, a fraction, a square root nor a brace group (§4.3 "symbol"). Grounded on
//! `self._handle_symbol` in the original `Parser` class — resolve through the family's own table
//! first, then the family-independent [`tables::TEX2UNI`] table, then (for a bare non-command
//! character) treat the character itself as the symbol; apply `0.2em` spacing kerns according to
//! [`tables::classify`].

use super::{NucleusKind, Parser};
use crate::error::{ParseResult, Warning};
use crate::font::{FontRole, FALLBACK_GLYPH};
use crate::layout::pack::{hpack, PackMode};
use crate::node::{List, Node};
use crate::tables::{self, SymbolClass};

/// `SCRIPT_SPACE`-independent inter-symbol spacing (§4.3): binary operators and relations get a
/// `0.2em` kern on both sides, punctuation gets one trailing kern, everything else is bare.
const SPACE_EM: f64 = 0.2;

pub(crate) fn try_parse(parser: &mut Parser) -> ParseResult<Option<(Node, NucleusKind)>> {
    if parser.input.starts_with('\\') {
        return try_parse_command(parser);
    }
    match parser.peek() {
        None => Ok(None),
        Some(c) if c == '_' || c == '^' || c == '}' || c == '$' => Ok(None),
        Some(c) => {
            parser.advance(c.len_utf8());
            Ok(Some(symbol_node(parser, parser.role(), c)?))
        }
    }
}

fn try_parse_command(parser: &mut Parser) -> ParseResult<Option<(Node, NucleusKind)>> {
    let name = match parser.try_read_command() {
        Some(n) => n,
        None => return Ok(None),
    };

    if tables::UPRIGHT_FUNCTIONS.contains(&name.as_str()) {
        return Ok(Some((function_name_node(parser, &name)?, NucleusKind::Ordinary)));
    }
    if tables::OVERUNDER_FUNCTIONS.contains(&name.as_str()) {
        return Ok(Some((function_name_node(parser, &name)?, NucleusKind::LargeOp)));
    }

    if let Some(codepoint) = parser.fonts.resolve_command(&name) {
        return Ok(Some(symbol_node(parser, parser.role(), codepoint)?));
    }
    if let Some(&(_, codepoint)) = tables::TEX2UNI.iter().find(|(n, _)| *n == name) {
        return Ok(Some(symbol_node(parser, parser.role(), codepoint)?));
    }

    log::warn!("unrecognized command \\{}, substituting fallback glyph", name);
    parser.warnings.push(Warning::UnknownCommand { name });
    Ok(Some(symbol_node(parser, parser.role(), FALLBACK_GLYPH)?))
}

/// A spelled-out function name (`\lim`, `\sin`, …) is always drawn upright, one roman [`Node`] per
/// letter packed into an `Hlist` (§4.3 "function").
fn function_name_node(parser: &mut Parser, name: &str) -> ParseResult<Node> {
    let mut list = List::new();
    for c in name.chars() {
        list.contents.push(parser.char_node(FontRole::Roman, c)?);
    }
    hpack(&mut list, PackMode::Additional(0), &mut parser.warnings);
    Ok(Node::Hlist(list))
}

fn symbol_node(parser: &mut Parser, role: FontRole, codepoint: char) -> ParseResult<(Node, NucleusKind)> {
    let class = tables::classify(codepoint);
    let kind = match class {
        SymbolClass::LargeOp if tables::DROPSUB_OPERATORS.contains(&codepoint) => NucleusKind::DropSub,
        SymbolClass::LargeOp => NucleusKind::LargeOp,
        _ => NucleusKind::Ordinary,
    };
    let glyph = parser.char_node(role, codepoint)?;
    let node = match class {
        SymbolClass::BinaryOperator | SymbolClass::Relation => {
            let space = Node::Kern(parser.em_width().scale(SPACE_EM));
            let mut list = List::new();
            list.contents.push(space.clone());
            list.contents.push(glyph);
            list.contents.push(space);
            hpack(&mut list, PackMode::Additional(0), &mut parser.warnings);
            Node::Hlist(list)
        }
        SymbolClass::Punctuation => {
            let mut list = List::new();
            list.contents.push(glyph);
            list.contents.push(Node::Kern(parser.em_width().scale(SPACE_EM)));
            hpack(&mut list, PackMode::Additional(0), &mut parser.warnings);
            Node::Hlist(list)
        }
        _ => glyph,
    };
    Ok((node, kind))
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
            stack: vec![super::State { font: "it".to_string(), fontsize: 10.0, dpi: 100.0 }],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn binary_operator_gets_kerns_on_both_sides() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for("+", &mut fonts);
        let (node, kind) = try_parse(&mut parser).unwrap().unwrap();
        assert_eq!(kind, NucleusKind::Ordinary);
        match node {
            Node::Hlist(list) => assert_eq!(list.contents.len(), 3),
            other => panic!("expected an Hlist, got {:?}", other),
        }
    }

    #[test]
    fn bare_letter_is_unwrapped() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for("x", &mut fonts);
        let (node, _) = try_parse(&mut parser).unwrap().unwrap();
        assert!(matches!(node, Node::Char(_)));
    }

    #[test]
    fn sum_command_is_a_large_operator() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\sum", &mut fonts);
        let (_, kind) = try_parse(&mut parser).unwrap().unwrap();
        assert_eq!(kind, NucleusKind::LargeOp);
    }

    #[test]
    fn lim_is_rendered_upright_and_is_an_overunder_operator() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\lim", &mut fonts);
        let (node, kind) = try_parse(&mut parser).unwrap().unwrap();
        assert_eq!(kind, NucleusKind::LargeOp);
        match node {
            Node::Hlist(list) => assert_eq!(list.contents.len(), 3),
            other => panic!("expected an Hlist of three letters, got {:?}", other),
        }
    }

    #[test]
    fn unknown_command_warns_and_substitutes_fallback_glyph() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\notarealcommand", &mut fonts);
        let (node, _) = try_parse(&mut parser).unwrap().unwrap();
        assert!(matches!(node, Node::Char(_)));
        assert!(parser.warnings.iter().any(|w| matches!(w, Warning::UnknownCommand { name } if name == "notarealcommand")));
    }
}
