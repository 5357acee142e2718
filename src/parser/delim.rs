//! `\left X ... \right Y` auto-sized delimiters (§4.3 "auto_delim"). Grounded on `mathtext.py`'s
//! `_auto_sized_delimiter`: the enclosed list is laid out first so its total `height+depth` is
//! known, then each delimiter is resolved to the smallest sized variant (via
//! [`super::pick_sized_variant`], shared with [`super::sqrt`] and [`super::accent`]'s wide
//! accents) that reaches that extent. `.` denotes "no visible glyph" on either side.

use super::{Parser, Stop};
use crate::error::ParseError;
use crate::layout::pack::{hpack, PackMode};
use crate::node::{List, Node};
use crate::tables;

pub(crate) fn try_parse(parser: &mut Parser) -> crate::error::ParseResult<Option<Node>> {
    let saved = parser.input;
    if !parser.input.starts_with(r"\left") || starts_with_letter_after(parser.input, 5) {
        return Ok(None);
    }
    parser.advance(5);

    let left = match read_delimiter(parser)? {
        Ok(c) => c,
        Err(()) => {
            parser.input = saved;
            return Err(ParseError::ExpectedDelimiter { after: "\\left" });
        }
    };

    let inner_nodes = parser.math_list(Stop::Right)?;
    if !parser.input.starts_with(r"\right") {
        return Err(ParseError::ExpectedDelimiter { after: "\\right" });
    }
    parser.advance(6);
    let right = match read_delimiter(parser)? {
        Ok(c) => c,
        Err(()) => return Err(ParseError::ExpectedDelimiter { after: "\\right" }),
    };

    let mut inner = List::new();
    inner.contents = inner_nodes;
    hpack(&mut inner, PackMode::Additional(0), &mut parser.warnings);
    let target = inner.height + inner.depth;

    let role = parser.role();
    let fontsize = parser.fontsize();

    let mut result = List::new();
    if let Some(c) = left {
        result.contents.push(super::pick_sized_variant(parser, role, c, fontsize, target)?);
    }
    result.contents.push(Node::Hlist(inner));
    if let Some(c) = right {
        result.contents.push(super::pick_sized_variant(parser, role, c, fontsize, target)?);
    }
    hpack(&mut result, PackMode::Additional(0), &mut parser.warnings);
    Ok(Some(Node::Hlist(result)))
}

/// Reads one delimiter token: `.` (no glyph, `Ok(None)`), a recognized backslash command
/// (`\langle`, `\lceil`, …), or a single recognized literal character. `Err(())` if the next
/// token is not a valid delimiter at all, distinguished from `Ok(None)` so the caller can tell
/// "no delimiter here" from "deliberately no glyph".
fn read_delimiter(parser: &mut Parser) -> crate::error::ParseResult<Result<Option<char>, ()>> {
    parser.consume_whitespace();
    if parser.try_consume_char('.') {
        return Ok(Ok(None));
    }
    if parser.input.starts_with('\\') {
        let saved = parser.input;
        let name = match parser.try_read_command() {
            Some(n) => n,
            None => return Ok(Err(())),
        };
        if let Some(&(_, c)) = tables::TEX2UNI.iter().find(|(n, _)| *n == name) {
            if tables::DELIMITERS.contains(&c) {
                return Ok(Ok(Some(c)));
            }
        }
        parser.input = saved;
        return Ok(Err(()));
    }
    match parser.peek() {
        Some(c) if tables::DELIMITERS.contains(&c) => {
            parser.advance(c.len_utf8());
            Ok(Ok(Some(c)))
        }
        _ => Ok(Err(())),
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
    fn parses_parenthesized_fraction() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\left( \frac{a}{b} \right)", &mut fonts);
        let node = try_parse(&mut parser).unwrap().unwrap();
        match node {
            Node::Hlist(list) => assert_eq!(list.contents.len(), 3),
            other => panic!("expected Hlist, got {:?}", other),
        }
        assert!(parser.is_empty());
    }

    #[test]
    fn dot_delimiter_renders_no_glyph_on_that_side() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\left. x \right)", &mut fonts);
        let node = try_parse(&mut parser).unwrap().unwrap();
        match node {
            Node::Hlist(list) => assert_eq!(list.contents.len(), 2),
            other => panic!("expected Hlist, got {:?}", other),
        }
    }

    #[test]
    fn missing_right_is_a_parse_error() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\left(x", &mut fonts);
        assert!(try_parse(&mut parser).is_err());
    }

    #[test]
    fn does_not_match_a_longer_command_name() {
        let mut fonts = Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()));
        let mut parser = parser_for(r"\leftrightarrow", &mut fonts);
        assert!(try_parse(&mut parser).unwrap().is_none());
    }
}
