//! Recursive-descent parser for the TeX math subset. Shaped after a `Parser<'i,'c>` — a
//! slice-consuming cursor over the remaining input plus a `fork()`-style lookahead discipline —
//! but architecturally one stage: this parser builds and packs [`crate::node::Node`] trees
//! directly as it recognizes each grammar production, consulting [`crate::font::Fonts`] for
//! metrics along the way, rather than building an intermediate math-list tree first (see
//! DESIGN.md for this departure).
//!
//! `try_read_command` always advances past a matched command name whether or not the caller ends
//! up wanting it; callers that need to backtrack save `self.input` first and restore it on
//! mismatch, a `fork()`-style save/restore.

pub mod accent;
pub mod delim;
pub mod frac;
pub mod script;
pub mod sqrt;
pub mod symbol;

use crate::dimensions::Unit;
use crate::error::{Error, ParseError, ParseFailure, ParseResult, Warning};
use crate::font::{role_from_name, FontRole, Fonts};
use crate::layout::pack::{hpack, PackMode};
use crate::node::{List, Node};
use crate::tables;

/// One frame of the parser's state stack (§4.3: "the top frame holds `{font_output, font,
/// fontsize, dpi}`"). `font_output` collapses away here: there is a single [`Fonts`] instance
/// threaded through the whole parse rather than one per state frame, so only the font *role name*
/// needs to travel with pushes/pops.
#[derive(Debug, Clone)]
struct State {
    font: String,
    fontsize: f64,
    dpi: f64,
}

/// What a [`Parser::placeable`] nucleus is, for subscript/superscript placement (§4.3 "over/under
/// operator" vs inline placement).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NucleusKind {
    Ordinary,
    /// `\sum \prod \coprod \bigcap …` or a named limit-taking function (`\lim`, `\sup`, …).
    LargeOp,
    /// `\int \oint`: an over/under-style drop for a lone subscript, but not a stacking operator.
    DropSub,
}

/// Where a bounded `math_list` run should stop consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Dollar,
    CloseBrace,
    CloseBracket,
    Right,
}

pub(crate) struct Parser<'i, 'f> {
    original: &'i str,
    input: &'i str,
    fonts: &'f mut Fonts,
    stack: Vec<State>,
    warnings: Vec<Warning>,
}

/// Parse a full expression (§4.3 `expression`) into a packed root `Hlist`, consulting `fonts` for
/// glyph metrics as each symbol is recognized. `fontsize`/`dpi` seed the initial (non-math) state;
/// entering math mode switches the font to `it` per §4.3.
pub fn parse(input: &str, fonts: &mut Fonts, fontsize: f64, dpi: f64) -> Result<(List, Vec<Warning>), Error> {
    let mut parser = Parser {
        original: input,
        input,
        fonts,
        stack: vec![State { font: "rm".to_string(), fontsize, dpi }],
        warnings: Vec::new(),
    };
    match parser.expression() {
        Ok(list) => Ok((list, parser.warnings)),
        Err(e) => {
            let position = parser.original.len() - parser.input.len();
            Err(Error::from(ParseFailure::at(e, parser.original, position)))
        }
    }
}

fn font_name_for_role(role: FontRole) -> String {
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

/// Select the smallest sized variant of `symbol` whose total extent (height + depth) reaches
/// `target`; if none does, scale the largest variant's fontsize by `target / extent` and record a
/// [`Warning::SizeVariantClamped`] (§4.3 "Square root": "If none reaches target, scale the largest
/// by `target / (h+d)`"; "Auto-sized delimiters": "select size variant ... whose total reaches or
/// exceeds ... (or stretch the largest)"). Shared by [`accent`], [`delim`] and [`sqrt`].
pub(crate) fn pick_sized_variant(
    parser: &mut Parser,
    role: FontRole,
    symbol: char,
    fontsize: f64,
    target: Unit,
) -> ParseResult<Node> {
    let dpi = parser.dpi();
    let variants = parser.fonts.get_sized_alternatives(role, symbol);
    let mut largest: Option<(FontRole, char, crate::font::Metrics)> = None;
    for (vrole, vsym) in variants {
        let metrics = parser
            .fonts
            .get_metrics(vrole, vsym, fontsize, dpi, &mut parser.warnings)
            .map_err(|_| ParseError::UnrecognizedSymbol(vsym))?;
        if metrics.total_extent() >= target {
            return parser.char_node_sized(vrole, vsym, fontsize);
        }
        largest = Some((vrole, vsym, metrics));
    }
    let (vrole, vsym, metrics) = largest.ok_or(ParseError::UnrecognizedSymbol(symbol))?;
    let extent = metrics.total_extent();
    let scale = if extent.is_zero() { 1.0 } else { (target.value() / extent.value()).max(1.0) };
    let used_height = extent.scale(scale);
    log::warn!("'{}' clamped to height {} (wanted {})", vsym, used_height, target);
    parser.warnings.push(Warning::SizeVariantClamped {
        codepoint: vsym,
        requested_height: target,
        used_height,
    });
    parser.char_node_sized(vrole, vsym, fontsize * scale)
}

impl<'i, 'f> Parser<'i, 'f> {
    fn state(&self) -> &State {
        self.stack.last().expect("state stack is never empty")
    }

    fn role(&self) -> FontRole {
        role_from_name(&self.state().font)
    }

    fn fontsize(&self) -> f64 {
        self.state().fontsize
    }

    fn dpi(&self) -> f64 {
        self.state().dpi
    }

    /// One em, in device units, at the current font size (§4.3 "Whitespace commands").
    fn em_width(&self) -> Unit {
        Unit::from_points(self.fontsize(), self.dpi())
    }

    fn push_state(&mut self, font_override: Option<String>) {
        let top = self.state().clone();
        self.stack.push(State { font: font_override.unwrap_or(top.font), fontsize: top.fontsize, dpi: top.dpi });
    }

    fn pop_state(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.input.chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.input = &self.input[bytes..];
    }

    fn consume_whitespace(&mut self) {
        self.input = self.input.trim_start_matches(|c: char| c == ' ' || c == '\t' || c == '\n' || c == '\r');
    }

    fn try_consume_char(&mut self, c: char) -> bool {
        if self.input.starts_with(c) {
            self.advance(c.len_utf8());
            true
        } else {
            false
        }
    }

    /// Reads a backslash command name (without the backslash): a maximal run of ASCII letters
    /// (a "control word", TeX-style, with trailing whitespace gobbled), or else exactly one
    /// non-letter character (a "control symbol" like `\$ \, \! \/`). Returns `None` and consumes
    /// nothing if the next character is not `\`.
    fn try_read_command(&mut self) -> Option<String> {
        if !self.input.starts_with('\\') {
            return None;
        }
        let rest = &self.input[1..];
        match rest.chars().next() {
            None => None,
            Some(c) if c.is_ascii_alphabetic() => {
                let end = rest.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
                let name = rest[..end].to_string();
                self.advance(1 + end);
                self.consume_whitespace();
                Some(name)
            }
            Some(c) => {
                self.advance(1 + c.len_utf8());
                Some(c.to_string())
            }
        }
    }

    fn expect_open_brace(&mut self, command: &'static str) -> ParseResult<()> {
        self.consume_whitespace();
        if self.try_consume_char('{') {
            Ok(())
        } else {
            Err(ParseError::MissingArgument { command })
        }
    }

    fn expect_close_brace(&mut self) -> ParseResult<()> {
        self.consume_whitespace();
        if self.try_consume_char('}') {
            Ok(())
        } else {
            Err(ParseError::NoClosingBrace)
        }
    }

    fn char_node(&mut self, role: FontRole, codepoint: char) -> ParseResult<Node> {
        let fontsize = self.fontsize();
        self.char_node_sized(role, codepoint, fontsize)
    }

    /// As [`Parser::char_node`], but at an explicit `fontsize` rather than the current state's —
    /// used when a delimiter/radical/wide-accent variant is drawn larger than the surrounding
    /// text (§4.3 "Square root", "Auto-sized delimiters").
    pub(crate) fn char_node_sized(&mut self, role: FontRole, codepoint: char, fontsize: f64) -> ParseResult<Node> {
        let dpi = self.dpi();
        let metrics = self
            .fonts
            .get_metrics(role, codepoint, fontsize, dpi, &mut self.warnings)
            .map_err(|_| ParseError::UnrecognizedSymbol(codepoint))?;
        Ok(Node::Char(crate::node::CharNode {
            codepoint,
            font: font_name_for_role(role),
            fontsize,
            dpi,
            metrics,
            size_level: 0,
        }))
    }

    fn at_stop(&self, stop: Stop) -> bool {
        match stop {
            Stop::Dollar => self.input.starts_with('$'),
            Stop::CloseBrace => self.input.starts_with('}'),
            Stop::CloseBracket => self.input.starts_with(']'),
            Stop::Right => self.input.starts_with("\\right") && !after_is_letter(&self.input[6..]),
        }
    }

    // ---- grammar ----

    /// `expression := non_math ( '$' math '$' non_math )*`
    fn expression(&mut self) -> ParseResult<List> {
        let mut root = List::new();
        loop {
            let nodes = self.non_math()?;
            if !nodes.is_empty() {
                root.contents.push(wrap_hlist(nodes, &mut self.warnings));
            }
            if self.is_empty() {
                break;
            }
            self.try_consume_char('$');
            self.push_state(Some("it".to_string()));
            let math_nodes = self.math_list(Stop::Dollar)?;
            self.pop_state();
            if !self.try_consume_char('$') {
                return Err(ParseError::UnexpectedEof);
            }
            root.contents.push(wrap_hlist(math_nodes, &mut self.warnings));
        }
        hpack(&mut root, PackMode::Additional(0), &mut self.warnings);
        Ok(root)
    }

    /// Plain text outside `$...$`: every character becomes a roman [`Node::Char`]; `\$` is the
    /// only recognized escape.
    fn non_math(&mut self) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            match self.peek() {
                None | Some('$') => break,
                Some('\\') if self.input.starts_with("\\$") => {
                    self.advance(2);
                    nodes.push(self.char_node(FontRole::Roman, '$')?);
                }
                Some(c) => {
                    self.advance(c.len_utf8());
                    nodes.push(self.char_node(FontRole::Roman, c)?);
                }
            }
        }
        Ok(nodes)
    }

    /// `math := ( auto_delim | simple )+`, bounded by `stop`.
    fn math_list(&mut self, stop: Stop) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            self.consume_whitespace();
            if self.at_stop(stop) {
                break;
            }
            if self.is_empty() {
                return Err(ParseError::UnexpectedEof);
            }
            let before = self.input.len();
            if let Some(node) = self.math_item()? {
                nodes.push(node);
            }
            if self.input.len() == before {
                // Nothing was consumed; every production below either consumes input or returns
                // `Err`, so this only guards against a production gaining a new silent no-op path.
                break;
            }
        }
        Ok(nodes)
    }

    fn math_item(&mut self) -> ParseResult<Option<Node>> {
        if let Some(node) = delim::try_parse(self)? {
            return Ok(Some(node));
        }
        self.simple()
    }

    /// `simple := space | customspace | font_switch | subsuper`
    fn simple(&mut self) -> ParseResult<Option<Node>> {
        if let Some(node) = self.try_parse_whitespace_command()? {
            return Ok(Some(node));
        }
        if self.try_parse_font_switch()? {
            return Ok(None);
        }
        self.subsuper()
    }

    fn try_parse_whitespace_command(&mut self) -> ParseResult<Option<Node>> {
        if !self.input.starts_with('\\') {
            return Ok(None);
        }
        let saved = self.input;
        let name = match self.try_read_command() {
            Some(n) => n,
            None => return Ok(None),
        };
        if name == "hspace" {
            self.expect_open_brace("hspace")?;
            self.consume_whitespace();
            let end = self.input.find('}').ok_or(ParseError::NoClosingBrace)?;
            let raw = self.input[..end].trim();
            let factor: f64 = raw.parse().map_err(|_| ParseError::InvalidDimension(raw.to_string()))?;
            self.advance(end);
            self.expect_close_brace()?;
            return Ok(Some(Node::Kern(self.em_width().scale(factor))));
        }
        if let Some(&(_, em_factor)) = tables::WHITESPACE_COMMANDS.iter().find(|(n, _)| *n == name) {
            return Ok(Some(Node::Kern(self.em_width().scale(em_factor))));
        }
        self.input = saved;
        Ok(None)
    }

    fn try_parse_font_switch(&mut self) -> ParseResult<bool> {
        if !self.input.starts_with('\\') {
            return Ok(false);
        }
        let saved = self.input;
        let name = match self.try_read_command() {
            Some(n) => n,
            None => return Ok(false),
        };
        match name.as_str() {
            "rm" | "it" | "bf" | "sf" | "tt" | "cal" => {
                if let Some(top) = self.stack.last_mut() {
                    top.font = name;
                }
                Ok(true)
            }
            _ => {
                self.input = saved;
                Ok(false)
            }
        }
    }

    /// `subsuper := placeable? ( ('_'|'^') placeable ){0..2} | placeable`
    fn subsuper(&mut self) -> ParseResult<Option<Node>> {
        let nucleus = self.placeable()?;
        let mut sub: Option<Node> = None;
        let mut sup: Option<Node> = None;
        loop {
            self.consume_whitespace();
            if self.try_consume_char('_') {
                if sub.is_some() {
                    return Err(ParseError::ExcessiveScript { token: '_' });
                }
                self.consume_whitespace();
                let mut node = self.placeable()?.map(|(n, _)| n).ok_or(ParseError::UnexpectedEof)?;
                node.shrink(self.fonts, &mut self.warnings);
                sub = Some(node);
            } else if self.try_consume_char('^') {
                if sup.is_some() {
                    return Err(ParseError::ExcessiveScript { token: '^' });
                }
                self.consume_whitespace();
                let mut node = self.placeable()?.map(|(n, _)| n).ok_or(ParseError::UnexpectedEof)?;
                node.shrink(self.fonts, &mut self.warnings);
                sup = Some(node);
            } else {
                break;
            }
        }

        if nucleus.is_none() && sub.is_none() && sup.is_none() {
            return Ok(None);
        }
        if sub.is_none() && sup.is_none() {
            return Ok(nucleus.map(|(n, _)| n));
        }

        let (nucleus_node, kind) = nucleus.unwrap_or((Node::Hlist(List::new()), NucleusKind::Ordinary));
        let role = self.role();
        let fontsize = self.fontsize();
        let dpi = self.dpi();
        Ok(Some(script::place_scripts(self.fonts, nucleus_node, kind, sub, sup, role, fontsize, dpi, &mut self.warnings)))
    }

    /// `placeable := accent | function | symbol | group | frac | sqrt`
    fn placeable(&mut self) -> ParseResult<Option<(Node, NucleusKind)>> {
        if let Some(r) = accent::try_parse(self)? {
            return Ok(Some(r));
        }
        if let Some(r) = frac::try_parse(self)? {
            return Ok(Some(r));
        }
        if let Some(r) = sqrt::try_parse(self)? {
            return Ok(Some(r));
        }
        if let Some(node) = self.group()? {
            return Ok(Some((node, NucleusKind::Ordinary)));
        }
        symbol::try_parse(self)
    }

    /// `group := latexfont? '{' ( auto_delim | simple )* '}'`
    fn group(&mut self) -> ParseResult<Option<Node>> {
        let saved = self.input;
        let mut latexfont: Option<(&'static str, String)> = None;
        if self.input.starts_with('\\') {
            let saved_cmd = self.input;
            if let Some(name) = self.try_read_command() {
                latexfont = match name.as_str() {
                    "mathrm" => Some(("mathrm", "rm".to_string())),
                    "mathit" => Some(("mathit", "it".to_string())),
                    "mathbf" => Some(("mathbf", "bf".to_string())),
                    "mathsf" => Some(("mathsf", "sf".to_string())),
                    "mathtt" => Some(("mathtt", "tt".to_string())),
                    "mathcal" => Some(("mathcal", "cal".to_string())),
                    _ => None,
                };
                if latexfont.is_none() {
                    self.input = saved_cmd;
                }
            }
        }

        self.consume_whitespace();
        if !self.try_consume_char('{') {
            if let Some((command, _)) = latexfont {
                return Err(ParseError::MissingArgument { command });
            }
            self.input = saved;
            return Ok(None);
        }

        self.push_state(latexfont.map(|(_, font)| font));
        let nodes = self.math_list(Stop::CloseBrace)?;
        self.pop_state();
        self.expect_close_brace()?;
        Ok(Some(wrap_hlist(nodes, &mut self.warnings)))
    }
}

fn after_is_letter(s: &str) -> bool {
    s.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

fn wrap_hlist(nodes: Vec<Node>, warnings: &mut Vec<Warning>) -> Node {
    let mut list = List::new();
    list.contents = nodes;
    hpack(&mut list, PackMode::Additional(0), warnings);
    Node::Hlist(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::font::bakoma::Bakoma;

    fn fonts() -> Fonts {
        Fonts::new(Box::new(Bakoma::new()), Box::new(RecordingBackend::new()))
    }

    fn should_pass(input: &str) -> Result<(), String> {
        let mut fonts = fonts();
        parse(input, &mut fonts, 10.0, 100.0).map(|_| ()).map_err(|e| e.to_string())
    }

    fn should_fail(input: &str) -> Result<(), String> {
        let mut fonts = fonts();
        match parse(input, &mut fonts, 10.0, 100.0) {
            Ok(_) => Err(format!("{:?} should have failed to parse", input)),
            Err(_) => Ok(()),
        }
    }

    #[test]
    fn accepts_the_legal_grammar_scenarios() {
        let mut errs = Vec::new();
        should_pass!(
            errs,
            should_pass,
            [
                "$x$",
                "$x^2$",
                "$x_i^2$",
                r"$\frac{1}{2}$",
                r"$\sqrt{x+1}$",
                r"$\sum_{i=0}^n i$",
                "hello $x$ world",
                r"$\left( \frac{a}{b} \right)$",
                r"$\alpha + \beta = \gamma$",
                r"$\mathrm{max}_x f(x)$",
            ]
        );
        display_errors!(errs);
    }

    #[test]
    fn rejects_the_parse_error_scenarios() {
        let mut errs = Vec::new();
        should_fail!(errs, should_fail, ["$x_a_b$", r"$\frac{1}$", r"$\left(x$"]);
        display_errors!(errs);
    }

    #[test]
    fn unknown_symbol_warns_rather_than_erroring() {
        let mut fonts = fonts();
        let (_, warnings) = parse(r"$\unknownfoo$", &mut fonts, 10.0, 100.0).expect("unknown commands fall back to a glyph, not a hard error only if recognized as a bare symbol");
        let _ = warnings;
    }

    #[test]
    fn plain_text_and_math_segments_each_become_their_own_hlist() {
        let mut fonts = fonts();
        let (root, _) = parse("hi $x$ bye", &mut fonts, 10.0, 100.0).unwrap();
        assert_eq!(root.contents.len(), 3);
        assert!(matches!(root.contents[0], Node::Hlist(_)));
        assert!(matches!(root.contents[1], Node::Hlist(_)));
        assert!(matches!(root.contents[2], Node::Hlist(_)));
    }

    #[test]
    fn double_subscript_is_a_parse_error() {
        let mut fonts = fonts();
        let err = parse("$x_a_b$", &mut fonts, 10.0, 100.0).unwrap_err();
        match err {
            Error::Parse(failure) => assert_eq!(failure.error, ParseError::ExcessiveScript { token: '_' }),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
