//! Defines the error and warning types produced at each phase of rendering a formula.
//!   - [`ParseError`]: syntax error in the input (mismatched braces, unknown command, wrong arity).
//!   - [`LayoutError`]: errors raised while packing/shipping an already-parsed tree (missing glyph).
//!   - [`Error`]: the top-level union returned by the crate's public entry point.
//!   - [`Warning`]: non-fatal conditions (unknown symbol, overfull/underfull box) that do not abort
//!     rendering; collected alongside a successful result rather than short-circuiting it.
//!
//! Hand-rolled error enums with manual `fmt::Display` impls, no `thiserror`.

use crate::dimensions::Unit;
use std::fmt;

/// Result type for the [`LayoutError`].
pub type LayoutResult<T> = ::std::result::Result<T, LayoutError>;
/// Result type for the [`ParseError`].
pub type ParseResult<T> = ::std::result::Result<T, ParseError>;

/// Errors raised while packing or shipping an already-parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No metrics are available for this codepoint in the requested font family.
    MissingGlyph { codepoint: char, font: String },
    /// A sized-delimiter/accent request asked for a larger variant than the family provides.
    NoSizedVariant { codepoint: char, requested_height: Unit },
}

/// Syntax error in the input formula.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// `\foo` is not a recognized control sequence.
    UnrecognizedCommand(String),
    /// A character has no entry in any symbol table.
    UnrecognizedSymbol(char),
    /// A `{...}` group was opened but never closed.
    NoClosingBrace,
    /// A `{...}` group was closed without having been opened.
    UnexpectedClosingBrace,
    /// `\left`/`\right` was not followed by a recognized delimiter symbol.
    ExpectedDelimiter { after: &'static str },
    /// `\frac`, `\sqrt`, or an accent command is missing one of its required `{...}` arguments.
    MissingArgument { command: &'static str },
    /// Two `_` or two `^` applied to the same nucleus (`x^2^2`).
    ExcessiveScript { token: char },
    /// `\limits`/`\nolimits` followed something other than a large operator.
    LimitsMustFollowOperator,
    /// Input ended with open groups or a dangling command still expecting an argument.
    UnexpectedEof,
    /// A numeric dimension (e.g. in a manually specified kern) could not be parsed.
    InvalidDimension(String),
    /// `\sqrt[root]{...}`'s root index was not a single simple symbol (§4.3 "sqrt", §7).
    NonSimpleRootIndex,
}

/// A [`ParseError`] anchored to where it occurred in the original input (§6 "Exit behavior":
/// "parse errors throw a domain error carrying the input string, a line-column marker, and a
/// message").
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub error: ParseError,
    pub input: String,
    /// Byte offset into `input` where parsing was positioned when the error was raised.
    pub position: usize,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number (in chars, not bytes).
    pub column: usize,
}

impl ParseFailure {
    /// Builds a [`ParseFailure`] from the full input and a byte offset, computing the line/column
    /// marker by scanning the consumed prefix.
    pub fn at(error: ParseError, input: &str, position: usize) -> Self {
        let consumed = &input[..position];
        let line = consumed.matches('\n').count() + 1;
        let column = match consumed.rfind('\n') {
            Some(nl) => consumed[nl + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };
        ParseFailure { error, input: input.to_string(), position, line, column }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (line {}, column {})", self.error, self.line, self.column)
    }
}

/// The top-level error returned by the crate's public parse/render entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Parse(ParseFailure),
    Layout(LayoutError),
}

impl From<ParseFailure> for Error {
    fn from(e: ParseFailure) -> Self {
        Error::Parse(e)
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}

/// A non-fatal condition noticed during layout. Collected into a side-channel `Vec<Warning>`
/// alongside a successful result (§7 "Warnings are not Errors") rather than aborting the render.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A box was packed to a target wider/taller than its natural size with no stretch glue
    /// available to fill the difference (or only `fil`-and-above glue, TeX's "underfull box").
    Underfull { horizontal: bool, amount: Unit },
    /// A box was packed to a target narrower/shallower than its natural size with no shrink glue
    /// (or insufficient finite shrink) to absorb the excess ("overfull box").
    Overfull { horizontal: bool, amount: Unit },
    /// A requested sized delimiter/accent/radical variant was unavailable; the largest variant
    /// the family has was substituted instead.
    SizeVariantClamped { codepoint: char, requested_height: Unit, used_height: Unit },
    /// A `\command` name did not resolve to any codepoint in any table; the fallback
    /// currency-sign glyph was substituted (§7 "Unknown-symbol warning", §8 `"$\unknownfoo$"`).
    UnknownCommand { name: String },
    /// A codepoint is syntactically valid but absent from the selected font family's metrics
    /// table; the fallback currency-sign glyph was substituted (§7 "Unknown-symbol warning").
    UnknownSymbol { codepoint: char },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutError::MissingGlyph { codepoint, font } => {
                write!(f, "no glyph for '{}' in font family '{}'", codepoint, font)
            }
            LayoutError::NoSizedVariant { codepoint, requested_height } => {
                write!(f, "no variant of '{}' reaches height {}", codepoint, requested_height)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnrecognizedCommand(cmd) => write!(f, "unrecognized command: \\{}", cmd),
            ParseError::UnrecognizedSymbol(c) => write!(f, "unrecognized symbol '{}'", c),
            ParseError::NoClosingBrace => write!(f, "failed to find a closing '}}'"),
            ParseError::UnexpectedClosingBrace => write!(f, "unexpected '}}' with no matching '{{'"),
            ParseError::ExpectedDelimiter { after } => {
                write!(f, "expected a delimiter symbol after {}", after)
            }
            ParseError::MissingArgument { command } => {
                write!(f, "\\{} is missing a required argument", command)
            }
            ParseError::ExcessiveScript { token } => {
                write!(f, "double script: a second '{}' applied to the same nucleus", token)
            }
            ParseError::LimitsMustFollowOperator => {
                write!(f, "\\limits/\\nolimits must follow a large operator")
            }
            ParseError::UnexpectedEof => write!(f, "unexpected end of input"),
            ParseError::InvalidDimension(s) => write!(f, "could not parse dimension '{}'", s),
            ParseError::NonSimpleRootIndex => {
                write!(f, "\\sqrt root index must be a single simple symbol")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
            Error::Layout(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn line_column_point_at_the_second_line() {
        let input = "hello\n$x_a_b$";
        let failure = ParseFailure::at(ParseError::ExcessiveScript { token: '_' }, input, 9);
        assert_eq!(failure.line, 2);
        assert_eq!(failure.column, 4);
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::Underfull { horizontal, amount } => write!(
                f,
                "underfull {} box, needed {} more of stretch",
                if *horizontal { "h" } else { "v" },
                amount
            ),
            Warning::Overfull { horizontal, amount } => write!(
                f,
                "overfull {} box by {}",
                if *horizontal { "h" } else { "v" },
                amount
            ),
            Warning::SizeVariantClamped { codepoint, requested_height, used_height } => write!(
                f,
                "'{}' clamped to height {} (wanted {})",
                codepoint, used_height, requested_height
            ),
            Warning::UnknownCommand { name } => {
                write!(f, "unrecognized command \\{}, substituted fallback glyph", name)
            }
            Warning::UnknownSymbol { codepoint } => {
                write!(f, "no glyph for '{}' in the selected font, substituted fallback glyph", codepoint)
            }
        }
    }
}
