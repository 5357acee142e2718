//! Symbol/metric tables shared across font families: TeX command → Unicode codepoint, and
//! delimiter size-variant tables. Shaped after a `tex2uni`-style command table and the
//! over/under/dropsub/spaced-symbol classification sets a math parser keeps alongside it.
//!
//! This is a representative subset of the ~2000-entry original table, not an exhaustive port
//! (DESIGN.md records this per the Resolved Open Question on static font tables).

use crate::font::SymbolClass;

/// `\name` → Unicode codepoint, independent of font family. Consulted by the parser when a
/// family's [`crate::font::FontFamily::resolve_command`] has no family-specific mapping (§4.1
/// "symbol resolution policy", §6 "union of ... the static tex2uni table").
pub const TEX2UNI: &[(&str, char)] = &[
    ("alpha", 'α'), ("beta", 'β'), ("gamma", 'γ'), ("delta", 'δ'), ("epsilon", 'ε'),
    ("varepsilon", 'ε'), ("zeta", 'ζ'), ("eta", 'η'), ("theta", 'θ'), ("vartheta", 'ϑ'),
    ("iota", 'ι'), ("kappa", 'κ'), ("lambda", 'λ'), ("mu", 'μ'), ("nu", 'ν'), ("xi", 'ξ'),
    ("pi", 'π'), ("varpi", 'ϖ'), ("rho", 'ρ'), ("varrho", 'ϱ'), ("sigma", 'σ'),
    ("varsigma", 'ς'), ("tau", 'τ'), ("upsilon", 'υ'), ("phi", 'φ'), ("varphi", 'ϕ'),
    ("chi", 'χ'), ("psi", 'ψ'), ("omega", 'ω'),
    ("Gamma", 'Γ'), ("Delta", 'Δ'), ("Theta", 'Θ'), ("Lambda", 'Λ'), ("Xi", 'Ξ'),
    ("Pi", 'Π'), ("Sigma", 'Σ'), ("Upsilon", 'Υ'), ("Phi", 'Φ'), ("Psi", 'Ψ'),
    ("Omega", 'Ω'),
    ("infty", '∞'), ("partial", '∂'), ("nabla", '∇'), ("emptyset", '∅'), ("ell", 'ℓ'),
    ("hbar", 'ℏ'), ("imath", 'ı'), ("jmath", 'ȷ'), ("aleph", 'ℵ'), ("wp", '℘'), ("Re", 'ℜ'),
    ("Im", 'ℑ'), ("forall", '∀'), ("exists", '∃'), ("in", '∈'), ("notin", '∉'), ("ni", '∋'),
    ("land", '∧'), ("lor", '∨'), ("lnot", '¬'), ("neg", '¬'),
    ("pm", '±'), ("mp", '∓'), ("times", '×'), ("div", '÷'), ("cdot", '⋅'), ("ast", '∗'),
    ("star", '⋆'), ("circ", '∘'), ("bullet", '∙'), ("oplus", '⊕'), ("ominus", '⊖'),
    ("otimes", '⊗'), ("oslash", '⊘'), ("odot", '⊙'), ("cap", '∩'), ("cup", '∪'),
    ("setminus", '∖'), ("wedge", '∧'), ("vee", '∨'), ("amalg", '⨿'), ("dagger", '†'),
    ("ddagger", '‡'), ("vdash", '⊢'), ("dashv", '⊣'), ("top", '⊤'), ("bot", '⊥'),
    ("leq", '≤'), ("le", '≤'), ("geq", '≥'), ("ge", '≥'), ("neq", '≠'), ("ne", '≠'),
    ("equiv", '≡'), ("sim", '∼'), ("simeq", '≃'), ("approx", '≈'), ("cong", '≅'),
    ("propto", '∝'), ("subset", '⊂'), ("supset", '⊃'), ("subseteq", '⊆'), ("supseteq", '⊇'),
    ("parallel", '∥'), ("perp", '⊥'), ("prec", '≺'), ("succ", '≻'),
    ("leftarrow", '←'), ("gets", '←'), ("rightarrow", '→'), ("to", '→'),
    ("leftrightarrow", '↔'), ("Leftarrow", '⇐'), ("Rightarrow", '⇒'),
    ("Leftrightarrow", '⇔'), ("uparrow", '↑'), ("downarrow", '↓'), ("updownarrow", '↕'),
    ("mapsto", '↦'), ("longrightarrow", '⟶'), ("longleftarrow", '⟵'),
    ("sum", '∑'), ("prod", '∏'), ("coprod", '∐'), ("int", '∫'), ("oint", '∮'),
    ("bigcap", '⋂'), ("bigcup", '⋃'), ("bigoplus", '⊕'), ("bigotimes", '⊗'),
    ("bigvee", '⋁'), ("bigwedge", '⋀'), ("biguplus", '⊎'),
    ("ldots", '…'), ("cdots", '⋯'), ("vdots", '⋮'), ("ddots", '⋱'),
    ("angle", '∠'), ("triangle", '△'), ("square", '□'), ("diamond", '◇'),
    ("langle", '⟨'), ("rangle", '⟩'), ("lceil", '⌈'), ("rceil", '⌉'),
    ("lfloor", '⌊'), ("rfloor", '⌋'), ("backslash", '\\'), ("prime", '′'),
    ("quad", ' '), ("qquad", ' '),
];

/// Large operators whose scripts stack over/under rather than to the side (§4.3 "over/under
/// operator"). Includes `\sum \prod \coprod \bigcap …` and named limit-taking functions such as
/// `\lim \sup \max \min`.
pub const OVERUNDER_OPERATORS: &[char] = &['∑', '∏', '∐', '⋂', '⋃', '⋁', '⋀', '⊎'];

/// Named functions (`\lim`, `\sup`, …) that behave as over/under operators even though they are
/// spelled out rather than drawn as a single glyph.
pub const OVERUNDER_FUNCTIONS: &[&str] =
    &["lim", "sup", "inf", "max", "min", "limsup", "liminf", "argmax", "argmin"];

/// Named functions rendered upright (roman) rather than italic, but otherwise ordinary symbols
/// (not over/under) — `\sin`, `\cos`, etc.
pub const UPRIGHT_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "arcsin", "arccos", "arctan", "sinh", "cosh",
    "tanh", "coth", "log", "ln", "exp", "det", "gcd", "deg", "dim", "hom", "ker", "arg", "Pr",
];

/// `\int \oint` — subscripts drop extra by the nucleus's depth (§4.3 "dropsub operator").
pub const DROPSUB_OPERATORS: &[char] = &['∫', '∮'];

/// Codepoints whose italic glyph is naturally slanted, per `self.is_slanted` in the original —
/// drives the superscript italic-correction offset (§4.3, `DELTA`).
pub fn is_slanted(codepoint: char) -> bool {
    codepoint.is_ascii_alphabetic() || codepoint == '∫' || codepoint == '∮'
}

/// Spacing classification used by §4.3's symbol-handling prose: a *spaced* symbol gets
/// `0.2em` kerns on both sides, a *punctuation* symbol gets one following it, anything else is a
/// bare glyph.
pub fn classify(codepoint: char) -> SymbolClass {
    match codepoint {
        '+' | '-' | '±' | '∓' | '×' | '÷' | '⋅' | '∗' | '⋆' | '∘' | '∙' | '⊕' | '⊖' | '⊗'
        | '⊘' | '⊙' | '∩' | '∪' | '∖' | '∧' | '∨' => SymbolClass::BinaryOperator,
        '=' | '≤' | '≥' | '≠' | '≡' | '∼' | '≃' | '≈' | '≅' | '∝' | '⊂' | '⊃' | '⊆' | '⊇'
        | '∈' | '∉' | '∋' | '∥' | '⊥' | '≺' | '≻' | '⊢' | '⊣' => SymbolClass::Relation,
        '←' | '→' | '↔' | '⇐' | '⇒' | '⇔' | '↑' | '↓' | '↕' | '↦' | '⟶' | '⟵' => {
            SymbolClass::Relation
        }
        ',' | ';' | '.' | ':' => SymbolClass::Punctuation,
        '(' | '[' | '{' | '⟨' | '⌈' | '⌊' => SymbolClass::Open,
        ')' | ']' | '}' | '⟩' | '⌉' | '⌋' => SymbolClass::Close,
        c if OVERUNDER_OPERATORS.contains(&c) || c == '∫' || c == '∮' => SymbolClass::LargeOp,
        _ => SymbolClass::Ordinary,
    }
}

/// Fixed (non-wide) accent commands and the combining mark they draw above the nucleus, per the
/// `accent` grammar production (§4.3).
pub const FIXED_ACCENTS: &[(&str, char)] = &[
    ("hat", '^'), ("breve", '˘'), ("bar", 'ˉ'), ("grave", '`'), ("acute", '´'),
    ("ddot", '¨'), ("tilde", '~'), ("dot", '˙'), ("vec", '⃗'),
    ("\"", '¨'), ("'", '´'), ("`", '`'), ("~", '~'), (".", '˙'), ("^", '^'),
];

/// The *wide* accents, which select a sized variant matching the nucleus width rather than a
/// fixed-size combining mark (§4.3 "Accents").
pub const WIDE_ACCENTS: &[(&str, char)] = &[("widehat", '^'), ("widetilde", '~')];

/// `\ \, \; \quad \qquad \! \/` — whitespace commands in units of em width (§4.3
/// "Whitespace commands"), implemented as fixed [`crate::node::Node::Kern`]s.
pub const WHITESPACE_COMMANDS: &[(&str, f64)] = &[
    (" ", 0.3),
    (",", 0.4),
    (";", 0.8),
    ("quad", 1.6),
    ("qquad", 3.2),
    ("!", -0.4),
    ("/", 0.4),
];

/// Delimiters recognized after `\left`/`\right` (§4.3 "auto_delim"). `.` means "no visible
/// glyph" and is handled specially by the parser, not listed here.
pub const DELIMITERS: &[char] =
    &['(', ')', '[', ']', '{', '}', '⟨', '⟩', '⌈', '⌉', '⌊', '⌋', '|', '‖', '\\', '/'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tex2uni_has_no_duplicate_commands() {
        let mut seen = std::collections::HashSet::new();
        for (name, _) in TEX2UNI {
            assert!(seen.insert(*name), "duplicate command \\{}", name);
        }
    }

    #[test]
    fn classify_recognizes_binary_and_relation() {
        assert_eq!(classify('+'), SymbolClass::BinaryOperator);
        assert_eq!(classify('='), SymbolClass::Relation);
        assert_eq!(classify(','), SymbolClass::Punctuation);
        assert_eq!(classify('∑'), SymbolClass::LargeOp);
    }

    #[test]
    fn dropsub_operators_are_also_slanted() {
        for &c in DROPSUB_OPERATORS {
            assert!(is_slanted(c));
        }
    }
}
