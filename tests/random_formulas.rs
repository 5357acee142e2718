//! Randomized coverage of parse totality: generate many syntactically legal math expressions and
//! check that `parse` accepts every one of them, rather than hand-picking a handful of literal
//! inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use typeset_math::backend::RecordingBackend;
use typeset_math::config::Config;

const LETTERS: &[char] = &['a', 'b', 'c', 'x', 'y', 'z', 'i', 'n'];
const DIGITS: &[char] = &['0', '1', '2', '3', '9'];
const COMMANDS: &[&str] = &[
    r"\alpha", r"\beta", r"\gamma", r"\sum", r"\int", r"\sin", r"\lim", r"\infty", r"\pi",
];

/// Emits one random "atom": a bare letter/digit, a command, or a `\sqrt{...}`/`\frac{...}{...}`
/// wrapping a smaller atom. `depth` bounds recursion so every generated string terminates.
fn atom(rng: &mut impl Rng, depth: u32) -> String {
    if depth == 0 {
        return match rng.gen_range(0..2) {
            0 => LETTERS[rng.gen_range(0..LETTERS.len())].to_string(),
            _ => DIGITS[rng.gen_range(0..DIGITS.len())].to_string(),
        };
    }
    match rng.gen_range(0..5) {
        0 => LETTERS[rng.gen_range(0..LETTERS.len())].to_string(),
        1 => DIGITS[rng.gen_range(0..DIGITS.len())].to_string(),
        2 => COMMANDS[rng.gen_range(0..COMMANDS.len())].to_string(),
        3 => format!(r"\sqrt{{{}}}", atom(rng, depth - 1)),
        _ => format!(r"\frac{{{}}}{{{}}}", atom(rng, depth - 1), atom(rng, depth - 1)),
    }
}

/// Optionally appends a subscript, a superscript, or both (braced, so `_a^b`-style ordering
/// ambiguity never arises) to a nucleus — this is the one place "double subscript" could sneak
/// in, so each of `_`/`^` is attached at most once.
fn with_scripts(rng: &mut impl Rng, nucleus: String, depth: u32) -> String {
    let mut out = nucleus;
    if rng.gen_bool(0.5) {
        out = format!("{}_{{{}}}", out, atom(rng, depth));
    }
    if rng.gen_bool(0.5) {
        out = format!("{}^{{{}}}", out, atom(rng, depth));
    }
    out
}

fn random_expression(rng: &mut impl Rng) -> String {
    let mut body = String::new();
    let terms = rng.gen_range(1..4);
    for i in 0..terms {
        if i > 0 {
            body.push_str(if rng.gen_bool(0.5) { " + " } else { " - " });
        }
        body.push_str(&with_scripts(rng, atom(rng, 2), 1));
    }
    format!("${}$", body)
}

#[test]
fn parse_accepts_every_randomly_generated_legal_expression() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..200 {
        let formula = random_expression(&mut rng);
        let config = Config::default();
        let mut fonts = config.build_fonts(Box::new(RecordingBackend::new()));
        let result = typeset_math::parser::parse(&formula, &mut fonts, 16.0, config.dpi);
        assert!(result.is_ok(), "failed to parse generated expression {formula:?}: {:?}", result.err());
    }
}
