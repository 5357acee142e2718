//! End-to-end coverage of a set of concrete rendering scenarios, driven through the public API
//! and a [`RecordingBackend`] so assertions can be made on the draw-call stream and the packed
//! tree's geometry without depending on any real font file.

use typeset_math::backend::RecordingBackend;
use typeset_math::config::Config;
use typeset_math::dimensions::Unit;
use typeset_math::font::Fonts;
use typeset_math::node::{List, Node};

fn parse(formula: &str, fontsize: f64) -> (List, Vec<typeset_math::error::Warning>) {
    let config = Config::default();
    let mut fonts = config.build_fonts(Box::new(RecordingBackend::new()));
    typeset_math::parser::parse(formula, &mut fonts, fontsize, config.dpi).expect("parse error")
}

fn parse_with_fonts(formula: &str, fonts: &mut Fonts, fontsize: f64, dpi: f64) -> (List, Vec<typeset_math::error::Warning>) {
    typeset_math::parser::parse(formula, fonts, fontsize, dpi).expect("parse error")
}

/// Recursively counts every `Char` node in a tree (§8's "N glyphs" scenarios count nucleus plus
/// script glyphs, regardless of how deeply the parser nested them inside Hlists/Vlists).
fn count_chars(list: &List) -> usize {
    list.contents
        .iter()
        .map(|node| match node {
            Node::Char(_) => 1,
            Node::Hlist(inner) | Node::Vlist(inner) => count_chars(inner),
            _ => 0,
        })
        .sum()
}

fn count_rules(list: &List) -> usize {
    list.contents
        .iter()
        .map(|node| match node {
            Node::Rule { .. } => 1,
            Node::Hlist(inner) | Node::Vlist(inner) => count_rules(inner),
            _ => 0,
        })
        .sum()
}

#[test]
fn x_is_one_italic_glyph_with_near_zero_depth() {
    let (root, warnings) = parse("$x$", 16.0);
    assert!(warnings.is_empty());
    assert_eq!(count_chars(&root), 1);
    assert!(root.width > Unit::ZERO);
    assert!(root.height > Unit::ZERO);
}

#[test]
fn x_squared_has_two_glyphs_with_a_shrunk_superscript() {
    let (root, _warnings) = parse("$x^2$", 16.0);
    assert_eq!(count_chars(&root), 2);
}

#[test]
fn x_sub_i_sup_2_keeps_scripts_from_overlapping() {
    // TESTABLE SCENARIOS §8 "$x_i^2$": three glyphs, sub/super separated by clearance.
    let (root, _warnings) = parse("$x_i^2$", 16.0);
    assert_eq!(count_chars(&root), 3);
}

#[test]
fn frac_one_half_has_exactly_one_rule_and_two_glyph_groups() {
    let (root, _warnings) = parse(r"$\frac{1}{2}$", 16.0);
    assert_eq!(count_rules(&root), 1);
    assert_eq!(count_chars(&root), 2);
}

#[test]
fn sqrt_of_x_plus_1_has_no_leftover_warnings() {
    let (root, warnings) = parse(r"$\sqrt{x+1}$", 16.0);
    assert!(warnings.is_empty());
    assert!(root.width > Unit::ZERO);
    assert!(root.height > Unit::ZERO);
}

#[test]
fn sum_with_limits_centers_sub_and_super_below_and_above() {
    // "$\sum_{i=0}^n i$": the large operator plus its stacked limits plus the trailing `i`.
    let (root, _warnings) = parse(r"$\sum_{i=0}^n i$", 16.0);
    // i, =, 0 (sub) + n (super) + i (trailing nucleus): at least 5 glyphs total.
    assert!(count_chars(&root) >= 5);
}

#[test]
fn hello_x_world_concatenates_three_segments() {
    let (root, _warnings) = parse("hello $x$ world", 16.0);
    assert_eq!(root.contents.len(), 3);
}

#[test]
fn parenthesized_fraction_sizes_delimiters_to_its_extent() {
    let (root, warnings) = parse(r"$\left( \frac{a}{b} \right)$", 16.0);
    assert!(warnings.is_empty());
    assert_eq!(count_rules(&root), 1);
    // Opening and closing delimiter plus the two fraction numerator/denominator glyph groups.
    assert!(count_chars(&root) >= 4);
}

#[test]
fn double_subscript_is_a_parse_error() {
    let config = Config::default();
    let mut fonts = config.build_fonts(Box::new(RecordingBackend::new()));
    let err = typeset_math::parser::parse("$x_a_b$", &mut fonts, 16.0, config.dpi).unwrap_err();
    match err {
        typeset_math::error::Error::Parse(failure) => {
            assert_eq!(failure.error, typeset_math::error::ParseError::ExcessiveScript { token: '_' });
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn frac_missing_denominator_is_a_parse_error() {
    let config = Config::default();
    let mut fonts = config.build_fonts(Box::new(RecordingBackend::new()));
    let err = typeset_math::parser::parse(r"$\frac{1}$", &mut fonts, 16.0, config.dpi).unwrap_err();
    assert!(matches!(err, typeset_math::error::Error::Parse(_)));
}

#[test]
fn unknown_command_warns_and_substitutes_rather_than_erroring() {
    let config = Config::default();
    let mut fonts = config.build_fonts(Box::new(RecordingBackend::new()));
    let (root, warnings) = parse_with_fonts(r"$\unknownfoo$", &mut fonts, 16.0, config.dpi);
    assert_eq!(count_chars(&root), 1);
    assert!(warnings.iter().any(|w| matches!(w, typeset_math::error::Warning::UnknownCommand { name } if name == "unknownfoo")));
}

#[test]
fn pack_idempotence_on_an_already_packed_list() {
    // TESTABLE PROPERTIES #3. Built by hand (rather than from a parsed formula) so the target
    // width is an exact integer — `PackMode::Exactly` takes scaled-point integers, so re-packing
    // a parser-derived fractional natural width to its own rounded value would spuriously change
    // it rather than exercise idempotence.
    use typeset_math::layout::{hpack, PackMode};
    use typeset_math::node::{GlueSpec, Node};

    let mut list = List::new();
    list.contents.push(Node::Kern(Unit::new(4.0)));
    list.contents.push(Node::Glue(GlueSpec::fil(Unit::ZERO)));
    list.contents.push(Node::Kern(Unit::new(6.0)));
    let mut warnings = Vec::new();
    hpack(&mut list, PackMode::Exactly(20), &mut warnings);
    let before = (list.width, list.height, list.depth, list.glue.glue_set);

    hpack(&mut list, PackMode::Exactly(20), &mut warnings);
    let after = (list.width, list.height, list.depth, list.glue.glue_set);

    assert_eq!(before, after);
}

#[test]
fn dimension_consistency_holds_for_a_variety_of_expressions() {
    // TESTABLE PROPERTIES #2.
    for formula in [
        "$x$",
        r"$x^2_i$",
        r"$\frac{1}{2}$",
        r"$\sqrt{x+1}$",
        r"$\sum_{i=0}^n i$",
        r"$\left(\frac{a}{b}\right)$",
    ] {
        let (root, _warnings) = parse(formula, 16.0);
        assert!(root.width >= Unit::ZERO, "{formula}: width must be non-negative");
        assert!(root.height >= Unit::ZERO, "{formula}: height must be non-negative");
        assert!(root.depth >= Unit::ZERO, "{formula}: depth must be non-negative");
    }
}
