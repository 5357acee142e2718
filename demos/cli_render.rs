//! A small command-line demo: parse a formula, lay it out, and write the draw-call stream out as
//! a minimal standalone SVG. Uses the same `clap` option shape as typical rendering-crate CLI
//! demos (formula, font size, output path, a `--debug` flag printing the intermediate state), but
//! without any rasterizer dependency: glyphs are emitted as SVG `<text>` elements at their
//! resolved codepoint rather than rasterized, since this crate resolves symbols and metrics but
//! does not parse font files or rasterize outlines.

use std::cell::RefCell;
use std::rc::Rc;

use clap::Parser;
use typeset_math::backend::{Backend, HintingType};
use typeset_math::config::{Config, FontSet};
use typeset_math::dimensions::Unit;
use typeset_math::font::bakoma::Bakoma;
use typeset_math::font::stix::Stix;
use typeset_math::font::{FontFamily, FontRole, Fonts};

const DEFAULT_FORMULA: &str = r"\sum_{i=0}^n \frac{1}{i!} = e";
const DEFAULT_OUTPUT_FILE: &str = "out.svg";
const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Parser)]
struct Options {
    #[arg(default_value_t = DEFAULT_FORMULA.to_string(), help = "Formula to render")]
    formula: String,

    #[arg(short = 'o', long = "output", help = "SVG output file")]
    output_file_path: Option<std::path::PathBuf>,

    #[arg(short, long = "fontsize", default_value_t = DEFAULT_FONT_SIZE, help = "Font size in points")]
    font_size: f64,

    #[arg(long, default_value = "cm", help = "Font set: cm or stix")]
    fontset: String,

    #[arg(short, long, default_value_t = false, help = "Print warnings collected during layout")]
    debug: bool,
}

/// Writes glyphs as SVG `<text>` and filled rectangles as SVG `<rect>`, in document order, into a
/// shared buffer so the caller can read it back out after `Fonts` takes ownership of this backend.
struct SvgBackend {
    body: Rc<RefCell<String>>,
}

impl Backend for SvgBackend {
    fn render_glyph(&mut self, ox: Unit, oy: Unit, role: FontRole, codepoint: char, fontsize: f64, _dpi: f64) {
        let style = match role {
            FontRole::Italic => "italic",
            FontRole::Bold => "bold",
            _ => "normal",
        };
        self.body.borrow_mut().push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.2}\" font-style=\"{}\">{}</text>\n",
            ox.value(),
            oy.value(),
            fontsize,
            style,
            codepoint,
        ));
    }

    fn render_rect_filled(&mut self, x1: Unit, y1: Unit, x2: Unit, y2: Unit) {
        self.body.borrow_mut().push_str(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"black\" />\n",
            x1.value(),
            y1.value(),
            (x2 - x1).value(),
            (y2 - y1).value(),
        ));
    }

    fn get_hinting_type(&self) -> HintingType {
        HintingType::None
    }
}

fn family_for(fontset: FontSet) -> Box<dyn FontFamily> {
    match fontset {
        FontSet::Stix => Box::new(Stix::new()),
        _ => Box::new(Bakoma::new()),
    }
}

fn main() {
    env_logger::init();
    let options = Options::parse();
    let output_file_path = options.output_file_path.unwrap_or_else(|| DEFAULT_OUTPUT_FILE.into());

    let fontset = match options.fontset.as_str() {
        "stix" => FontSet::Stix,
        _ => FontSet::Cm,
    };
    let config = Config { fontset, ..Config::default() };

    let body = Rc::new(RefCell::new(String::new()));
    let mut fonts = Fonts::new(family_for(config.fontset), Box::new(SvgBackend { body: Rc::clone(&body) }));

    let (root, warnings) = match typeset_math::parser::parse(&options.formula, &mut fonts, options.font_size, config.dpi) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if options.debug {
        eprintln!("packed tree: width={} height={} depth={}", root.width, root.height, root.depth);
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
    }

    // `ship`'s `(ox, oy)` is the top-left corner of the canvas; it adds `root.height` internally
    // to find the baseline, so `(0, 0)` here places the whole formula inside `0..height`.
    let mut ship_warnings = Vec::new();
    typeset_math::layout::ship(&mut fonts, Unit::ZERO, Unit::ZERO, &root, &mut ship_warnings);

    let width = root.width.value();
    let height = (root.height + root.depth).value();
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}\" height=\"{:.2}\" viewBox=\"0 0 {:.2} {:.2}\">\n{}</svg>\n",
        width,
        height,
        width,
        height,
        body.borrow(),
    );
    std::fs::write(&output_file_path, svg).expect("failed to write output SVG");
    println!("wrote {}", output_file_path.display());
}
