//! The top-level configuration surface, modeled as a `serde`-round-trippable struct so a host
//! application can load it from its own config file (TOML/YAML/JSON) or build it in code via
//! [`Default`]. Options select among built-in font families rather than taking a font file
//! directly, since font-file loading is out of scope here.

use crate::font::unicode::FontDescriptor;

/// Which built-in font family backs symbol resolution (§4.1, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSet {
    /// Computer Modern / Bakoma.
    Cm,
    /// STIX.
    Stix,
    /// User-supplied Unicode TrueType fonts.
    Custom,
}

impl Default for FontSet {
    fn default() -> Self {
        FontSet::Cm
    }
}

/// Per-role font descriptors used when [`FontSet::Custom`] is selected (§6
/// `mathtext.{rm,it,bf,cal,sf,tt}`).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CustomFontDescriptors {
    pub rm: FontDescriptor,
    pub it: FontDescriptor,
    pub bf: FontDescriptor,
    pub cal: FontDescriptor,
    pub sf: FontDescriptor,
    pub tt: FontDescriptor,
}

/// The `mathtext.*`/`ps.*` option table of §6.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub fontset: FontSet,
    /// If a glyph is missing from [`FontSet::Custom`], fall back to Bakoma.
    pub fallback_to_cm: bool,
    pub custom_fonts: CustomFontDescriptors,
    /// The dots-per-inch a formula is rendered at; threaded through every metrics lookup.
    pub dpi: f64,
    /// `ps.useafm` — retained for config round-tripping only. Inert in this crate: the
    /// AFM-backed PostScript font family it would select depends on font-file parsing, which is
    /// out of scope (§1, DESIGN.md Open Question resolution #3).
    pub ps_useafm: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fontset: FontSet::default(),
            fallback_to_cm: true,
            custom_fonts: CustomFontDescriptors::default(),
            dpi: 100.0,
            ps_useafm: false,
        }
    }
}

impl Config {
    /// Build the [`crate::font::Fonts`] layer this config selects, wrapping `backend`.
    pub fn build_fonts(&self, backend: Box<dyn crate::backend::Backend>) -> crate::font::Fonts {
        use crate::font::bakoma::Bakoma;
        use crate::font::stix::Stix;
        use crate::font::unicode::UnicodeFonts;
        use crate::font::FontFamily;

        let family: Box<dyn FontFamily> = match self.fontset {
            FontSet::Cm => Box::new(Bakoma::new()),
            FontSet::Stix => Box::new(Stix::new()),
            FontSet::Custom => Box::new(UnicodeFonts::new()),
        };
        crate::font::Fonts::new(family, backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_selects_cm_and_keeps_ps_useafm_inert() {
        let config = Config::default();
        assert_eq!(config.fontset, FontSet::Cm);
        assert!(!config.ps_useafm);
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config { fontset: FontSet::Stix, ..Config::default() };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: Config = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }
}
