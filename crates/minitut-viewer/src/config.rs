//! Viewer configuration.
//!
//! The capability set (keyboard navigation, touch navigation, TOC style,
//! content downloads) is selected here at construction time; the three
//! historical variants of the widget collapse into one configurable
//! component. Configs can be built in code via [`Default`] or loaded from
//! TOML.

use minitut_types::error::Result;
use serde::Deserialize;

/// How the table of contents is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocStyle {
    /// Outline appended directly into the `#toc` container, always shown.
    #[default]
    Permanent,
    /// Outline hidden behind a hamburger button; a click toggles it.
    Hamburger,
}

/// Viewer feature configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// TOC rendering mode.
    pub toc_style: TocStyle,
    /// Id selector (`#id` or bare id) of an external element that shows
    /// the current section title. When set, per-section headings are not
    /// inserted.
    pub section_title: Option<String>,
    /// React to arrow/enter/space keys.
    pub keyboard_nav: bool,
    /// React to touch swipe gestures.
    pub touch_nav: bool,
    /// URLs of additional content fragments to download and append to
    /// `<main>` before indexing. The files directly contain `<section>`
    /// elements, not full documents.
    pub download: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            toc_style: TocStyle::Permanent,
            section_title: None,
            keyboard_nav: true,
            touch_nav: true,
            download: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.toc_style, TocStyle::Permanent);
        assert!(cfg.section_title.is_none());
        assert!(cfg.keyboard_nav);
        assert!(cfg.touch_nav);
        assert!(cfg.download.is_empty());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.toc_style, TocStyle::Permanent);
        assert!(cfg.keyboard_nav);
    }

    #[test]
    fn full_toml_parses() {
        let cfg = ViewerConfig::from_toml_str(
            r##"
            toc_style = "hamburger"
            section_title = "#section-title"
            keyboard_nav = false
            touch_nav = false
            download = ["chapter2.html", "chapter3.html"]
            "##,
        )
        .unwrap();
        assert_eq!(cfg.toc_style, TocStyle::Hamburger);
        assert_eq!(cfg.section_title.as_deref(), Some("#section-title"));
        assert!(!cfg.keyboard_nav);
        assert!(!cfg.touch_nav);
        assert_eq!(cfg.download, ["chapter2.html", "chapter3.html"]);
    }

    #[test]
    fn invalid_toc_style_rejected() {
        let result = ViewerConfig::from_toml_str("toc_style = \"sidebar\"");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_toml_rejected() {
        let result = ViewerConfig::from_toml_str("toc_style = [[[");
        assert!(result.is_err());
    }
}
