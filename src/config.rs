//! User configuration, read at startup and on every configuration change.
//!
//! The JSON shape mirrors the host's settings keys:
//!
//! ```json
//! {
//!   "colors": [{ "light": "#b3d9ff", "dark": "cyan" }],
//!   "box": { "light": false, "dark": true },
//!   "defaultMode": 0,
//!   "showSidebar": true,
//!   "highlightOnSelect": false
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::MatchFlags;

/// Default whole-word / ignore-case flags for captures that don't prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DefaultMode {
    #[default]
    Default,
    WholeWord,
    IgnoreCase,
    Both,
}

impl DefaultMode {
    pub const ALL: [DefaultMode; 4] = [
        DefaultMode::Default,
        DefaultMode::WholeWord,
        DefaultMode::IgnoreCase,
        DefaultMode::Both,
    ];

    pub fn flags(self) -> MatchFlags {
        match self {
            DefaultMode::Default => MatchFlags::empty(),
            DefaultMode::WholeWord => MatchFlags::WHOLE_WORD,
            DefaultMode::IgnoreCase => MatchFlags::IGNORE_CASE,
            DefaultMode::Both => MatchFlags::WHOLE_WORD | MatchFlags::IGNORE_CASE,
        }
    }

    /// Label used in the mode picker.
    pub fn label(self) -> &'static str {
        match self {
            DefaultMode::Default => "Default",
            DefaultMode::WholeWord => "Whole Word",
            DefaultMode::IgnoreCase => "Ignore Case",
            DefaultMode::Both => "Both",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        DefaultMode::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl TryFrom<u8> for DefaultMode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        DefaultMode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("default mode must be 0-3, got {value}"))
    }
}

impl From<DefaultMode> for u8 {
    fn from(mode: DefaultMode) -> u8 {
        mode as u8
    }
}

impl fmt::Display for DefaultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoration color for light and dark themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub light: String,
    pub dark: String,
}

impl ColorPair {
    pub fn new(light: &str, dark: &str) -> Self {
        Self {
            light: light.to_string(),
            dark: dark.to_string(),
        }
    }
}

/// Per theme: draw a bordered box (`true`) or a background fill (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxOptions {
    pub light: bool,
    pub dark: bool,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            light: false,
            dark: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightConfig {
    pub colors: Vec<ColorPair>,
    #[serde(rename = "box")]
    pub box_options: BoxOptions,
    pub default_mode: DefaultMode,
    pub show_sidebar: bool,
    pub highlight_on_select: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            box_options: BoxOptions::default(),
            default_mode: DefaultMode::Default,
            show_sidebar: true,
            highlight_on_select: false,
        }
    }
}

impl HighlightConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn default_colors() -> Vec<ColorPair> {
    vec![
        ColorPair::new("#b3d9ff", "cyan"),
        ColorPair::new("#e6ffb3", "pink"),
        ColorPair::new("#b3b3ff", "lightgreen"),
        ColorPair::new("#ffd9b3", "magenta"),
        ColorPair::new("#ffb3ff", "cornflowerblue"),
        ColorPair::new("#b3ffb3", "orange"),
        ColorPair::new("#ffff80", "green"),
        ColorPair::new("#d1e0e0", "red"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = HighlightConfig::from_json("{}").unwrap();
        assert_eq!(config, HighlightConfig::default());
        assert_eq!(config.colors.len(), 8);
    }

    #[test]
    fn parses_host_keys() {
        let config = HighlightConfig::from_json(
            r##"{
                "colors": [{ "light": "#fff", "dark": "#000" }],
                "box": { "light": true, "dark": false },
                "defaultMode": 3,
                "showSidebar": false,
                "highlightOnSelect": true
            }"##,
        )
        .unwrap();
        assert_eq!(config.colors, vec![ColorPair::new("#fff", "#000")]);
        assert!(config.box_options.light);
        assert!(!config.box_options.dark);
        assert_eq!(config.default_mode, DefaultMode::Both);
        assert!(!config.show_sidebar);
        assert!(config.highlight_on_select);
    }

    #[test]
    fn rejects_out_of_range_mode() {
        let err = HighlightConfig::from_json(r#"{ "defaultMode": 4 }"#).unwrap_err();
        assert!(err.to_string().contains("0-3"));
    }

    #[test]
    fn mode_flags() {
        assert_eq!(DefaultMode::Default.flags(), MatchFlags::empty());
        assert!(DefaultMode::Both.flags().contains(MatchFlags::WHOLE_WORD));
        assert!(DefaultMode::Both.flags().contains(MatchFlags::IGNORE_CASE));
        assert_eq!(DefaultMode::from_label("Ignore Case"), Some(DefaultMode::IgnoreCase));
    }
}
