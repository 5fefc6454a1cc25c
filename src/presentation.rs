//! Palette slots and per-slot decoration lists.
//!
//! Pattern `k` (in pattern set order) is drawn with slot `k mod N`. Removing
//! an earlier pattern shifts the slots of the ones after it. Slots 0 and 1
//! belong to the current-word and current-selection overlays while those are
//! active.

use crate::config::{BoxOptions, ColorPair, HighlightConfig, default_colors};
use crate::indexer::MatchIndex;
use crate::types::MatchRange;

pub const CURRENT_WORD_SLOT: usize = 0;
pub const CURRENT_SELECTION_SLOT: usize = 1;

const BORDER_WIDTH: &str = "2px";
const BORDER_STYLE: &str = "solid";
const BOXED_BACKGROUND: &str = "inherit";
/// Text color forced on filled dark-theme decorations so text stays legible.
const DARK_FILL_TEXT: &str = "#555555";

/// Render options for one theme variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStyle {
    pub border_color: String,
    pub background_color: String,
    pub overview_ruler_color: String,
    pub text_color: Option<String>,
}

/// One palette slot, as handed to the host's decoration factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationStyle {
    pub border_width: &'static str,
    pub border_style: &'static str,
    pub light: ThemeStyle,
    pub dark: ThemeStyle,
}

impl DecorationStyle {
    pub fn from_colors(color: &ColorPair, boxed: BoxOptions) -> Self {
        let light = ThemeStyle {
            border_color: color.light.clone(),
            background_color: if boxed.light {
                BOXED_BACKGROUND.to_string()
            } else {
                color.light.clone()
            },
            overview_ruler_color: color.light.clone(),
            text_color: None,
        };
        let dark = ThemeStyle {
            border_color: color.dark.clone(),
            background_color: if boxed.dark {
                BOXED_BACKGROUND.to_string()
            } else {
                color.dark.clone()
            },
            overview_ruler_color: color.dark.clone(),
            text_color: (!boxed.dark).then(|| DARK_FILL_TEXT.to_string()),
        };
        Self {
            border_width: BORDER_WIDTH,
            border_style: BORDER_STYLE,
            light,
            dark,
        }
    }
}

/// The fixed, ordered set of decoration styles. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: Vec<DecorationStyle>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}

impl Palette {
    pub fn from_config(config: &HighlightConfig) -> Self {
        let colors = if config.colors.is_empty() {
            log::warn!("no highlight colors configured, using the default palette");
            default_colors()
        } else {
            config.colors.clone()
        };
        let styles = colors
            .iter()
            .map(|c| DecorationStyle::from_colors(c, config.box_options))
            .collect();
        Self { styles }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn styles(&self) -> &[DecorationStyle] {
        &self.styles
    }

    pub fn slot_for(&self, position: usize) -> usize {
        position % self.styles.len()
    }
}

/// One range list per palette slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    pub slots: Vec<Vec<MatchRange>>,
}

impl SlotLayout {
    pub fn total(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PresentationMapper {
    palette: Palette,
}

impl PresentationMapper {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Distribute the index over palette slots. Every slot is present, so a
    /// host replacing each slot wholesale clears stale decorations.
    pub fn layout(&self, index: &MatchIndex) -> SlotLayout {
        let mut slots = vec![Vec::new(); self.palette.len()];
        for (position, matches) in index.patterns.iter().enumerate() {
            slots[self.palette.slot_for(position)].extend_from_slice(&matches.ranges);
        }
        if let Some(selection) = &index.current_selection {
            slots[self.palette.slot_for(CURRENT_SELECTION_SLOT)] = selection.ranges.clone();
        }
        if let Some(word) = &index.current_word {
            slots[self.palette.slot_for(CURRENT_WORD_SLOT)] = word.ranges.clone();
        }
        for slot in &mut slots {
            slot.sort_unstable();
        }
        SlotLayout { slots }
    }
}
