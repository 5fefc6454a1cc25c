use std::fmt;

use crate::config::DefaultMode;
use crate::panel::PanelRow;

/// Host-assigned identifier of a visible view.
pub type ViewId = u32;

/// Host-assigned identifier of the document shown in a view.
///
/// Two views showing the same document share a `DocumentId`.
pub type DocumentId = u32;

/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in grapheme clusters,
/// not bytes or chars. This ensures correct handling of emoji and combining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };
}

/// A range of text defined by start and end positions.
///
/// Ranges are half-open intervals [start, end), meaning the start position
/// is included but the end position is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

/// A single occurrence of a pattern, as half-open byte offsets into the
/// document text.
///
/// Offsets are the source of truth; line/column ranges are derived from them
/// only when a command is handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchRange {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `offset` lies inside the range, or on its end edge.
    pub fn touches(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// The host's active selection, in byte offsets. An empty selection is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

bitflags::bitflags! {
    /// Matching options of a highlight.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MatchFlags: u8 {
        /// Only match occurrences bounded by word boundaries on both sides.
        const WHOLE_WORD  = 0b01;
        /// Compare case-insensitively.
        const IGNORE_CASE = 0b10;
    }
}

impl MatchFlags {
    /// Short flag letters shown next to a pattern in pick lists (`i`, `w`).
    pub fn letters(self) -> String {
        let mut s = String::new();
        if self.contains(MatchFlags::IGNORE_CASE) {
            s.push('i');
        }
        if self.contains(MatchFlags::WHOLE_WORD) {
            s.push('w');
        }
        s
    }
}

/// A user-registered pattern and its matching options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpec {
    /// Regular expression source. Literal captures are stored escaped.
    pub pattern: String,
    pub flags: MatchFlags,
}

impl HighlightSpec {
    pub fn new(pattern: impl Into<String>, flags: MatchFlags) -> Self {
        Self {
            pattern: pattern.into(),
            flags,
        }
    }

    pub fn whole_word(&self) -> bool {
        self.flags.contains(MatchFlags::WHOLE_WORD)
    }

    pub fn ignore_case(&self) -> bool {
        self.flags.contains(MatchFlags::IGNORE_CASE)
    }
}

/// Where navigation last landed: "match `index` of `count` for `active_pattern`".
///
/// Recomputed on every navigation action. `index` is 1-based; `0/0` means the
/// pattern was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    pub active_pattern: Option<String>,
    pub index: usize,
    pub count: usize,
}

impl CursorState {
    /// Locate `found` in `ranges` by its start offset.
    pub fn locate(pattern: &str, ranges: &[MatchRange], found: MatchRange) -> Self {
        let (index, count) = crate::navigation::locate(ranges, found);
        Self {
            active_pattern: Some(pattern.to_string()),
            index,
            count,
        }
    }

    /// The "0 of 0" state reported when a pattern has no occurrence.
    pub fn not_found(pattern: &str) -> Self {
        Self {
            active_pattern: Some(pattern.to_string()),
            index: 0,
            count: 0,
        }
    }

    pub fn is_on(&self, pattern: &str) -> bool {
        self.active_pattern.as_deref() == Some(pattern)
    }
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.count)
    }
}

/// One labeled option of a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    pub label: String,
    pub description: String,
}

impl ChoiceItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A setting the host should persist on the user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    DefaultMode(DefaultMode),
    ShowSidebar(bool),
    HighlightOnSelect(bool),
}

/// Commands emitted by the session for the host to execute.
///
/// These are the only way the session affects the editor. The host applies
/// them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace every range drawn with palette `slot` in `view`.
    /// An empty list clears the slot.
    SetDecorations {
        view: ViewId,
        slot: usize,
        ranges: Vec<Range>,
    },
    /// Move the active selection of `view`.
    SetSelection { view: ViewId, range: Range },
    /// Scroll `range` into view.
    RevealRange { view: ViewId, range: Range },
    /// Show a transient message to the user.
    ShowMessage(String),
    /// Ask the user for free text; answer with `Event::PromptResolved`.
    PromptInput { prompt: String },
    /// Ask the user to pick one item; answer with `Event::PromptResolved`
    /// carrying the picked label.
    PromptChoice { items: Vec<ChoiceItem> },
    /// The side panel contents changed.
    RefreshPanel(Vec<PanelRow>),
    /// Show or hide the side panel.
    SetPanelVisible(bool),
    /// Persist a user setting.
    UpdateSetting(SettingChange),
}
