use std::fmt;
use std::str::FromStr;

use crate::config::HighlightConfig;
use crate::types::ViewId;

/// User-invocable actions, one per host command.
///
/// The per-item panel actions carry the pattern text of the clicked row;
/// find-next / find-previous may name a pattern or leave the choice to the
/// session (the highlight under the caret).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddRegExpHighlight,
    AddHighlight,
    AddHighlightWithOptions,
    RemoveHighlight,
    RemoveAllHighlights,
    SetHighlightMode,
    ToggleSidebar,
    ToggleHighlightOnSelect,
    FindNext(Option<String>),
    FindPrevious(Option<String>),
    RemovePanelHighlight(String),
    EditPanelHighlight(String),
}

impl Action {
    /// Command name registered with the host.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddRegExpHighlight => "add-regexp-highlight",
            Action::AddHighlight => "add-highlight",
            Action::AddHighlightWithOptions => "add-highlight-with-options",
            Action::RemoveHighlight => "remove-highlight",
            Action::RemoveAllHighlights => "remove-all-highlights",
            Action::SetHighlightMode => "set-highlight-mode",
            Action::ToggleSidebar => "toggle-sidebar",
            Action::ToggleHighlightOnSelect => "toggle-highlight-on-select",
            Action::FindNext(_) => "find-next",
            Action::FindPrevious(_) => "find-previous",
            Action::RemovePanelHighlight(_) => "remove-panel-highlight",
            Action::EditPanelHighlight(_) => "edit-panel-highlight",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown highlight command: {0}")]
pub struct UnknownAction(pub String);

/// Parses the argument-less form of each command name. Panel actions need a
/// pattern and cannot be parsed from a bare name.
impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "add-regexp-highlight" => Action::AddRegExpHighlight,
            "add-highlight" => Action::AddHighlight,
            "add-highlight-with-options" => Action::AddHighlightWithOptions,
            "remove-highlight" => Action::RemoveHighlight,
            "remove-all-highlights" => Action::RemoveAllHighlights,
            "set-highlight-mode" => Action::SetHighlightMode,
            "toggle-sidebar" => Action::ToggleSidebar,
            "toggle-highlight-on-select" => Action::ToggleHighlightOnSelect,
            "find-next" => Action::FindNext(None),
            "find-previous" => Action::FindPrevious(None),
            other => return Err(UnknownAction(other.to_string())),
        })
    }
}

/// Notifications delivered to the session by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The text of the document shown in `view` changed.
    TextChanged(ViewId),
    /// Focus moved to another view.
    ActiveViewChanged,
    /// A view was opened, closed or split.
    VisibleViewsChanged,
    /// The selection or caret moved in `view`.
    SelectionChanged(ViewId),
    ConfigurationChanged(HighlightConfig),
    Invoke(Action),
    /// Answer to the last prompt; `None` when the user dismissed it.
    PromptResolved(Option<String>),
}
