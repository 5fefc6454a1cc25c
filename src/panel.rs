//! Side panel listing the registered highlights.
//!
//! The panel is a projection recomputed on demand; the session pushes a
//! fresh set of rows with [`crate::Command::RefreshPanel`] after every change.

use crate::pattern_set::PatternSet;
use crate::types::{CursorState, HighlightSpec};

/// Context value the host uses to attach the per-item actions.
pub const CONTEXT_VALUE: &str = "highlights";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    /// The pattern text; also the argument of the per-item actions.
    pub label: String,
    pub description: String,
    pub tooltip: String,
    pub context_value: &'static str,
    /// "i/n" when navigation last landed on this pattern.
    pub position: Option<String>,
}

/// Option summary: `both`, `ignoreCase`, `wholeWord` or `default`.
pub fn options_label(spec: &HighlightSpec) -> &'static str {
    match (spec.ignore_case(), spec.whole_word()) {
        (true, true) => "both",
        (true, false) => "ignoreCase",
        (false, true) => "wholeWord",
        (false, false) => "default",
    }
}

pub fn rows(patterns: &PatternSet, cursor: &CursorState) -> Vec<PanelRow> {
    patterns
        .iter()
        .map(|spec| {
            let description = options_label(spec);
            PanelRow {
                label: spec.pattern.clone(),
                description: description.to_string(),
                tooltip: format!("{}-{}", spec.pattern, description),
                context_value: CONTEXT_VALUE,
                position: cursor.is_on(&spec.pattern).then(|| cursor.to_string()),
            }
        })
        .collect()
}
