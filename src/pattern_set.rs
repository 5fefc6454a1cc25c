//! The ordered set of registered highlights.

use crate::error::{HighlightError, Result};
use crate::indexer;
use crate::types::{HighlightSpec, MatchFlags};

/// Pick-list label that removes every highlight at once.
pub const REMOVE_ALL_LABEL: &str = "* All *";

/// Characters escaped by [`escape_literal`].
const LITERAL_META: &[char] = &[
    '.', '*', '+', '?', '^', '=', '!', ':', '$', '{', '}', '(', ')', '|', '[', ']', '/', '\\',
];

/// Escape `text` so it matches itself verbatim when used as a pattern.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if LITERAL_META.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// How [`PatternSet::add_literal`] treats text that is already highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Leave the existing entry alone.
    Insert,
    /// Remove the existing entry, so re-capturing the same text switches it off.
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralOutcome {
    Inserted,
    Removed,
    Unchanged,
}

impl LiteralOutcome {
    pub fn is_inserted(self) -> bool {
        self == LiteralOutcome::Inserted
    }

    pub fn changed(self) -> bool {
        self != LiteralOutcome::Unchanged
    }
}

/// Ordered highlights. Pattern text is unique; position drives palette slots.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    specs: Vec<HighlightSpec>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HighlightSpec> {
        self.specs.iter()
    }

    pub fn as_slice(&self) -> &[HighlightSpec] {
        &self.specs
    }

    pub fn get(&self, pattern: &str) -> Option<&HighlightSpec> {
        self.specs.iter().find(|s| s.pattern == pattern)
    }

    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.pattern == pattern)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.position(pattern).is_some()
    }

    /// Register `text` as a literal highlight.
    pub fn add_literal(
        &mut self,
        text: &str,
        flags: MatchFlags,
        mode: InsertMode,
    ) -> LiteralOutcome {
        let pattern = escape_literal(text);
        match (self.position(&pattern), mode) {
            (None, _) => {
                log::info!("highlight added: {pattern}");
                self.specs.push(HighlightSpec::new(pattern, flags));
                LiteralOutcome::Inserted
            }
            (Some(i), InsertMode::Toggle) => {
                log::info!("highlight toggled off: {pattern}");
                self.specs.remove(i);
                LiteralOutcome::Removed
            }
            (Some(_), InsertMode::Insert) => LiteralOutcome::Unchanged,
        }
    }

    /// Register a regular expression, optionally written as `/pattern/flags`.
    ///
    /// Returns `Ok(false)` when the pattern is already registered.
    pub fn add_regexp(&mut self, raw: &str) -> Result<bool> {
        let (pattern, flag_letters) = split_delimited(raw);
        let mut flags = MatchFlags::empty();
        for letter in flag_letters.chars() {
            match letter {
                'i' => flags |= MatchFlags::IGNORE_CASE,
                other => log::debug!("ignoring unsupported expression flag '{other}'"),
            }
        }

        if pattern.is_empty() {
            log::warn!("rejected empty expression: {raw}");
            return Err(HighlightError::InvalidPattern {
                pattern: raw.to_string(),
                reason: "empty expression".to_string(),
            });
        }
        let spec = HighlightSpec::new(pattern, flags);
        indexer::compile(&spec)?;

        if self.contains(pattern) {
            return Ok(false);
        }
        log::info!("expression added: {pattern}");
        self.specs.push(spec);
        Ok(true)
    }

    /// Remove the entry with this pattern text, or everything for
    /// [`REMOVE_ALL_LABEL`]. Returns whether the set changed.
    pub fn remove(&mut self, pattern: &str) -> bool {
        if pattern == REMOVE_ALL_LABEL {
            let had_any = !self.specs.is_empty();
            self.clear();
            return had_any;
        }
        match self.position(pattern) {
            Some(i) => {
                log::info!("highlight removed: {pattern}");
                self.specs.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        if !self.specs.is_empty() {
            log::info!("cleared {} highlights", self.specs.len());
        }
        self.specs.clear();
    }

    /// Change an entry's flags without moving it. Returns false if absent.
    pub fn update_flags(&mut self, pattern: &str, flags: MatchFlags) -> bool {
        match self.specs.iter_mut().find(|s| s.pattern == pattern) {
            Some(spec) => {
                spec.flags = flags;
                true
            }
            None => false,
        }
    }
}

/// Split `/pattern/flags` into its parts. Input without a leading slash, or
/// with no closing slash, is a bare pattern.
fn split_delimited(raw: &str) -> (&str, &str) {
    if let Some(rest) = raw.strip_prefix('/')
        && let Some(close) = rest.rfind('/')
    {
        return (&rest[..close], &rest[close + 1..]);
    }
    (raw, "")
}
