//! Full-rescan match indexing.
//!
//! Every re-index rebuilds the whole [`MatchIndex`] from the document text, the
//! pattern set and the transient overlays. Nothing is patched incrementally.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{HighlightError, Result};
use crate::pattern_set::{PatternSet, escape_literal};
use crate::types::{HighlightSpec, MatchFlags, MatchRange};

/// Source of the expression actually searched for `spec`.
pub fn search_expression(spec: &HighlightSpec) -> String {
    if spec.whole_word() {
        format!(r"\b(?:{})\b", spec.pattern)
    } else {
        spec.pattern.clone()
    }
}

pub fn compile(spec: &HighlightSpec) -> Result<Regex> {
    RegexBuilder::new(&search_expression(spec))
        .case_insensitive(spec.ignore_case())
        .build()
        .map_err(|e| HighlightError::InvalidPattern {
            pattern: spec.pattern.clone(),
            reason: e.to_string(),
        })
}

/// All non-overlapping matches of `regex`, left to right.
///
/// An empty match is never followed by another match at the same offset, so
/// the scan always advances.
pub fn find_all(text: &str, regex: &Regex) -> Vec<MatchRange> {
    regex
        .find_iter(text)
        .map(|m| MatchRange::new(m.start(), m.end()))
        .collect()
}

/// The word segment containing `offset`, or ending exactly at it.
pub fn word_range_at(text: &str, offset: usize) -> Option<MatchRange> {
    let mut ending_here = None;
    for (start, segment) in text.split_word_bound_indices() {
        if start > offset {
            break;
        }
        if !is_word(segment) {
            continue;
        }
        let end = start + segment.len();
        if offset < end {
            return Some(MatchRange::new(start, end));
        }
        if offset == end {
            ending_here = Some(MatchRange::new(start, end));
        }
    }
    ending_here
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Transient highlights that follow the caret.
///
/// Both hold raw text, not patterns; they are escaped like literal captures
/// before searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
    pub current_word: Option<String>,
    pub current_selection: Option<String>,
}

impl Overlays {
    pub fn is_empty(&self) -> bool {
        self.current_word.is_none() && self.current_selection.is_none()
    }

    pub fn clear(&mut self) {
        self.current_word = None;
        self.current_selection = None;
    }

    fn word_spec(&self) -> Option<HighlightSpec> {
        self.current_word
            .as_deref()
            .map(|w| HighlightSpec::new(escape_literal(w), MatchFlags::WHOLE_WORD))
    }

    fn selection_spec(&self) -> Option<HighlightSpec> {
        self.current_selection
            .as_deref()
            .map(|s| HighlightSpec::new(escape_literal(s), MatchFlags::IGNORE_CASE))
    }
}

/// Occurrences of one pattern in one document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatches {
    /// Pattern text as stored in the [`PatternSet`], or the overlay text.
    pub pattern: String,
    pub ranges: Vec<MatchRange>,
}

/// Per-pattern match ranges for one document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchIndex {
    /// In pattern set order.
    pub patterns: Vec<PatternMatches>,
    pub current_word: Option<PatternMatches>,
    pub current_selection: Option<PatternMatches>,
}

impl MatchIndex {
    /// Ranges of the registered pattern with this text.
    pub fn get(&self, pattern: &str) -> Option<&[MatchRange]> {
        self.patterns
            .iter()
            .find(|p| p.pattern == pattern)
            .map(|p| p.ranges.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.current_word.is_none()
            && self.current_selection.is_none()
    }

    pub fn total_matches(&self) -> usize {
        self.patterns.iter().map(|p| p.ranges.len()).sum::<usize>()
            + self.current_word.as_ref().map_or(0, |p| p.ranges.len())
            + self.current_selection.as_ref().map_or(0, |p| p.ranges.len())
    }

    /// First registered pattern with an occurrence touching `offset`.
    pub fn pattern_at(&self, offset: usize) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.ranges.iter().any(|r| r.touches(offset)))
            .map(|p| p.pattern.as_str())
    }
}

/// Builds [`MatchIndex`]es, reusing compiled expressions between scans.
#[derive(Debug, Default)]
pub struct MatchIndexer {
    cache: HashMap<(String, MatchFlags), Regex>,
}

impl MatchIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_expressions(&self) -> usize {
        self.cache.len()
    }

    pub fn reindex(
        &mut self,
        text: &str,
        patterns: &PatternSet,
        overlays: &Overlays,
    ) -> MatchIndex {
        self.cache.retain(|(pattern, flags), _| {
            patterns
                .get(pattern)
                .is_some_and(|spec| spec.flags == *flags)
        });

        let mut index = MatchIndex::default();
        for spec in patterns.iter() {
            let ranges = match self.regex_for(spec) {
                Some(regex) => find_all(text, regex),
                None => Vec::new(),
            };
            index.patterns.push(PatternMatches {
                pattern: spec.pattern.clone(),
                ranges,
            });
        }

        if let (Some(word), Some(spec)) = (&overlays.current_word, overlays.word_spec()) {
            index.current_word = compile(&spec).ok().map(|regex| PatternMatches {
                pattern: word.clone(),
                ranges: find_all(text, &regex),
            });
        }

        if let (Some(selection), Some(spec)) =
            (&overlays.current_selection, overlays.selection_spec())
        {
            let shadowed_word = overlays
                .current_word
                .as_deref()
                .filter(|_| patterns.contains(&spec.pattern));
            index.current_selection = compile(&spec).ok().map(|regex| {
                let ranges = find_all(text, &regex)
                    .into_iter()
                    .filter(|r| match shadowed_word {
                        Some(word) => word_range_at(text, r.start)
                            .is_none_or(|w| &text[w.start..w.end] != word),
                        None => true,
                    })
                    .collect();
                PatternMatches {
                    pattern: selection.clone(),
                    ranges,
                }
            });
        }

        log::debug!(
            "reindexed {} patterns over {} bytes: {} matches",
            patterns.len(),
            text.len(),
            index.total_matches()
        );
        index
    }

    fn regex_for(&mut self, spec: &HighlightSpec) -> Option<&Regex> {
        let key = (spec.pattern.clone(), spec.flags);
        if !self.cache.contains_key(&key) {
            match compile(spec) {
                Ok(regex) => {
                    self.cache.insert(key.clone(), regex);
                }
                Err(e) => {
                    log::warn!("skipping highlight that no longer compiles: {e}");
                    return None;
                }
            }
        }
        self.cache.get(&key)
    }
}
