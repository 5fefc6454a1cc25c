//! Next / previous occurrence search with wraparound.
//!
//! Both directions search the live document text rather than the stored
//! index, so they stay correct while a debounced re-index is pending. The
//! index is only consulted afterwards, to report "match i of n".

use regex::Regex;

use crate::types::MatchRange;

/// Largest char boundary `<= offset`, clamped to the text length.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Offset one character past `offset`, or `None` at the end of the text.
fn next_char_offset(text: &str, offset: usize) -> Option<usize> {
    let offset = floor_char_boundary(text, offset);
    text[offset..].chars().next().map(|c| offset + c.len_utf8())
}

/// The first occurrence starting strictly after `from`, wrapping to the start
/// of the text when nothing follows.
pub fn find_next(text: &str, regex: &Regex, from: usize) -> Option<MatchRange> {
    let hit = next_char_offset(text, from).and_then(|start| regex.find_at(text, start));
    hit.or_else(|| regex.find(text))
        .map(|m| MatchRange::new(m.start(), m.end()))
}

/// The last occurrence ending at or before `from`, wrapping to the last
/// occurrence in the whole text when none does.
///
/// Matches come from a scan of the whole text, so word boundaries and
/// quantifiers never see a word cut short at `from`.
pub fn find_previous(text: &str, regex: &Regex, from: usize) -> Option<MatchRange> {
    let from = floor_char_boundary(text, from);
    let mut before = None;
    let mut last = None;
    for m in regex.find_iter(text) {
        let hit = MatchRange::new(m.start(), m.end());
        if hit.end <= from {
            before = Some(hit);
        }
        last = Some(hit);
    }
    if before.is_none() && last.is_some() {
        log::debug!("no match before offset {from}, wrapping to end of document");
    }
    before.or(last)
}

/// 1-based position of `found` among `ranges` (matched by start offset), and
/// the total count. The position is 0 when `found` is not in `ranges`.
pub fn locate(ranges: &[MatchRange], found: MatchRange) -> (usize, usize) {
    let index = ranges
        .iter()
        .position(|r| r.start == found.start)
        .map_or(0, |i| i + 1);
    (index, ranges.len())
}
