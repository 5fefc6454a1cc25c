use unicode_segmentation::UnicodeSegmentation;

use crate::indexer;
use crate::types::{DocumentId, MatchRange, Position, Range, Selection, ViewId};

/// Read-only view of the host editor.
///
/// The session never mutates the editor directly; it returns
/// [`crate::Command`]s for the host to apply. Offsets are byte offsets into
/// the text returned by [`Workspace::document_text`].
pub trait Workspace {
    // Views
    fn visible_views(&self) -> Vec<ViewId>;
    fn active_view(&self) -> Option<ViewId>;

    /// Views showing the same document share an id.
    fn document_of(&self, view: ViewId) -> DocumentId {
        view
    }

    // Text
    fn document_text(&self, view: ViewId) -> String;

    /// The active selection (or caret) of `view`.
    fn selection(&self, view: ViewId) -> Selection;

    /// Translate a byte offset into a line and grapheme column.
    fn offset_to_position(&self, view: ViewId, offset: usize) -> Position {
        position_in(&self.document_text(view), offset)
    }

    fn range_of(&self, view: ViewId, range: MatchRange) -> Range {
        Range {
            start: self.offset_to_position(view, range.start),
            end: self.offset_to_position(view, range.end),
        }
    }

    /// Batch form of [`Workspace::range_of`]. Hosts overriding
    /// `offset_to_position` should override this too.
    fn ranges_of(&self, view: ViewId, ranges: &[MatchRange]) -> Vec<Range> {
        let text = self.document_text(view);
        let table = LineTable::new(&text);
        ranges.iter().map(|&r| table.range(r)).collect()
    }

    /// The word under `offset`, if any.
    fn word_range_at(&self, view: ViewId, offset: usize) -> Option<MatchRange> {
        indexer::word_range_at(&self.document_text(view), offset)
    }
}

/// Line start offsets of one text snapshot, for batch offset conversion.
pub struct LineTable<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineTable<'a> {
    pub fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, starts }
    }

    /// Line and grapheme column of `offset`.
    ///
    /// Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = crate::navigation::floor_char_boundary(self.text, offset);
        let line = self.starts.partition_point(|&s| s <= offset) - 1;
        let col = self.text[self.starts[line]..offset].graphemes(true).count();
        Position {
            line: line as u32,
            col: col as u32,
        }
    }

    pub fn range(&self, range: MatchRange) -> Range {
        Range {
            start: self.position(range.start),
            end: self.position(range.end),
        }
    }
}

pub fn position_in(text: &str, offset: usize) -> Position {
    LineTable::new(text).position(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_count_lines_and_graphemes() {
        let text = "ab\nc🌍d";
        assert_eq!(position_in(text, 0), Position::ZERO);
        assert_eq!(position_in(text, 3), Position { line: 1, col: 0 });
        assert_eq!(position_in(text, 4 + 4), Position { line: 1, col: 2 });
        assert_eq!(position_in(text, 100), Position { line: 1, col: 3 });
    }
}
