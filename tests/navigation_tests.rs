use highlight_words::indexer;
use highlight_words::navigation::{find_next, find_previous, locate};
use highlight_words::{CursorState, HighlightSpec, MatchFlags, MatchRange};
use regex::Regex;

fn regex(pattern: &str, flags: MatchFlags) -> Regex {
    indexer::compile(&HighlightSpec::new(pattern, flags)).unwrap()
}

// Matches of "ab" at offsets 2 and 9 in a 12-character document.
const TEXT: &str = "xxabxxxxxabx";

#[test]
fn next_moves_forward() {
    let re = regex("ab", MatchFlags::empty());
    assert_eq!(find_next(TEXT, &re, 0), Some(MatchRange::new(2, 4)));
    assert_eq!(find_next(TEXT, &re, 2), Some(MatchRange::new(9, 11)));
}

#[test]
fn next_wraps_to_start() {
    let re = regex("ab", MatchFlags::empty());
    assert_eq!(find_next(TEXT, &re, 9), Some(MatchRange::new(2, 4)));
    assert_eq!(find_next(TEXT, &re, 12), Some(MatchRange::new(2, 4)));
}

#[test]
fn next_single_match_returns_itself() {
    let re = regex("only", MatchFlags::empty());
    assert_eq!(find_next("the only one", &re, 4), Some(MatchRange::new(4, 8)));
}

#[test]
fn next_respects_case_flag() {
    let text = "Foo foo";
    assert_eq!(
        find_next(text, &regex("foo", MatchFlags::empty()), 0),
        Some(MatchRange::new(4, 7))
    );
    assert_eq!(
        find_next(text, &regex("foo", MatchFlags::IGNORE_CASE), 5),
        Some(MatchRange::new(0, 3))
    );
}

#[test]
fn next_not_found() {
    let re = regex("zz", MatchFlags::empty());
    assert_eq!(find_next(TEXT, &re, 3), None);
    assert_eq!(find_next("", &re, 0), None);
}

#[test]
fn previous_moves_backward() {
    let re = regex("ab", MatchFlags::empty());
    assert_eq!(find_previous(TEXT, &re, 9), Some(MatchRange::new(2, 4)));
    assert_eq!(find_previous(TEXT, &re, 12), Some(MatchRange::new(9, 11)));
}

#[test]
fn previous_takes_last_match_in_prefix() {
    let re = regex("a", MatchFlags::empty());
    assert_eq!(find_previous("a a a b", &re, 6), Some(MatchRange::new(4, 5)));
}

#[test]
fn previous_wraps_from_document_start() {
    let re = regex("ab", MatchFlags::empty());
    assert_eq!(find_previous(TEXT, &re, 0), Some(MatchRange::new(9, 11)));
}

#[test]
fn previous_wraps_when_prefix_has_no_match() {
    let re = regex("ab", MatchFlags::empty());
    assert_eq!(find_previous(TEXT, &re, 2), Some(MatchRange::new(9, 11)));
}

#[test]
fn previous_not_found() {
    let re = regex("zz", MatchFlags::empty());
    assert_eq!(find_previous(TEXT, &re, 5), None);
    assert_eq!(find_previous(TEXT, &re, 0), None);
}

#[test]
fn whole_word_navigation_skips_embedded() {
    let re = regex("cat", MatchFlags::WHOLE_WORD);
    let text = "cat cats scattered cat";
    assert_eq!(find_next(text, &re, 0), Some(MatchRange::new(19, 22)));
    assert_eq!(find_previous(text, &re, 19), Some(MatchRange::new(0, 3)));
}

#[test]
fn previous_ignores_word_cut_short_by_caret() {
    let re = regex("cat", MatchFlags::WHOLE_WORD);
    // Caret inside "cats": the "cat" before it is not a whole word.
    assert_eq!(find_previous("cat cats", &re, 7), Some(MatchRange::new(0, 3)));
}

#[test]
fn previous_skips_match_under_caret() {
    let re = regex("ab", MatchFlags::empty());
    assert_eq!(find_previous(TEXT, &re, 10), Some(MatchRange::new(2, 4)));
}

#[test]
fn cursor_state_reports_position() {
    let ranges = [MatchRange::new(2, 4), MatchRange::new(9, 11)];
    let state = CursorState::locate("ab", &ranges, MatchRange::new(9, 11));
    assert_eq!(state.to_string(), "2/2");
    assert!(state.is_on("ab"));
    assert_eq!(CursorState::not_found("ab").to_string(), "0/0");
    assert_eq!(locate(&ranges, MatchRange::new(2, 4)), (1, 2));
}
