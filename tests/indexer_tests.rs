use highlight_words::indexer::{self, find_all};
use highlight_words::{
    HighlightSpec, InsertMode, MatchFlags, MatchIndexer, MatchRange, Overlays, PatternSet,
};

fn starts(ranges: &[MatchRange]) -> Vec<usize> {
    ranges.iter().map(|r| r.start).collect()
}

fn set_of(literals: &[(&str, MatchFlags)]) -> PatternSet {
    let mut set = PatternSet::new();
    for (text, flags) in literals {
        set.add_literal(text, *flags, InsertMode::Insert);
    }
    set
}

#[test]
fn whole_word_excludes_embedded_occurrences() {
    let set = set_of(&[("cat", MatchFlags::WHOLE_WORD)]);
    let index = MatchIndexer::new().reindex("cat cats scattered", &set, &Overlays::default());
    assert_eq!(index.get("cat").unwrap(), &[MatchRange::new(0, 3)]);
}

#[test]
fn substring_matching_finds_every_occurrence() {
    let set = set_of(&[("cat", MatchFlags::empty())]);
    let index = MatchIndexer::new().reindex("cat cats scattered", &set, &Overlays::default());
    assert_eq!(starts(index.get("cat").unwrap()), vec![0, 4, 10]);
}

#[test]
fn ignore_case() {
    let set = set_of(&[("Cat", MatchFlags::IGNORE_CASE)]);
    let index = MatchIndexer::new().reindex("cat CAT cAt dog", &set, &Overlays::default());
    assert_eq!(starts(index.get("Cat").unwrap()), vec![0, 4, 8]);
}

#[test]
fn matches_are_non_overlapping() {
    let set = set_of(&[("aa", MatchFlags::empty())]);
    let index = MatchIndexer::new().reindex("aaaaa", &set, &Overlays::default());
    assert_eq!(index.get("aa").unwrap(), &[MatchRange::new(0, 2), MatchRange::new(2, 4)]);
}

#[test]
fn zero_length_matches_terminate() {
    let regex = indexer::compile(&HighlightSpec::new("x*", MatchFlags::empty())).unwrap();
    let ranges = find_all("abc", &regex);
    assert_eq!(ranges.len(), 4);
    assert!(ranges.iter().all(|r| r.is_empty()));
}

#[test]
fn index_follows_pattern_order() {
    let mut set = PatternSet::new();
    set.add_regexp("b").unwrap();
    set.add_regexp("a").unwrap();
    let index = MatchIndexer::new().reindex("abab", &set, &Overlays::default());
    let order: Vec<_> = index.patterns.iter().map(|p| p.pattern.as_str()).collect();
    assert_eq!(order, ["b", "a"]);
    assert_eq!(starts(index.get("a").unwrap()), vec![0, 2]);
    assert_eq!(starts(index.get("b").unwrap()), vec![1, 3]);
}

#[test]
fn absent_pattern_has_empty_entry() {
    let set = set_of(&[("zebra", MatchFlags::empty())]);
    let index = MatchIndexer::new().reindex("no stripes here", &set, &Overlays::default());
    assert_eq!(index.get("zebra"), Some(&[][..]));
    assert_eq!(index.get("unknown"), None);
}

#[test]
fn empty_set_gives_empty_index() {
    let index = MatchIndexer::new().reindex("anything", &PatternSet::new(), &Overlays::default());
    assert!(index.is_empty());
    assert_eq!(index.total_matches(), 0);
}

#[test]
fn multibyte_offsets_are_bytes() {
    let set = set_of(&[("wörld", MatchFlags::empty())]);
    let text = "héllo wörld";
    let index = MatchIndexer::new().reindex(text, &set, &Overlays::default());
    let range = index.get("wörld").unwrap()[0];
    assert_eq!(&text[range.start..range.end], "wörld");
}

#[test]
fn reindex_is_pure() {
    let set = set_of(&[("ab", MatchFlags::empty()), ("b", MatchFlags::WHOLE_WORD)]);
    let overlays = Overlays {
        current_word: Some("b".to_string()),
        current_selection: None,
    };
    let mut indexer = MatchIndexer::new();
    let first = indexer.reindex("ab b ab", &set, &overlays);
    let second = indexer.reindex("ab b ab", &set, &overlays);
    let fresh = MatchIndexer::new().reindex("ab b ab", &set, &overlays);
    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn flag_change_recompiles() {
    let mut set = set_of(&[("cat", MatchFlags::empty())]);
    let mut indexer = MatchIndexer::new();
    let text = "cat cats";
    assert_eq!(indexer.reindex(text, &set, &Overlays::default()).get("cat").unwrap().len(), 2);
    set.update_flags(r"cat", MatchFlags::WHOLE_WORD);
    assert_eq!(indexer.reindex(text, &set, &Overlays::default()).get("cat").unwrap().len(), 1);
}

#[test]
fn current_word_overlay_is_whole_word_and_case_sensitive() {
    let overlays = Overlays {
        current_word: Some("foo".to_string()),
        current_selection: None,
    };
    let index = MatchIndexer::new().reindex("foo Foo food foo", &PatternSet::new(), &overlays);
    let word = index.current_word.unwrap();
    assert_eq!(word.pattern, "foo");
    assert_eq!(starts(&word.ranges), vec![0, 13]);
}

#[test]
fn current_selection_overlay_ignores_case() {
    let overlays = Overlays {
        current_word: None,
        current_selection: Some("o.f".to_string()),
    };
    let index = MatchIndexer::new().reindex("oxf O.F o.food", &PatternSet::new(), &overlays);
    let selection = index.current_selection.unwrap();
    assert_eq!(starts(&selection.ranges), vec![4, 9]);
}

#[test]
fn selection_overlay_skips_occurrence_covered_by_word_overlay() {
    let set = set_of(&[("bar", MatchFlags::empty())]);
    let overlays = Overlays {
        current_word: Some("bar".to_string()),
        current_selection: Some("bar".to_string()),
    };
    let index = MatchIndexer::new().reindex("bar barn BAR", &set, &overlays);
    let selection = index.current_selection.as_ref().unwrap();
    // "bar" itself is the word under the caret; "barn" and "BAR" are other words.
    assert_eq!(starts(&selection.ranges), vec![4, 9]);
    assert_eq!(starts(index.get("bar").unwrap()), vec![0, 4]);
}

#[test]
fn selection_overlay_keeps_all_when_not_highlighted() {
    let overlays = Overlays {
        current_word: Some("bar".to_string()),
        current_selection: Some("bar".to_string()),
    };
    let index = MatchIndexer::new().reindex("bar barn BAR", &PatternSet::new(), &overlays);
    assert_eq!(starts(&index.current_selection.unwrap().ranges), vec![0, 4, 9]);
}

#[test]
fn pattern_at_finds_highlight_under_offset() {
    let set = set_of(&[("one", MatchFlags::empty()), ("two", MatchFlags::empty())]);
    let index = MatchIndexer::new().reindex("one two", &set, &Overlays::default());
    assert_eq!(index.pattern_at(5), Some("two"));
    assert_eq!(index.pattern_at(1), Some("one"));
}
