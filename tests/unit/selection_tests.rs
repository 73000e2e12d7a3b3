/*!
 * Tests for the selection alphabet, input parsing and table rendering
 */

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use subgrab::selection::{
    SELECTION_ALPHABET, Selector, index_for_key, key_for_index, parse_selection, render_table,
};
use crate::common::make_subtitle;

/// Test that the alphabet mapping is bidirectional over all 26 symbols
#[test]
fn test_alphabet_withAllIndices_shouldRoundTrip() {
    assert_eq!(key_for_index(0), Some('q'));
    assert_eq!(key_for_index(25), Some('m'));

    for (index, &symbol) in SELECTION_ALPHABET.iter().enumerate() {
        assert_eq!(key_for_index(index), Some(symbol));
        assert_eq!(index_for_key(symbol), Some(index));
    }
}

/// Test that rows past the alphabet receive no key
#[test]
fn test_key_for_index_withIndexPastAlphabet_shouldReturnNone() {
    assert_eq!(key_for_index(26), None);
    assert_eq!(key_for_index(100), None);
}

/// Test that unknown characters map to no row
#[test]
fn test_index_for_key_withUnknownCharacter_shouldReturnNone() {
    assert_eq!(index_for_key('1'), None);
    assert_eq!(index_for_key('Q'), None);
    assert_eq!(index_for_key('-'), None);
    assert_eq!(index_for_key(' '), None);
}

/// Test that a dash resolves to an explicit empty selection even when no
/// candidate could be selected
#[test]
fn test_parse_selection_withDash_shouldResolveEmpty() {
    assert_eq!(parse_selection("-", 5), Some(Vec::new()));
    assert_eq!(parse_selection("-", 0), Some(Vec::new()));
}

/// Test that a valid line maps keys to rows in typed order
#[test]
fn test_parse_selection_withValidKeys_shouldMapInOrder() {
    assert_eq!(parse_selection("q", 3), Some(vec![0]));
    assert_eq!(parse_selection("ewq", 3), Some(vec![2, 1, 0]));
}

/// Test that repeated characters are de-duplicated, first occurrence wins
#[test]
fn test_parse_selection_withRepeatedKeys_shouldDeduplicate() {
    assert_eq!(parse_selection("qq", 3), Some(vec![0]));
    assert_eq!(parse_selection("qwqwq", 3), Some(vec![0, 1]));
}

/// Test that a single invalid character invalidates the entire line
#[test]
fn test_parse_selection_withInvalidCharacter_shouldRejectWholeLine() {
    assert_eq!(parse_selection("q1", 3), None);
    assert_eq!(parse_selection("1q", 3), None);
    assert_eq!(parse_selection("q w", 3), None);
}

/// Test that a key mapping past the candidate count invalidates the line
#[test]
fn test_parse_selection_withOutOfRangeKey_shouldRejectWholeLine() {
    // 'r' is row 3, but only rows 0..3 exist
    assert_eq!(parse_selection("r", 3), None);
    assert_eq!(parse_selection("qr", 3), None);
}

/// Test that the selector resolves a valid line into records
#[test]
fn test_select_withValidLine_shouldReturnChosenRecords() -> Result<()> {
    let subtitles = vec![
        make_subtitle("first", "en", false, false),
        make_subtitle("second", "fr", false, false),
        make_subtitle("third", "de", false, false),
    ];

    let mut selector = Selector::new(Cursor::new("wq\n"), 80);
    let chosen = selector.select(&subtitles, Path::new("movie.mkv"))?;

    let ids: Vec<&str> = chosen.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["second", "first"]);

    Ok(())
}

/// Test that a repeated key yields the candidate exactly once
#[test]
fn test_select_withRepeatedKey_shouldReturnRecordOnce() -> Result<()> {
    let subtitles = vec![make_subtitle("only", "en", false, false)];

    let mut selector = Selector::new(Cursor::new("qqq\n"), 80);
    let chosen = selector.select(&subtitles, Path::new("movie.mkv"))?;

    assert_eq!(chosen.len(), 1);
    assert_eq!(chosen[0].id, "only");

    Ok(())
}

/// Test that a dash skips the video with an empty selection
#[test]
fn test_select_withDash_shouldReturnEmptySelection() -> Result<()> {
    let subtitles = vec![make_subtitle("only", "en", false, false)];

    let mut selector = Selector::new(Cursor::new("-\n"), 80);
    let chosen = selector.select(&subtitles, Path::new("movie.mkv"))?;

    assert!(chosen.is_empty());

    Ok(())
}

/// Test that invalid and empty lines re-prompt until a valid line arrives
#[test]
fn test_select_withInvalidThenValidLine_shouldUseValidLine() -> Result<()> {
    let subtitles = vec![
        make_subtitle("first", "en", false, false),
        make_subtitle("second", "fr", false, false),
    ];

    // One invalid key, one out-of-range key, one blank line, then a pick.
    let mut selector = Selector::new(Cursor::new("x\n9\n\nw\n"), 80);
    let chosen = selector.select(&subtitles, Path::new("movie.mkv"))?;

    assert_eq!(chosen.len(), 1);
    assert_eq!(chosen[0].id, "second");

    Ok(())
}

/// Test that end of input resolves to a skip instead of looping forever
#[test]
fn test_select_withEndOfInput_shouldReturnEmptySelection() -> Result<()> {
    let subtitles = vec![make_subtitle("only", "en", false, false)];

    let mut selector = Selector::new(Cursor::new(""), 80);
    let chosen = selector.select(&subtitles, Path::new("movie.mkv"))?;

    assert!(chosen.is_empty());

    Ok(())
}

/// Test that an empty candidate list still prompts and can be skipped
#[test]
fn test_select_withNoCandidates_shouldStillAllowSkip() -> Result<()> {
    let mut selector = Selector::new(Cursor::new("-\n"), 80);
    let chosen = selector.select(&[], Path::new("movie.mkv"))?;

    assert!(chosen.is_empty());

    Ok(())
}

/// Test the rendered table: one line per candidate plus borders, every
/// line equally wide, keys and file names present
#[test]
fn test_render_table_withCandidates_shouldRenderAlignedRows() {
    let subtitles = vec![
        make_subtitle("first", "en", true, false),
        make_subtitle("second", "fr", false, true),
    ];

    let table = render_table(&subtitles, "movie.mkv", 80);
    let lines: Vec<&str> = table.lines().filter(|line| !line.is_empty()).collect();

    // Top border, title, header separator, header, row separator,
    // two data rows, bottom border.
    assert_eq!(lines.len(), 8);

    let width = lines[0].chars().count();
    for line in &lines {
        assert_eq!(line.chars().count(), width);
    }

    assert!(lines[1].contains("Video: movie.mkv"));
    assert!(lines[5].starts_with("║ q"));
    assert!(lines[5].contains("first.srt"));
    assert!(lines[6].starts_with("║ w"));
    assert!(lines[6].contains("second.srt"));
}

/// Test that rows past the alphabet render without a selection key
#[test]
fn test_render_table_withMoreThanAlphabetRows_shouldLeaveExtraRowsKeyless() {
    let subtitles: Vec<_> = (0..30)
        .map(|n| make_subtitle(&format!("sub{:02}", n), "en", false, false))
        .collect();

    let table = render_table(&subtitles, "movie.mkv", 100);
    let lines: Vec<&str> = table.lines().filter(|line| !line.is_empty()).collect();

    // 6 frame lines + 30 data rows
    assert_eq!(lines.len(), 36);

    // Row 27 (index 26) is the first without a key.
    let row_27 = lines[5 + 26];
    assert!(row_27.starts_with("║   │"));
}

/// Test that long file names truncate to the column instead of widening it
#[test]
fn test_render_table_withLongFileName_shouldTruncateCell() {
    let mut subtitle = make_subtitle("long", "en", false, false);
    subtitle.attributes.files[0].file_name = "x".repeat(300);

    let table = render_table(&[subtitle], "movie.mkv", 60);
    let lines: Vec<&str> = table.lines().filter(|line| !line.is_empty()).collect();

    let width = lines[0].chars().count();
    for line in &lines {
        assert_eq!(line.chars().count(), width);
    }
}
