/*!
 * Interactive candidate selection.
 *
 * Renders ranked subtitle candidates as a bordered terminal table, one
 * single-character selection key per row, and resolves a typed line into
 * an ordered list of chosen records. The selection alphabet is a fixed
 * bidirectional index-to-symbol mapping, which caps selectable rows at 26;
 * rows past the alphabet are displayed without a key and cannot be picked.
 */

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use console::Term;

use crate::opensubtitles::models::Subtitle;

/// Fixed ordered set of single-character selection keys
pub const SELECTION_ALPHABET: [char; 26] = [
    'q', 'w', 'e', 'r', 't', 'z', 'u', 'i', 'o', 'p', 'a', 's', 'd', 'f', 'g', 'h', 'j', 'k',
    'l', 'y', 'x', 'c', 'v', 'b', 'n', 'm',
];

/// Selection key for a display row, `None` past the alphabet
pub fn key_for_index(index: usize) -> Option<char> {
    SELECTION_ALPHABET.get(index).copied()
}

/// Display row for a typed selection key, `None` for unknown characters
pub fn index_for_key(key: char) -> Option<usize> {
    SELECTION_ALPHABET.iter().position(|&symbol| symbol == key)
}

/// Resolve one input line against `count` displayed rows
///
/// `"-"` resolves to an explicit empty selection without consulting the
/// alphabet. Any other line is de-duplicated character-wise (first
/// occurrence wins) and mapped through the alphabet; a single unknown
/// character or out-of-range row invalidates the entire line — there is no
/// partial acceptance. Returns `None` for an invalid line.
pub fn parse_selection(line: &str, count: usize) -> Option<Vec<usize>> {
    if line == "-" {
        return Some(Vec::new());
    }

    let mut keys: Vec<char> = Vec::new();
    for key in line.chars() {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    let mut indices = Vec::with_capacity(keys.len());
    for key in keys {
        match index_for_key(key) {
            Some(index) if index < count => indices.push(index),
            _ => return None,
        }
    }

    Some(indices)
}

/// Interactive selector over an injected line source
///
/// Production wiring reads stdin and sizes the table to the terminal; tests
/// drive it with an in-memory reader and a fixed width.
pub struct Selector<R: BufRead> {
    input: R,
    terminal_width: usize,
}

impl<R: BufRead> Selector<R> {
    /// Create a selector reading lines from `input`, rendering `width`
    /// columns wide
    pub fn new(input: R, width: usize) -> Self {
        Self {
            input,
            terminal_width: width,
        }
    }

    /// Present `subtitles` for `video` and block until the user resolves a
    /// selection
    ///
    /// Displays the table once, then prompts until a valid line arrives:
    /// an invalid line re-prompts with the same table still in effect (not
    /// redrawn), an empty line re-prompts without consuming anything, and
    /// there is no retry limit or timeout. An empty candidate list still
    /// prompts so the user can skip explicitly. End of input counts as a
    /// skip.
    pub fn select(&mut self, subtitles: &[Subtitle], video: &Path) -> Result<Vec<Subtitle>> {
        let video_name = video
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| video.to_string_lossy().to_string());

        print!("{}", render_table(subtitles, &video_name, self.terminal_width));

        let selection = loop {
            print!("\nSelect subtitles to download: ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break Vec::new();
            }
            let line = line.trim_end_matches(['\r', '\n']);

            if line.is_empty() {
                continue;
            }

            if let Some(indices) = parse_selection(line, subtitles.len()) {
                break indices
                    .into_iter()
                    .map(|index| subtitles[index].clone())
                    .collect();
            }
        };

        println!();
        Ok(selection)
    }
}

/// Selector wired to stdin and the real terminal width
pub fn stdin_selector() -> Selector<std::io::BufReader<std::io::Stdin>> {
    Selector::new(
        std::io::BufReader::new(std::io::stdin()),
        detect_terminal_width(),
    )
}

/// Usable table width: terminal columns minus one, 80-column fallback
fn detect_terminal_width() -> usize {
    let columns = Term::stdout()
        .size_checked()
        .map(|(_rows, columns)| columns as usize)
        .unwrap_or(80);
    columns.saturating_sub(1)
}

/// Column widths: key, file name (fills the rest), language, HI, HD, trusted
fn column_widths(width: usize) -> [usize; 6] {
    let mut widths = [1, 0, 3, 2, 2, 2];
    let fixed: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
    widths[1] = width.saturating_sub(fixed).max(8);
    widths
}

/// Render the bordered candidate table
pub fn render_table(subtitles: &[Subtitle], video_name: &str, width: usize) -> String {
    let widths = column_widths(width);
    let width = widths.iter().sum::<usize>() + widths.len() * 3 + 1;

    let mut table = String::new();
    table.push('\n');

    table.push_str(&solid_line(width, '═', '╔', '╗'));
    table.push_str(&format!(
        "║ {} ║\n",
        pad_cell(&format!("Video: {}", video_name), width - 4, ' ')
    ));
    table.push_str(&cell_line(&widths, '═', '╠', '╤', '╣'));
    table.push_str(&data_line(
        &widths,
        &["K", "Subtitle name", "Lng", "HI", "HD", "Tr"],
    ));
    table.push_str(&cell_line(&widths, '─', '╟', '┼', '╢'));

    for (row, subtitle) in subtitles.iter().enumerate() {
        let key = key_for_index(row).map(String::from).unwrap_or_default();
        let name = subtitle
            .primary_file()
            .map(|file| file.file_name.as_str())
            .unwrap_or("");
        let attributes = &subtitle.attributes;

        table.push_str(&data_line(
            &widths,
            &[
                &key,
                name,
                &attributes.language,
                flag(attributes.is_hearing_impaired()),
                flag(attributes.is_hd()),
                flag(attributes.is_trusted()),
            ],
        ));
    }

    table.push_str(&cell_line(&widths, '═', '╚', '╧', '╝'));
    table
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Truncate or pad `value` to exactly `width` characters
fn pad_cell(value: &str, width: usize, fill: char) -> String {
    let mut cell: String = value.chars().take(width).collect();
    while cell.chars().count() < width {
        cell.push(fill);
    }
    cell
}

/// One data row: cells padded to their widths, boxed and separated
fn data_line(widths: &[usize; 6], values: &[&str; 6]) -> String {
    let cells: Vec<String> = values
        .iter()
        .zip(widths.iter())
        .map(|(value, &width)| pad_cell(value, width, ' '))
        .collect();
    format!("║ {} ║\n", cells.join(" │ "))
}

/// An unbroken horizontal border
fn solid_line(width: usize, line: char, begin: char, end: char) -> String {
    let mut border = String::new();
    border.push(begin);
    for _ in 0..width.saturating_sub(2) {
        border.push(line);
    }
    border.push(end);
    border.push('\n');
    border
}

/// A horizontal border with column crossings
fn cell_line(widths: &[usize; 6], line: char, begin: char, cross: char, end: char) -> String {
    let cells: Vec<String> = widths
        .iter()
        .map(|&width| pad_cell("", width + 2, line))
        .collect();
    format!("{}{}{}\n", begin, cells.join(&cross.to_string()), end)
}
