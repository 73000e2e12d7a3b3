/*!
 * Candidate ordering for subtitle search results.
 *
 * Pure, stable sort of an unordered result set into the order the selector
 * displays: preferred language first, then trusted uploaders, then
 * subtitles without hearing-impaired annotations.
 */

use crate::opensubtitles::models::Subtitle;

/// Sort candidates by language preference, uploader trust, and
/// hearing-impaired flag
///
/// `preference` is an ordered list of language codes, earlier meaning more
/// preferred. Records whose language is absent from the list rank after
/// all listed languages and keep their relative search order. Ties beyond
/// the three keys preserve the incoming order (stable sort), so re-sorting
/// an already ranked list is a no-op.
pub fn rank_subtitles(mut subtitles: Vec<Subtitle>, preference: &[String]) -> Vec<Subtitle> {
    subtitles.sort_by_key(|subtitle| rank_key(subtitle, preference));
    subtitles
}

/// Composite key: (language position, untrusted, hearing impaired), all
/// ascending — so trusted sorts before untrusted and plain subtitles
/// before hearing-impaired ones within a language.
fn rank_key(subtitle: &Subtitle, preference: &[String]) -> (usize, bool, bool) {
    (
        language_position(&subtitle.attributes.language, preference),
        !subtitle.attributes.is_trusted(),
        subtitle.attributes.is_hearing_impaired(),
    )
}

/// Position of `language` in the preference list, or one past the end when
/// it is not listed
fn language_position(language: &str, preference: &[String]) -> usize {
    preference
        .iter()
        .position(|code| code.eq_ignore_ascii_case(language))
        .unwrap_or(preference.len())
}
