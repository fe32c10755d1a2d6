//! Text normalization for lyric input.
//!
//! Maps typographic punctuation to plain ASCII, splits raw text into lyric
//! lines, derives the export filename and decodes raw input bytes.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Regex matching a line break, with or without a leading carriage return.
static LINE_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// Typographic characters and their plain ASCII replacements.
pub(crate) const PUNCTUATION_MAP: &[(char, char)] = &[
    ('\u{2018}', '\''), // Left single quote
    ('\u{2019}', '\''), // Right single quote
    ('\u{201C}', '"'),  // Left double quote
    ('\u{201D}', '"'),  // Right double quote
    ('\u{2013}', '-'),  // En dash
    ('\u{2014}', '-'),  // Em dash
    ('\u{00A0}', ' '),  // Non-breaking space
];

/// Filename used when both artist and title are empty.
pub const DEFAULT_FILENAME: &str = "song.pro6";

/// Extension of ProPresenter 6 documents, including the dot.
pub const FILE_EXTENSION: &str = ".pro6";

/// Characters that are not allowed in filenames on common filesystems.
const UNSAFE_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Map a single character through the punctuation table.
fn normalize_char(c: char) -> char {
    PUNCTUATION_MAP
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Whether a character is rewritten by [`normalize`].
pub(crate) fn is_normalized_char(c: char) -> bool {
    PUNCTUATION_MAP.iter().any(|(from, _)| *from == c)
}

/// Replace curly quotes, en/em dashes and non-breaking spaces with ASCII.
///
/// Every other character, including other non-ASCII text, is left as is.
pub fn normalize(text: &str) -> String {
    text.chars().map(normalize_char).collect()
}

/// Split raw text into trimmed, non-empty lyric lines.
///
/// Both `\n` and `\r\n` count as line breaks. Order is preserved.
pub fn parse_lines(raw_text: &str) -> Vec<String> {
    LINE_BREAK_REGEX
        .split(raw_text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the suggested export filename from artist and title.
///
/// Produces `"Artist - Title.pro6"`, drops whichever part is empty, and
/// falls back to [`DEFAULT_FILENAME`] when both are empty. Characters that
/// are illegal on some filesystems are kept; see [`sanitize_filename`].
pub fn generate_filename(artist: &str, title: &str) -> String {
    let artist = normalize(artist);
    let title = normalize(title);
    let parts: Vec<&str> = [artist.trim(), title.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }

    format!("{}{}", parts.join(" - "), FILE_EXTENSION)
}

/// Replace characters that filesystems reject with underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || UNSAFE_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Decode UTF-16 code units, replacing unpaired surrogates with U+FFFD.
pub fn decode_utf16_lossy(units: &[u16]) -> String {
    let mut replaced = 0usize;
    let text: String = char::decode_utf16(units.iter().copied())
        .map(|r| {
            r.unwrap_or_else(|_| {
                replaced += 1;
                char::REPLACEMENT_CHARACTER
            })
        })
        .collect();

    if replaced > 0 {
        log::warn!(
            "Replaced {} unpaired surrogate(s) with U+FFFD while decoding UTF-16 input",
            replaced
        );
    }

    text
}

/// Decode raw input bytes into text.
///
/// Honors a UTF-8, UTF-16LE or UTF-16BE byte order mark and assumes UTF-8
/// otherwise. Invalid sequences become U+FFFD instead of failing.
pub fn decode_input(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return decode_utf8_lossy(rest);
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        return decode_utf16_bytes(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        return decode_utf16_bytes(rest, u16::from_be_bytes);
    }
    decode_utf8_lossy(bytes)
}

fn decode_utf8_lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            log::warn!("Input contained invalid UTF-8; affected bytes were replaced with U+FFFD");
            text
        }
    }
}

fn decode_utf16_bytes(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| to_unit([chunk[0], chunk[1]]))
        .collect();

    // A dangling odd byte cannot form a code unit.
    if bytes.len() % 2 != 0 {
        log::warn!("UTF-16 input has an odd byte count; trailing byte replaced with U+FFFD");
        units.push(0xFFFD);
    }

    decode_utf16_lossy(&units)
}
