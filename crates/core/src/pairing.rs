//! Grouping of lyric lines into slides.

use crate::types::Slide;

/// Group lines into slides.
///
/// Lines are consumed greedily in primary/secondary pairs. In single-line
/// mode, or when the current line is empty, a slide takes one line only. An
/// odd number of lines leaves the last line on a slide of its own.
pub fn pair_lines(lines: &[String], single_line: bool) -> Vec<Slide> {
    let mut slides = Vec::with_capacity(lines.len());
    let mut cursor = 0;

    while cursor < lines.len() {
        let primary = lines[cursor].as_str();

        if primary.is_empty() || single_line {
            slides.push(Slide::single(primary));
            cursor += 1;
        } else {
            let secondary = lines.get(cursor + 1).map(String::as_str).unwrap_or("");
            slides.push(Slide::pair(primary, secondary));
            cursor += 2;
        }
    }

    slides
}
