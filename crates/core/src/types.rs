//! Domain types for lyric input and generated slides.

use serde::{Deserialize, Serialize};

/// One export request as supplied by the caller.
///
/// String fields are expected to be pre-trimmed. Empty values are legal and
/// produce a degenerate but well-formed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInput {
    /// Song title, written into the document's title attribute.
    pub title: String,

    /// Artist name, only used for the suggested filename.
    pub artist: String,

    /// Raw multi-line lyric text, one lyric line per text line.
    pub raw_text: String,

    /// When true, every line gets its own slide and no pairing happens.
    #[serde(default)]
    pub single_line: bool,
}

impl SongInput {
    /// Create a new input with the given title, artist and lyric text.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            raw_text: raw_text.into(),
            single_line: false,
        }
    }

    /// Set whether each line should become its own slide.
    pub fn with_single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }
}

/// A single displayable slide built from one or two lyric lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// The first line of the pair (source language).
    pub primary: String,

    /// The second line of the pair (translation). Empty for single-line slides.
    pub secondary: String,
}

impl Slide {
    /// Create a slide holding only a primary line.
    pub fn single(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: String::new(),
        }
    }

    /// Create a slide holding a primary and a secondary line.
    pub fn pair(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Whether this slide carries a secondary line.
    pub fn has_secondary(&self) -> bool {
        !self.secondary.is_empty()
    }
}

/// A finished document together with its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Suggested filename, always ending in `.pro6`.
    pub filename: String,

    /// Full XML document text.
    pub content: String,

    /// Number of slides in the document.
    pub slide_count: usize,
}
