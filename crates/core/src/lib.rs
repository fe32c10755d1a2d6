//! Lyric text normalization, diagnostics, slide pairing and
//! ProPresenter 6 document generation.

pub mod diagnostics;
pub mod encode;
pub mod environment;
pub mod error;
pub mod normalize;
pub mod pairing;
pub mod pro6;
pub mod rtf;
pub mod template;
pub mod types;

pub use diagnostics::{
    analyze_text, diagnostic_message, generate_report, DiagnosticIssue, DiagnosticReport, Finding,
};
pub use encode::{base64_utf8, xml_attr_escape};
pub use environment::{generate_uuid, Environment, SeededEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use normalize::{
    decode_input, decode_utf16_lossy, generate_filename, normalize, parse_lines, sanitize_filename,
};
pub use pairing::pair_lines;
pub use pro6::Pro6Generator;
pub use rtf::render_slide_text;
pub use types::{GeneratedDocument, Slide, SongInput};
