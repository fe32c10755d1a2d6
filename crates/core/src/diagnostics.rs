//! Advisory analysis of raw lyric input.
//!
//! Flags characters that export will silently rewrite or escape, and an odd
//! line count that breaks primary/secondary pairing. Nothing here blocks an
//! export.

use crate::normalize::is_normalized_char;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static CURLY_DOUBLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{201C}\x{201D}]").unwrap());
static CURLY_SINGLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{2018}\x{2019}]").unwrap());
static DASH_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\x{2013}\x{2014}]").unwrap());
static NBSP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x{00A0}").unwrap());
static XML_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[&"<>]"#).unwrap());

/// Footer appended to every diagnostics message.
pub const ADVISORY_FOOTER: &str = "(Info) On export, text will be normalized (curly quotes/dashes/NBSP) \
     and XML-escaped. Non-ASCII is preserved via UTF-8 Base64.";

/// A kind of character that export treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticIssue {
    /// `“` or `”`, rewritten to `"`.
    CurlyDoubleQuotes,
    /// `‘` or `’`, rewritten to `'`.
    CurlySingleQuotes,
    /// `–` or `—`, rewritten to `-`.
    Dash,
    /// U+00A0, rewritten to a plain space.
    NonBreakingSpace,
    /// `&`, `"`, `<` or `>`, escaped in attributes.
    XmlAttrChars,
    /// Other non-ASCII text, preserved as is.
    NonAscii,
}

impl DiagnosticIssue {
    /// All issues in the order they are checked and reported.
    pub const ALL: [DiagnosticIssue; 6] = [
        DiagnosticIssue::CurlyDoubleQuotes,
        DiagnosticIssue::CurlySingleQuotes,
        DiagnosticIssue::Dash,
        DiagnosticIssue::NonBreakingSpace,
        DiagnosticIssue::XmlAttrChars,
        DiagnosticIssue::NonAscii,
    ];

    /// Whether `text` contains at least one character of this kind.
    ///
    /// `NonAscii` skips characters that normalization rewrites, so text with
    /// only curly quotes reports just the curly quote issue.
    pub fn is_present(self, text: &str) -> bool {
        match self {
            Self::CurlyDoubleQuotes => CURLY_DOUBLE_REGEX.is_match(text),
            Self::CurlySingleQuotes => CURLY_SINGLE_REGEX.is_match(text),
            Self::Dash => DASH_REGEX.is_match(text),
            Self::NonBreakingSpace => NBSP_REGEX.is_match(text),
            Self::XmlAttrChars => XML_ATTR_REGEX.is_match(text),
            Self::NonAscii => text.chars().any(|c| !c.is_ascii() && !is_normalized_char(c)),
        }
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::CurlyDoubleQuotes => "curly double quotes \u{201C} \u{201D}",
            Self::CurlySingleQuotes => "curly single quotes \u{2018} \u{2019}",
            Self::Dash => "en/em dash \u{2013} \u{2014}",
            Self::NonBreakingSpace => "non-breaking space (NBSP)",
            Self::XmlAttrChars => "XML attr chars (& \" < >)",
            Self::NonAscii => "non-ASCII (ok; UTF-8 safe)",
        }
    }
}

/// Check `text` for every issue kind, in check order.
///
/// Each check runs independently; several issues may be reported at once.
pub fn analyze_text(text: &str) -> Vec<DiagnosticIssue> {
    DiagnosticIssue::ALL
        .into_iter()
        .filter(|issue| issue.is_present(text))
        .collect()
}

/// One entry in a [`DiagnosticReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Issues found in the title.
    Title { issues: Vec<DiagnosticIssue> },
    /// Issues found in the artist.
    Artist { issues: Vec<DiagnosticIssue> },
    /// The number of lines is odd, so the last slide will be unpaired.
    OddLineCount { count: usize },
    /// Issues found in a lyric line (1-based).
    Line {
        number: usize,
        text: String,
        issues: Vec<DiagnosticIssue>,
    },
}

fn join_issues(issues: &[DiagnosticIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Title { issues } => write!(f, "Title issues: {}", join_issues(issues)),
            Finding::Artist { issues } => write!(f, "Artist issues: {}", join_issues(issues)),
            Finding::OddLineCount { count } => write!(
                f,
                "\u{26A0}\u{FE0F} Odd number of non-empty lines ({}). Primary/secondary pairing may be off.",
                count
            ),
            Finding::Line {
                number,
                text,
                issues,
            } => write!(
                f,
                "Line {}: {}\n  \u{2192} {}",
                number,
                join_issues(issues),
                text
            ),
        }
    }
}

/// Result of analyzing a whole song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    /// Findings in report order: title, artist, line count, then lines.
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Whether nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether the report carries the odd line count warning.
    pub fn has_odd_line_count(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::OddLineCount { .. }))
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("No issues detected. Everything will be normalized/escaped safely.");
        }

        for (idx, finding) in self.findings.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", finding)?;
        }
        Ok(())
    }
}

/// Analyze title, artist and parsed (not yet normalized) lyric lines.
pub fn generate_report(title: &str, artist: &str, lines: &[String]) -> DiagnosticReport {
    let mut findings = Vec::new();

    let issues = analyze_text(title);
    if !issues.is_empty() {
        findings.push(Finding::Title { issues });
    }

    let issues = analyze_text(artist);
    if !issues.is_empty() {
        findings.push(Finding::Artist { issues });
    }

    if lines.len() % 2 != 0 {
        findings.push(Finding::OddLineCount { count: lines.len() });
    }

    for (idx, line) in lines.iter().enumerate() {
        let issues = analyze_text(line);
        if !issues.is_empty() {
            findings.push(Finding::Line {
                number: idx + 1,
                text: line.clone(),
                issues,
            });
        }
    }

    DiagnosticReport { findings }
}

/// Full diagnostics text: header, report and advisory footer.
pub fn diagnostic_message(title: &str, artist: &str, lines: &[String]) -> String {
    let report = generate_report(title, artist, lines);
    format!("Diagnostics:\n{}\n\n{}", report, ADVISORY_FOOTER)
}
