//! Rich-text (RTF) slide bodies.
//!
//! Every slide uses the same Cocoa RTF body: a main run (medium weight,
//! 35pt) that holds the visible text, followed by an empty italic run for a
//! secondary line. Only one text value is placed in the body.

use crate::error::Result;
use crate::template::{Segment, Slot, Template};

/// RTF header, font and color tables, and the main style run.
const RTF_HEADER: &str = concat!(
    r"{\rtf1\ansi\ansicpg1252\cocoartf2580",
    "\n",
    r"\cocoatextscaling0\cocoaplatform0{\fonttbl\f0\fnil\fcharset0 CMGSans-Medium;\f1\fnil\fcharset0 CMGSans-Regular;}",
    "\n",
    r"{\colortbl;\red255\green255\blue255;\red255\green255\blue255;\red0\green0\blue0;}",
    "\n",
    r"{\*\expandedcolortbl;;\cssrgb\c100000\c100000\c100000;\cssrgb\c0\c0\c0;}",
    "\n",
    r"\deftab720",
    "\n",
    r"\pard\pardeftab720\qc\partightenfactor0",
    "\n",
    "\n",
    r"\f0\fs70 \cf2 \kerning1\expnd28\expndtw140",
    "\n",
    r"\outl0\strokewidth-40 \strokec3 ",
);

/// Line break into the secondary (italic) style run, then the closing brace.
const RTF_FOOTER: &str = concat!(
    r"\",
    "\n",
    r"\pard\pardeftab720\qc\partightenfactor0",
    "\n",
    "\n",
    r"\f1\i\fs60 \cf2 \kerning1\expnd16\expndtw80",
    "\n",
    "}",
);

/// The slide body template.
pub const SLIDE_RTF: Template = Template::new(
    "slide rtf",
    &[
        Segment::Literal(RTF_HEADER),
        Segment::Slot(Slot::Text),
        Segment::Literal(RTF_FOOTER),
    ],
);

/// Render the RTF body for a slide.
///
/// The secondary line is shown when present, otherwise the primary line.
/// Text is inserted verbatim.
pub fn render_slide_text(primary: &str, secondary: &str) -> Result<String> {
    let text = if secondary.is_empty() {
        primary
    } else {
        secondary
    };

    SLIDE_RTF.render(|slot, out| match slot {
        Slot::Text => {
            out.push_str(text);
            Ok(())
        }
        other => Err(SLIDE_RTF.unbound(other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_footer_shape() {
        assert!(RTF_HEADER.starts_with("{\\rtf1\\ansi\\ansicpg1252\\cocoartf2580\n"));
        assert!(RTF_HEADER.ends_with("\\outl0\\strokewidth-40 \\strokec3 "));
        assert!(RTF_FOOTER.starts_with("\\\n\\pard"));
        assert!(RTF_FOOTER.ends_with("\\expndtw80\n}"));
    }

    #[test]
    fn test_render_secondary_wins() {
        let rtf = render_slide_text("Hello", "Hallo").unwrap();
        assert!(rtf.contains("\\strokec3 Hallo\\\n"));
        assert!(!rtf.contains("Hello"));
    }

    #[test]
    fn test_render_primary_fallback() {
        let rtf = render_slide_text("Solo", "").unwrap();
        assert_eq!(rtf, format!("{}Solo{}", RTF_HEADER, RTF_FOOTER));
    }

    #[test]
    fn test_render_keeps_text_verbatim() {
        let text = "Tom & \"Jerry\" <3 caf\u{00E9} {brace} \\slash";
        let rtf = render_slide_text(text, "").unwrap();
        assert!(rtf.contains(text));
    }

    #[test]
    fn test_two_style_runs() {
        let rtf = render_slide_text("x", "").unwrap();
        assert!(rtf.contains("\\f0\\fs70"));
        assert!(rtf.contains("\\f1\\i\\fs60"));
        assert_eq!(rtf.matches("\\pard\\pardeftab720").count(), 2);
    }
}
