//! Structured text templates.
//!
//! A template is an ordered list of literal text and named slots. Rendering
//! walks the list once and asks the caller for each slot's value, so values
//! are never re-scanned and user text can never be mistaken for a slot.

use crate::error::{Error, Result};

/// A named hole in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A freshly generated unique identifier, new for every occurrence.
    Uuid,
    /// The escaped song title.
    Title,
    /// The export timestamp.
    LastDateUsed,
    /// The escaped primary line stored as slide notes.
    Notes,
    /// The Base64 rich-text payload of a text element.
    RtfData,
    /// The concatenated slide fragments.
    Slides,
    /// Visible slide text inside the rich-text body.
    Text,
}

impl Slot {
    /// Name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Uuid => "uuid",
            Slot::Title => "title",
            Slot::LastDateUsed => "last_date_used",
            Slot::Notes => "notes",
            Slot::RtfData => "rtf_data",
            Slot::Slides => "slides",
            Slot::Text => "text",
        }
    }
}

/// One piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output unchanged.
    Literal(&'static str),
    /// A value supplied at render time.
    Slot(Slot),
}

/// An immutable sequence of literal and slot segments.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    name: &'static str,
    segments: &'static [Segment],
}

impl Template {
    /// Create a template from its segments.
    pub const fn new(name: &'static str, segments: &'static [Segment]) -> Self {
        Self { name, segments }
    }

    /// Total length of the literal text.
    pub fn literal_len(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Slot(_) => 0,
            })
            .sum()
    }

    /// Error for a slot the caller has no value for.
    pub fn unbound(&self, slot: Slot) -> Error {
        Error::UnboundSlot {
            template: self.name,
            slot: slot.name(),
        }
    }

    /// Render into `out`, calling `fill` once per slot occurrence.
    ///
    /// `fill` appends the slot's value to the buffer it is given.
    pub fn render_into<F>(&self, out: &mut String, mut fill: F) -> Result<()>
    where
        F: FnMut(Slot, &mut String) -> Result<()>,
    {
        for segment in self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => fill(*slot, out)?,
            }
        }
        Ok(())
    }

    /// Render to a new string.
    pub fn render<F>(&self, fill: F) -> Result<String>
    where
        F: FnMut(Slot, &mut String) -> Result<()>,
    {
        let mut out = String::with_capacity(self.literal_len());
        self.render_into(&mut out, fill)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: Template = Template::new(
        "greeting",
        &[
            Segment::Literal("<a id=\""),
            Segment::Slot(Slot::Uuid),
            Segment::Literal("\" b=\""),
            Segment::Slot(Slot::Text),
            Segment::Literal("\" c=\""),
            Segment::Slot(Slot::Uuid),
            Segment::Literal("\"/>"),
        ],
    );

    #[test]
    fn test_render_calls_fill_per_occurrence() {
        let mut counter = 0;
        let out = GREETING
            .render(|slot, out| {
                match slot {
                    Slot::Uuid => {
                        counter += 1;
                        out.push_str(&counter.to_string());
                    }
                    Slot::Text => out.push_str("hi"),
                    other => return Err(GREETING.unbound(other)),
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(out, "<a id=\"1\" b=\"hi\" c=\"2\"/>");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = GREETING
            .render(|slot, out| {
                match slot {
                    Slot::Uuid => out.push_str("u"),
                    // Text that looks like template syntax stays literal.
                    _ => out.push_str("REPLACEUUID {uuid}"),
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(out, "<a id=\"u\" b=\"REPLACEUUID {uuid}\" c=\"u\"/>");
    }

    #[test]
    fn test_render_reports_unbound_slot() {
        let err = GREETING
            .render(|slot, out| match slot {
                Slot::Uuid => {
                    out.push('x');
                    Ok(())
                }
                other => Err(GREETING.unbound(other)),
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No value bound for slot text in greeting template"
        );
    }

    #[test]
    fn test_literal_len() {
        assert_eq!(GREETING.literal_len(), "<a id=\"\" b=\"\" c=\"\"/>".len());
    }
}
