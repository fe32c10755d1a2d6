//! ProPresenter 6 (`.pro6`) document generation.
//!
//! A document is one `RVPresentationDocument` holding a single slide group.
//! Each slide is an `RVDisplaySlide` whose notes carry the primary line and
//! whose text element carries a Base64 encoded RTF body.

use crate::encode::{base64_utf8, xml_attr_escape};
use crate::environment::{format_timestamp, generate_uuid, Environment};
use crate::error::Result;
use crate::normalize::{generate_filename, normalize, parse_lines};
use crate::pairing::pair_lines;
use crate::rtf::render_slide_text;
use crate::template::{Segment, Slot, Template};
use crate::types::{GeneratedDocument, Slide, SongInput};

/// Document wrapper around the slide fragments.
pub const DOCUMENT_TEMPLATE: Template = Template::new(
    "document",
    &[
        Segment::Literal(
            r#"<RVPresentationDocument CCLIArtistCredits="" CCLIAuthor="" CCLICopyrightYear="" CCLIDisplay="false" CCLIPublisher="" CCLISongNumber="" CCLISongTitle=""#,
        ),
        Segment::Slot(Slot::Title),
        Segment::Literal(
            r#"" backgroundColor="0 0 0 0" buildNumber="100991749" category="de Basis" chordChartPath="" docType="0" drawingBackgroundColor="false" height="1080" lastDateUsed=""#,
        ),
        Segment::Slot(Slot::LastDateUsed),
        Segment::Literal(
            r#"" notes="" os="2" resourcesDirectory="" selectedArrangementID="" usedCount="0" uuid=""#,
        ),
        Segment::Slot(Slot::Uuid),
        Segment::Literal(concat!(
            r#"" versionNumber="600" width="1920">"#,
            r#"<RVTimeline duration="0.000000" loop="false" playBackRate="1.000000" rvXMLIvarName="timeline" selectedMediaTrackIndex="0" timeOffset="0.000000">"#,
            r#"<array rvXMLIvarName="timeCues"></array><array rvXMLIvarName="mediaTracks"></array></RVTimeline>"#,
            r#"<array rvXMLIvarName="groups"><RVSlideGrouping color="0 0 0 0" name="" uuid=""#,
        )),
        Segment::Slot(Slot::Uuid),
        Segment::Literal(r#""><array rvXMLIvarName="slides">"#),
        Segment::Slot(Slot::Slides),
        Segment::Literal(concat!(
            r#"</array></RVSlideGrouping></array>"#,
            r#"<array rvXMLIvarName="arrangements"></array></RVPresentationDocument>"#,
        )),
    ],
);

/// A single display slide with one text element.
pub const SLIDE_TEMPLATE: Template = Template::new(
    "slide",
    &[
        Segment::Literal(r#"<RVDisplaySlide UUID=""#),
        Segment::Slot(Slot::Uuid),
        Segment::Literal(
            r#"" backgroundColor="0 0 0 1" chordChartPath="" drawingBackgroundColor="false" enabled="true" highlightColor="1 1 0 1" hotKey="" label="" notes=""#,
        ),
        Segment::Slot(Slot::Notes),
        Segment::Literal(concat!(
            r#"" socialItemCount="1"><array rvXMLIvarName="cues"></array>"#,
            r#"<array rvXMLIvarName="displayElements"><RVTextElement UUID=""#,
        )),
        Segment::Slot(Slot::Uuid),
        Segment::Literal(concat!(
            r#"" additionalLineFillHeight="0.000000" adjustsHeightToFit="false" bezelRadius="0.000000" displayDelay="0.000000" displayName="Default" drawLineBackground="false" drawingFill="false" drawingShadow="false" drawingStroke="false" fillColor="1 1 1 1" fromTemplate="false" lineBackgroundFillColor="1 1 1 1" lineBackgroundType="0" lineFillVerticalOffset="0.000000" locked="false" opacity="1.000000" persistent="false" revealType="0" rotation="0.000000" source="" textSourceRemoveLineReturnsOption="false" typeID="0" useAllCaps="true" verticalAlignment="0">"#,
            r#"<RVRect3D rvXMLIvarName="position">{-4 877 0 1930 153}</RVRect3D>"#,
            r#"<shadow rvXMLIvarName="shadow">0.000000|0 0 0 1|{4, -4}</shadow>"#,
            r#"<dictionary rvXMLIvarName="stroke"><NSColor rvXMLDictionaryKey="RVShapeElementStrokeColorKey">0 0 0 1</NSColor>"#,
            r#"<NSNumber hint="integer" rvXMLDictionaryKey="RVShapeElementStrokeWidthKey">0</NSNumber></dictionary>"#,
            r#"<NSString rvXMLIvarName="RTFData">"#,
        )),
        Segment::Slot(Slot::RtfData),
        Segment::Literal(r#"</NSString></RVTextElement></array></RVDisplaySlide>"#),
    ],
);

/// Generator for ProPresenter 6 documents.
///
/// Identifiers and the timestamp come from the wrapped [`Environment`]; every
/// identifier slot gets its own freshly generated UUID.
#[derive(Debug, Clone)]
pub struct Pro6Generator<E: Environment> {
    env: E,
}

impl<E: Environment> Pro6Generator<E> {
    /// Create a generator drawing identifiers and time from `env`.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Build the XML for one slide.
    ///
    /// `primary` goes into the notes attribute; the RTF body shows
    /// `secondary` when present and `primary` otherwise.
    pub fn slide_fragment(&mut self, primary: &str, secondary: &str) -> Result<String> {
        let mut out = String::new();
        self.write_slide(&mut out, primary, secondary)?;
        Ok(out)
    }

    fn write_slide(&mut self, out: &mut String, primary: &str, secondary: &str) -> Result<()> {
        let rtf = render_slide_text(primary, secondary)?;
        let env = &mut self.env;

        SLIDE_TEMPLATE.render_into(out, |slot, out| {
            match slot {
                Slot::Uuid => out.push_str(&generate_uuid(&mut *env)?),
                Slot::Notes => out.push_str(&xml_attr_escape(primary)),
                Slot::RtfData => out.push_str(&base64_utf8(&rtf)),
                other => return Err(SLIDE_TEMPLATE.unbound(other)),
            }
            Ok(())
        })
    }

    /// Build the document for already normalized lines.
    ///
    /// Lines are paired into slides (see [`pair_lines`]) and wrapped in the
    /// document template together with the escaped title and the current
    /// time from the environment.
    pub fn generate_document(
        &mut self,
        title: &str,
        lines: &[String],
        single_line: bool,
    ) -> Result<String> {
        let slides = pair_lines(lines, single_line);
        self.render_document(title, &slides)
    }

    /// Build the document for an explicit list of slides.
    pub fn render_document(&mut self, title: &str, slides: &[Slide]) -> Result<String> {
        log::debug!("Rendering document with {} slides", slides.len());

        let timestamp = format_timestamp(&self.env.now());
        let mut out = String::with_capacity(
            DOCUMENT_TEMPLATE.literal_len() + slides.len() * (SLIDE_TEMPLATE.literal_len() + 1024),
        );

        DOCUMENT_TEMPLATE.render_into(&mut out, |slot, out| {
            match slot {
                Slot::Uuid => out.push_str(&generate_uuid(&mut self.env)?),
                Slot::Title => out.push_str(&xml_attr_escape(title)),
                Slot::LastDateUsed => out.push_str(&timestamp),
                Slot::Slides => {
                    for slide in slides {
                        self.write_slide(out, &slide.primary, &slide.secondary)?;
                    }
                }
                other => return Err(DOCUMENT_TEMPLATE.unbound(other)),
            }
            Ok(())
        })?;

        Ok(out)
    }

    /// Run the full export: normalize, pair, render and name the file.
    pub fn export(&mut self, input: &SongInput) -> Result<GeneratedDocument> {
        let title = normalize(&input.title);
        let artist = normalize(&input.artist);
        let lines = parse_lines(&normalize(&input.raw_text));

        log::debug!(
            "Exporting '{}' by '{}': {} lines, single_line={}",
            title,
            artist,
            lines.len(),
            input.single_line
        );

        if !input.single_line && lines.len() % 2 != 0 {
            log::warn!(
                "Odd number of lines ({}); the last slide will have no translation",
                lines.len()
            );
        }

        let slides = pair_lines(&lines, input.single_line);
        let content = self.render_document(&title, &slides)?;
        let filename = generate_filename(&artist, &title);

        log::debug!("Generated {} ({} bytes)", filename, content.len());

        Ok(GeneratedDocument {
            filename,
            content,
            slide_count: slides.len(),
        })
    }
}
