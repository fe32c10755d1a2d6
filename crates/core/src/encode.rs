//! Attribute escaping and Base64 payload encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Escape text for use inside a double-quoted XML attribute.
///
/// Handles `&`, `"`, `<` and `>`, ampersand first so nothing is escaped
/// twice. Apostrophes are left alone; the document only uses double quotes.
pub fn xml_attr_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Encode text as standard padded Base64 over its UTF-8 bytes.
pub fn base64_utf8(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::escape::unescape;

    fn decode(encoded: &str) -> String {
        let bytes = STANDARD.decode(encoded).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_escape_each_char() {
        assert_eq!(xml_attr_escape("&"), "&amp;");
        assert_eq!(xml_attr_escape("\""), "&quot;");
        assert_eq!(xml_attr_escape("<"), "&lt;");
        assert_eq!(xml_attr_escape(">"), "&gt;");
    }

    #[test]
    fn test_escape_leaves_apostrophes() {
        assert_eq!(xml_attr_escape("don't"), "don't");
    }

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(xml_attr_escape("&amp;"), "&amp;amp;");
        assert_eq!(xml_attr_escape("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
    }

    #[test]
    fn test_escape_round_trips_through_xml_unescape() {
        let samples = [
            "",
            "plain text",
            "a & b < c > d \"e\"",
            "&amp; already escaped?",
            "<RVTextElement UUID=\"x\">",
            "Grüß & 世界 'quoted'",
        ];
        for sample in samples {
            let escaped = xml_attr_escape(sample);
            assert_eq!(unescape(&escaped).unwrap(), sample);
        }
    }

    #[test]
    fn test_escaped_text_has_no_bare_ampersand() {
        let escaped = xml_attr_escape("R&B & <soul> \"live\"");
        let mut rest = escaped.as_str();
        while let Some(idx) = rest.find('&') {
            let tail = &rest[idx..];
            assert!(
                ["&amp;", "&quot;", "&lt;", "&gt;"]
                    .iter()
                    .any(|entity| tail.starts_with(entity)),
                "bare ampersand in {}",
                escaped
            );
            rest = &rest[idx + 1..];
        }
    }

    #[test]
    fn test_base64_known_values() {
        assert_eq!(base64_utf8(""), "");
        assert_eq!(base64_utf8("Hello"), "SGVsbG8=");
        assert_eq!(base64_utf8("é"), "w6k=");
    }

    #[test]
    fn test_base64_round_trips_multibyte() {
        let samples = ["Grüße", "café", "世界", "🎵🙏", "mixed é 世 🎵", "{\\rtf1\n}"];
        for sample in samples {
            assert_eq!(decode(&base64_utf8(sample)), sample);
        }
    }

    #[test]
    fn test_base64_has_no_line_wrapping() {
        let long = "Amazing grace how sweet the sound ".repeat(20);
        let encoded = base64_utf8(&long);
        assert!(!encoded.contains('\n'));
        assert_eq!(encoded.len() % 4, 0);
    }
}
