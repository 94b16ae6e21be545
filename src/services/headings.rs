use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Heading level sub-images are generated for.
///
/// An article uses `<h2>` sections when it has any, otherwise `<h3>`; the
/// two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    fn pattern(self) -> &'static Regex {
        static H2: OnceLock<Regex> = OnceLock::new();
        static H3: OnceLock<Regex> = OnceLock::new();
        match self {
            HeadingLevel::H2 => H2.get_or_init(|| {
                Regex::new(r"(?is)<h2.*?>(.*?)</h2>").expect("h2 pattern is valid")
            }),
            HeadingLevel::H3 => H3.get_or_init(|| {
                Regex::new(r"(?is)<h3.*?>(.*?)</h3>").expect("h3 pattern is valid")
            }),
        }
    }
}

/// A heading found in article content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Inner text with markup removed and newlines turned into spaces
    pub text: String,
    /// Byte range of the whole heading element in the content
    pub block: Range<usize>,
}

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// All `<h2>` headings of `content`, or all `<h3>` headings if there are
/// no `<h2>` elements. Headings with no text left after cleaning are
/// dropped.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    let level = if HeadingLevel::H2.pattern().is_match(content) {
        HeadingLevel::H2
    } else {
        HeadingLevel::H3
    };

    level
        .pattern()
        .captures_iter(content)
        .filter_map(|caps| {
            let block = caps.get(0)?.range();
            let text = clean_heading(caps.get(1).map_or("", |m| m.as_str()));
            if text.trim().is_empty() {
                return None;
            }
            Some(Heading { level, text, block })
        })
        .collect()
}

/// Strip tags and turn line breaks into spaces.
pub fn clean_heading(inner: &str) -> String {
    tag_pattern()
        .replace_all(inner, "")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Paragraph that follows a heading and shows its image.
pub fn image_paragraph(location: &str, alt: &str) -> String {
    format!(
        "\n<p><img src=\"{}\" alt=\"{}\" /></p>",
        escape_attribute(location),
        escape_attribute(alt)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Insert each snippet at its byte offset.
///
/// Offsets refer to the original `content`; applying from the back keeps
/// earlier offsets valid, so snippets land in source order.
pub fn insert_at(content: &str, insertions: &[(usize, String)]) -> String {
    let mut sorted: Vec<&(usize, String)> = insertions.iter().collect();
    sorted.sort_by_key(|(offset, _)| *offset);

    let mut out = content.to_string();
    for (offset, snippet) in sorted.into_iter().rev() {
        if *offset <= out.len() && out.is_char_boundary(*offset) {
            out.insert_str(*offset, snippet);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(headings: &[Heading]) -> Vec<&str> {
        headings.iter().map(|h| h.text.as_str()).collect()
    }

    #[test]
    fn test_h2_preferred_over_h3() {
        let html = "<h2>One</h2><p>x</p><h3>Ignored</h3><h2 class=\"x\">Two</h2>";
        let headings = extract_headings(html);
        assert_eq!(texts(&headings), ["One", "Two"]);
        assert!(headings.iter().all(|h| h.level == HeadingLevel::H2));
    }

    #[test]
    fn test_falls_back_to_h3() {
        let html = "<p>intro</p><H3>First</H3><h3 id=\"b\">Second</h3>";
        let headings = extract_headings(html);
        assert_eq!(texts(&headings), ["First", "Second"]);
        assert_eq!(headings[0].level, HeadingLevel::H3);
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_headings("<p>plain</p>").is_empty());
        assert!(extract_headings("").is_empty());
    }

    #[test]
    fn test_heading_text_is_cleaned() {
        let html = "<h2><a href=\"#a\">Getting\nstarted</a> <em>fast</em></h2>";
        let headings = extract_headings(html);
        assert_eq!(texts(&headings), ["Getting started fast"]);
    }

    #[test]
    fn test_empty_heading_is_skipped() {
        let html = "<h2><br/></h2><h2>Real</h2>";
        assert_eq!(texts(&extract_headings(html)), ["Real"]);
    }

    #[test]
    fn test_block_covers_whole_element() {
        let html = "<p>a</p><h2 id=\"x\">Title</h2><p>b</p>";
        let headings = extract_headings(html);
        assert_eq!(&html[headings[0].block.clone()], "<h2 id=\"x\">Title</h2>");
    }

    #[test]
    fn test_image_paragraph_escapes_alt() {
        assert_eq!(
            image_paragraph("/img/a.png", "Tom & \"Jerry\""),
            "\n<p><img src=\"/img/a.png\" alt=\"Tom &amp; &quot;Jerry&quot;\" /></p>"
        );
    }

    #[test]
    fn test_insert_at_keeps_source_order() {
        let content = "<h2>A</h2><h2>A</h2>";
        let out = insert_at(content, &[(20, "[2]".to_string()), (10, "[1]".to_string())]);
        assert_eq!(out, "<h2>A</h2>[1]<h2>A</h2>[2]");
    }

    #[test]
    fn test_insert_at_ignores_bad_offsets() {
        assert_eq!(insert_at("abc", &[(10, "x".to_string())]), "abc");
        // Inside a multi-byte character
        assert_eq!(insert_at("中", &[(1, "x".to_string())]), "中");
    }
}
