//! Reply text → display markup.
//!
//! Replies arrive as plain text that may carry pre-escaped entities, markdown
//! style links (`[label](https://…)`) and bare links (`<https://…>`). The
//! pipeline decodes entities once, splits the text into [`Segment`]s, and
//! renders those either as HTML ([`to_html`]) or as terminal spans (the TUI
//! walks the segments itself).
//!
//! Everything outside a recognised link is escaped, so the HTML output is safe
//! to inject as markup.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Markdown link first, bare link second; leftmost match wins.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)|<(https?://[^\s>]+)>")
        .expect("link pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { label: String, href: String },
    LineBreak,
}

pub fn format(text: &str) -> String {
    to_html(&segments(text))
}

pub fn segments(text: &str) -> Vec<Segment> {
    let decoded = decode_entities(text);
    let mut out = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(&decoded) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_text(&mut out, &decoded[last..whole.start()]);

        if let (Some(label), Some(href)) = (caps.get(1), caps.get(2)) {
            out.push(Segment::Link {
                label: label.as_str().to_string(),
                href: href.as_str().to_string(),
            });
        } else if let Some(url) = caps.get(3) {
            out.push(Segment::Link {
                label: url.as_str().to_string(),
                href: url.as_str().to_string(),
            });
        }
        last = whole.end();
    }
    push_text(&mut out, &decoded[last..]);
    out
}

fn push_text(out: &mut Vec<Segment>, text: &str) {
    for (idx, part) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push(Segment::LineBreak);
        }
        if !part.is_empty() {
            out.push(Segment::Text(part.to_string()));
        }
    }
}

pub fn to_html(segments: &[Segment]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => html.push_str(&escape_html(text)),
            Segment::LineBreak => html.push_str("<br/>"),
            Segment::Link { label, href } => {
                html.push_str("<a href=\"");
                html.push_str(&escape_html(href));
                html.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                html.push_str(&escape_html(label).replace('\n', "<br/>"));
                html.push_str("</a>");
            }
        }
    }
    html
}

/// Every link target in order of appearance.
pub fn link_targets(text: &str) -> Vec<String> {
    segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Link { href, .. } => Some(href),
            _ => None,
        })
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// `&CounterClockwiseContourIntegral;` is the longest named reference.
const MAX_ENTITY_LEN: usize = 32;

/// Single-pass entity decode: `&amp;lt;` becomes `&lt;`, not `<`.
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| decode_entity(&tail[1..semi]).map(|text| (text, semi)));

        match decoded {
            Some((text, semi)) => {
                out.push_str(&text);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code)
            .filter(|c| *c != '\0')
            .map(String::from);
    }
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    // Named references expand to one or two code points. Anything longer is a
    // legacy prefix match (`&ampfoo;`), which stays verbatim.
    let token = format!("&{name};");
    match html_escape::decode_html_entities(&token) {
        Cow::Owned(text) if text != token && text.chars().count() <= 2 => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTD_ANCHOR: &str =
        r#"<a href="https://utdallas.edu" target="_blank" rel="noopener noreferrer">UTD</a>"#;

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(format(""), "");
        assert!(segments("").is_empty());
    }

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(format("a\nb"), "a<br/>b");
        assert_eq!(format("\n\n"), "<br/><br/>");
    }

    #[test]
    fn markdown_link() {
        assert_eq!(format("[UTD](https://utdallas.edu)"), UTD_ANCHOR);
    }

    #[test]
    fn bare_link_uses_url_as_label() {
        assert_eq!(
            format("<https://utdallas.edu>"),
            r#"<a href="https://utdallas.edu" target="_blank" rel="noopener noreferrer">https://utdallas.edu</a>"#
        );
    }

    #[test]
    fn pre_escaped_bare_link_is_decoded_then_linked() {
        assert_eq!(
            link_targets("See &lt;http://catalog.utdallas.edu&gt; for more"),
            vec!["http://catalog.utdallas.edu".to_string()]
        );
    }

    #[test]
    fn several_links_left_to_right() {
        let text = "Try [A](https://a.edu) or <http://b.edu>.\nSources: [C](https://c.edu/x)";
        assert_eq!(
            link_targets(text),
            vec!["https://a.edu", "http://b.edu", "https://c.edu/x"]
        );
        let html = format(text);
        assert!(html.starts_with("Try <a href=\"https://a.edu\""));
        assert!(html.contains(".<br/>Sources: "));
    }

    #[test]
    fn markup_outside_links_is_escaped() {
        assert_eq!(
            format("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(
            format("&lt;b onclick=&quot;x&quot;&gt;"),
            "&lt;b onclick=&quot;x&quot;&gt;"
        );
    }

    #[test]
    fn link_parts_are_escaped() {
        let html = format(r#"[<b>"hi"</b>](https://a.edu/?q=1&r=2)"#);
        assert_eq!(
            html,
            r#"<a href="https://a.edu/?q=1&amp;r=2" target="_blank" rel="noopener noreferrer">&lt;b&gt;&quot;hi&quot;&lt;/b&gt;</a>"#
        );
    }

    #[test]
    fn non_http_schemes_stay_text() {
        assert_eq!(format("[x](javascript:alert(1))"), "[x](javascript:alert(1))");
        assert_eq!(format("<ftp://a.edu>"), "&lt;ftp://a.edu&gt;");
        assert!(link_targets("[x](mailto:a@b.c)").is_empty());
    }

    #[test]
    fn link_inside_label_is_not_nested() {
        let segs = segments("[<https://x.edu>](https://y.edu)");
        assert_eq!(
            segs,
            vec![Segment::Link {
                label: "<https://x.edu>".to_string(),
                href: "https://y.edu".to_string(),
            }]
        );
    }

    #[test]
    fn decode_is_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(format("&amp;lt;"), "&amp;lt;");
    }

    #[test]
    fn numeric_and_unknown_entities() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&#xZZ; &bogus; & alone"), "&#xZZ; &bogus; & alone");
        assert_eq!(decode_entities("I&#8217;m"), "I\u{2019}m");
        assert_eq!(decode_entities("&#0;"), "&#0;");
    }

    #[test]
    fn named_typography_entities_decode() {
        assert_eq!(
            format("Here&rsquo;s UTD &mdash; Comets &copy;"),
            "Here\u{2019}s UTD \u{2014} Comets \u{a9}"
        );
        assert_eq!(decode_entities("2019&ndash;2024&hellip;"), "2019\u{2013}2024\u{2026}");
        assert_eq!(decode_entities("&nbsp;&apos;&quot;"), "\u{a0}'\"");
    }

    #[test]
    fn named_entity_without_table_entry_stays_verbatim() {
        assert_eq!(decode_entities("&ampfoo; &notanentity;"), "&ampfoo; &notanentity;");
        assert_eq!(decode_entities("&rsquo"), "&rsquo");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(format("Hi! I’m COSMO 🚀\nok"), "Hi! I’m COSMO 🚀<br/>ok");
    }
}
