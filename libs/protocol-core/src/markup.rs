//! Markup helpers: text extraction, escaping, and document serialization.

use crate::types::{Block, FormattedDocument};

/// Escape `&`, `<`, `>` for safe inclusion in markup.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Plain text content of a markup fragment: tags removed, named and numeric
/// character references decoded. Adjacent elements are concatenated without
/// a separator.
pub fn markup_to_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(idx) = rest.find(['<', '&']) {
        text.push_str(&rest[..idx]);
        rest = &rest[idx..];

        if rest.starts_with('<') {
            match rest.find('>') {
                Some(end) => rest = &rest[end + 1..],
                None => {
                    // Unterminated tag: keep it as text.
                    text.push_str(rest);
                    rest = "";
                }
            }
        } else {
            match decode_entity(rest) {
                Some((decoded, consumed)) => {
                    text.push(decoded);
                    rest = &rest[consumed..];
                }
                None => {
                    text.push('&');
                    rest = &rest[1..];
                }
            }
        }
    }
    text.push_str(rest);
    text
}

/// Longest reference body we look for, e.g. `#x1F600` or `plusmn`.
const MAX_ENTITY_CHARS: usize = 8;

const NAMED_ENTITIES: [(&str, char); 20] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", ' '),
    ("deg", '\u{b0}'),
    ("plusmn", '\u{b1}'),
    ("micro", '\u{b5}'),
    ("middot", '\u{b7}'),
    ("times", '\u{d7}'),
    ("le", '\u{2264}'),
    ("ge", '\u{2265}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("hellip", '\u{2026}'),
];

/// Decode a reference at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let semi = s.get(1..)?.find(';')? + 1;
    let name = &s[1..semi];
    if name.is_empty() || name.chars().count() > MAX_ENTITY_CHARS {
        return None;
    }

    let decoded = match name.strip_prefix('#') {
        Some(num) => {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            match char::from_u32(code)? {
                '\u{a0}' => ' ',
                c => c,
            }
        }
        None => NAMED_ENTITIES
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|(_, c)| *c)?,
    };
    Some((decoded, semi + 1))
}

/// Serialize a formatted document. An empty document renders as `""`.
pub fn render(doc: &FormattedDocument) -> String {
    if doc.header.is_none() && doc.blocks.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<div class="protoBlock">"#);
    if let Some(header) = &doc.header {
        out.push_str(r#"<div class="protoHdr">"#);
        out.push_str(&escape_html(header));
        out.push_str("</div>");
    }
    for block in &doc.blocks {
        render_block(block, &mut out);
    }
    out.push_str("</div>");
    out
}

fn render_block(block: &Block, out: &mut String) {
    match &block.title {
        Some(title) => {
            out.push_str(r#"<div class="medBlock"><div class="medTitle">"#);
            out.push_str(&escape_html(title));
            out.push_str("</div>");
            render_bullets(&block.bullets, out);
            out.push_str("</div>");
        }
        None => render_bullets(&block.bullets, out),
    }
}

// Bullets are already escaped and highlighted.
fn render_bullets(bullets: &[String], out: &mut String) {
    out.push_str(r#"<ul class="proto">"#);
    for bullet in bullets {
        out.push_str("<li>");
        out.push_str(bullet);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_tags_and_decodes_entities() {
        let text = markup_to_text("<p>HR &lt; 50</p><p>Atropine&nbsp;0.5 mg</p>");
        assert_eq!(text, "HR < 50Atropine 0.5 mg");
    }

    #[test]
    fn unknown_entity_is_kept() {
        assert_eq!(markup_to_text("a &bogus; b & c"), "a &bogus; b & c");
        assert_eq!(markup_to_text("AT&T; 5 mg"), "AT&T; 5 mg");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(markup_to_text("SBP &#8805; 90"), "SBP \u{2265} 90");
        assert_eq!(markup_to_text("SBP &#x2265; 90"), "SBP \u{2265} 90");
        assert_eq!(markup_to_text("it&#39;s"), "it's");
        assert_eq!(markup_to_text("a&#160;b"), "a b");
    }

    #[test]
    fn decodes_common_named_references() {
        assert_eq!(markup_to_text("37&deg;C &le; 5 min"), "37\u{b0}C \u{2264} 5 min");
    }

    #[test]
    fn malformed_numeric_reference_is_kept() {
        assert_eq!(markup_to_text("&#xZZ; &#; &#99999999;"), "&#xZZ; &#; &#99999999;");
    }

    #[test]
    fn unterminated_tag_is_text() {
        assert_eq!(markup_to_text("HR <50 bpm"), "HR <50 bpm");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn empty_document_renders_empty() {
        assert_eq!(render(&FormattedDocument::default()), "");
    }

    #[test]
    fn renders_header_and_titled_block() {
        let doc = FormattedDocument {
            header: Some("Bradycardia".to_string()),
            blocks: vec![Block {
                title: Some("Atropine - Adult".to_string()),
                bullets: vec!["<b>0.5 mg</b> IV.".to_string()],
            }],
        };
        assert_eq!(
            render(&doc),
            concat!(
                r#"<div class="protoBlock"><div class="protoHdr">Bradycardia</div>"#,
                r#"<div class="medBlock"><div class="medTitle">Atropine - Adult</div>"#,
                r#"<ul class="proto"><li><b>0.5 mg</b> IV.</li></ul></div></div>"#,
            )
        );
    }

    #[test]
    fn untitled_block_renders_bare_list() {
        let doc = FormattedDocument {
            header: None,
            blocks: vec![Block {
                title: None,
                bullets: vec!["One.".to_string(), "Two.".to_string()],
            }],
        };
        assert_eq!(
            render(&doc),
            r#"<div class="protoBlock"><ul class="proto"><li>One.</li><li>Two.</li></ul></div>"#
        );
    }
}
