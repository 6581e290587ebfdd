//! HTML to page text conversion

use crate::types::{PageContent, NO_CONTENT, NO_TITLE};
use encoding_rs::{Encoding, UTF_8};
use scraper::{ElementRef, Html, Selector};

/// Elements removed from the body together with everything inside them
const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "img", "input"];

/// How far into the document a `<meta>` charset declaration is looked for
const META_SCAN_LIMIT: usize = 1024;

/// Decode a page body to text
///
/// The charset comes from the `Content-Type` header, then from a `<meta>`
/// declaration near the top of the document, then defaults to UTF-8. A byte
/// order mark overrides all of them.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(header_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c: char| c == '"' || c == '\''))
    })
}

/// Covers both `<meta charset=...>` and `<meta http-equiv content="...; charset=...">`
fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SCAN_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let value = &tag[tag.find("charset=")? + "charset=".len()..];
        let label = value
            .trim_start_matches(|c: char| c == '"' || c == '\'')
            .split(|c: char| matches!(c, '"' | '\'' | ';' | '/' | '>') || c.is_whitespace())
            .next()?;
        Encoding::for_label(label.as_bytes())
    })
}

/// Parse an HTML document into its title and visible body text
///
/// Body text is one trimmed text run per line. Missing title or body text
/// fall back to [`NO_TITLE`] and [`NO_CONTENT`].
pub fn parse_page(html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let title = first_element(&document, "title")
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let body = first_element(&document, "body")
        .map(visible_text)
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| NO_CONTENT.to_string());

    PageContent { title, body }
}

fn first_element<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Newline-joined text of an element, skipping stripped subtrees
fn visible_text(element: ElementRef<'_>) -> String {
    let mut lines = Vec::new();
    collect_text(element, &mut lines);
    lines.join("\n")
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        } else if let Some(child) = ElementRef::wrap(child) {
            match child.value().name() {
                "noscript" => collect_noscript_text(child, lines),
                name if STRIPPED_ELEMENTS.contains(&name) => {}
                _ => collect_text(child, lines),
            }
        }
    }
}

/// The parser keeps `<noscript>` contents as raw markup; parse it and walk the result
fn collect_noscript_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for markup in element.text() {
        let fragment = Html::parse_fragment(markup);
        collect_text(fragment.root_element(), lines);
    }
}
