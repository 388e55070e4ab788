//! go-import meta tag lookup
//!
//! HTML is walked as a lenient event stream: void elements such as `<meta>`
//! never close, so end-tag matching is disabled. Documents the reader still
//! rejects are treated as having no match.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

/// Attributes of a matched element, keys lowercased, values unescaped
pub type Attributes = Vec<(String, String)>;

/// Return the value of attribute `key` (case-insensitive)
pub fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Elements an HTML parser keeps in the document head
///
/// Any other element start ends the head, whether or not `<head>` or
/// `<body>` appear in the markup.
const HEAD_CONTENT: &[&str] = &[
    "html", "head", "base", "link", "meta", "noscript", "script", "style", "template", "title",
];

/// Find the first element of the document head for which
/// `predicate(element_name, attributes)` holds
///
/// The head is open from the start of the document, so pages that omit
/// `<head>` still have one. It ends at `</head>`, at `<body>` or at the
/// first element that cannot live in a head. Element names are passed
/// lowercased.
pub fn find_in_head<P>(html: &str, predicate: P) -> Option<Attributes>
where
    P: Fn(&str, &[(String, String)]) -> bool,
{
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = element_name(e);
                if !HEAD_CONTENT.contains(&name.as_str()) {
                    return None;
                }
                let attributes = collect_attributes(e);
                if predicate(&name, &attributes) {
                    return Some(attributes);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                if matches!(name.as_str(), "head" | "body" | "html") {
                    return None;
                }
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(e) => {
                debug!(
                    "stopped scanning HTML at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                return None;
            }
        }
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn collect_attributes(e: &BytesStart<'_>) -> Attributes {
    e.html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            (key, value)
        })
        .collect()
}

/// Content of the first `<meta name="go-import">` in the document head
pub fn go_import_content(html: &str) -> Option<String> {
    let attributes = find_in_head(html, |name, attrs| {
        name == "meta" && attribute(attrs, "name") == Some("go-import")
    })?;
    attribute(&attributes, "content").map(str::to_string)
}

/// Pick the repository URL out of a go-import content string
///
/// The first whitespace-separated token starting with `https://` wins. When
/// the content mentions git and the URL lacks a `.git` suffix, one is added.
pub fn redirect_target(content: &str) -> Option<String> {
    let url = content
        .split_whitespace()
        .find(|token| token.starts_with("https://"))?;

    if !url.ends_with(".git") && content.contains("git") {
        Some(format!("{}.git", url))
    } else {
        Some(url.to_string())
    }
}
