//! Parser for YouTube's timed text XML format
//!
//! The body looks like `<transcript><text start="0.5" dur="1.2">Hello</text>...</transcript>`.
//! Text content is XML escaped and usually HTML escaped a second time, so entities
//! are decoded twice before markup such as `<i>` or `<font>` is stripped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{TranscriptContent, TranscriptSegment};

static TEXT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").expect("valid text element regex")
});

static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([\w-]+)\s*=\s*"([^"]*)""#).expect("valid attribute regex"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid entity regex")
});

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid markup regex"));

/// Parse a timed text document into segments
pub fn parse(xml: &str) -> TranscriptContent {
    let segments = TEXT_ELEMENT
        .captures_iter(xml)
        .filter_map(|element| {
            let raw_text = element.get(2)?.as_str();
            if raw_text.is_empty() {
                return None;
            }
            let attributes = element.get(1).map(|m| m.as_str()).unwrap_or_default();

            let start = attribute(attributes, "start").unwrap_or(0.0);
            let duration = attribute(attributes, "dur").unwrap_or(0.0);

            let text = strip_markup(&unescape(&unescape(raw_text)));
            Some(TranscriptSegment::new(text, start, duration))
        })
        .collect();

    TranscriptContent::new(segments)
}

fn attribute(attributes: &str, name: &str) -> Option<f64> {
    ATTRIBUTE
        .captures_iter(attributes)
        .find(|attr| &attr[1] == name)
        .and_then(|attr| attr[2].trim().parse().ok())
}

/// Decode one level of XML/HTML character references
pub fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(entity)
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        _ => return None,
    };
    Some(c)
}

fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}
