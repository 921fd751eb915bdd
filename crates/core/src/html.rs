//! Handling for the small HTML subset the raw parser emits.
//!
//! Text bodies arrive as `<p style="text-align: ...">` paragraphs holding
//! `<span style="font-size: 18pt; ...">` runs. Only the pieces the
//! converters need are extracted; this is not a general HTML parser.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches point font sizes inside inline styles.
static FONT_SIZE_PT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-size:\s*([\d.]+)pt").unwrap());

/// Matches a start, end or self-closing tag, capturing the closing slash,
/// the tag name and the attribute text.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^>]*)>").unwrap());

/// Matches a `style` attribute in either quote style.
static STYLE_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Matches character references.
static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z]+);").unwrap());

/// Rewrite `font-size: Npt` declarations to pixels scaled by `ratio`.
pub fn convert_font_sizes(html: &str, ratio: f64) -> String {
    FONT_SIZE_PT_REGEX
        .replace_all(html, |caps: &Captures| match caps[1].parse::<f64>() {
            Ok(pt) => format!("font-size: {:.1}px", pt * ratio),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

/// Formatting and text pulled out of a table cell fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFragment {
    /// `text-align` of the first paragraph.
    pub align: Option<String>,
    /// Numeric `font-size` of the first span, in its own unit.
    pub font_size: Option<f64>,
    /// `font-family` of the first span, without quotes.
    pub font_family: Option<String>,
    /// `color` of the first span.
    pub color: Option<String>,
    /// Visible text; paragraphs and `<br>` become newlines.
    pub text: String,
}

/// Parse a table cell fragment.
pub fn parse_cell_fragment(html: &str) -> CellFragment {
    let mut fragment = CellFragment::default();
    let mut seen_paragraph = false;
    let mut seen_span = false;
    let mut text = String::new();
    let mut last = 0;

    for caps in TAG_REGEX.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        text.push_str(&decode_entities(&html[last..whole.start()]));
        last = whole.end();

        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let attrs = &caps[3];

        match (name.as_str(), closing) {
            ("p", false) | ("div", false) => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                if name == "p" && !seen_paragraph {
                    seen_paragraph = true;
                    let style = style_attr(attrs);
                    fragment.align = style_property(&style, "text-align");
                }
            }
            ("p", true) | ("div", true) => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            ("br", _) => text.push('\n'),
            ("span", false) if !seen_span => {
                seen_span = true;
                let style = style_attr(attrs);
                fragment.font_size =
                    style_property(&style, "font-size").and_then(|v| leading_number(&v));
                fragment.font_family = style_property(&style, "font-family")
                    .map(|v| v.trim_matches(|c| c == '"' || c == '\'').to_string());
                fragment.color = style_property(&style, "color");
            }
            _ => {}
        }
    }
    text.push_str(&decode_entities(&html[last..]));

    fragment.text = text.trim_end_matches('\n').to_string();
    fragment
}

/// Inline style text of a tag's attributes, empty when absent.
fn style_attr(attrs: &str) -> String {
    STYLE_ATTR_REGEX
        .captures(attrs)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Value of a CSS declaration inside an inline style.
fn style_property(style: &str, name: &str) -> Option<String> {
    style.split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(name) {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Leading numeric part of a CSS length such as `18pt`.
fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
