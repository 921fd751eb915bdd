//! Raw presentation tree as emitted by the external file-format parser.
//!
//! Every field is optional on the wire and defaults when absent, so an empty
//! object is a valid (empty) document. Units are the parser's points.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// A whole raw document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDocument {
    /// Slides in presentation order.
    pub slides: Vec<RawSlide>,

    /// Theme palette declared by the source file.
    pub theme_colors: Vec<String>,

    /// Declared canvas size.
    pub size: RawSize,
}

/// Declared canvas size of the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSize {
    pub width: f64,
    pub height: f64,
}

/// A single raw slide.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSlide {
    /// Slide background fill.
    pub fill: RawFill,

    /// Elements placed on the slide itself.
    pub elements: RawElements,

    /// Elements inherited from the slide layout/master.
    pub layout_elements: RawElements,

    /// Speaker notes.
    pub note: String,
}

/// Fill of a slide background or an element.
///
/// The wire form is `{"type": ..., "value": ...}`. Unknown types and
/// malformed payloads degrade to [`RawFill::None`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawFill {
    #[default]
    None,
    Color(String),
    Image(RawImageFill),
    Gradient(RawGradientFill),
}

#[derive(Deserialize)]
struct FillRepr {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    value: Value,
}

impl From<Value> for RawFill {
    fn from(value: Value) -> Self {
        if value.is_null() {
            return RawFill::None;
        }
        let repr: FillRepr = match serde_json::from_value(value) {
            Ok(repr) => repr,
            Err(e) => {
                log::debug!("Ignoring malformed fill: {}", e);
                return RawFill::None;
            }
        };

        match repr.kind.as_str() {
            "color" | "solidFill" => match repr.value {
                Value::String(color) if !color.is_empty() => RawFill::Color(color),
                _ => RawFill::None,
            },
            "image" | "imageFill" => serde_json::from_value(repr.value)
                .map(RawFill::Image)
                .unwrap_or_else(|e| {
                    log::debug!("Ignoring malformed image fill: {}", e);
                    RawFill::None
                }),
            "gradient" | "gradientFill" => serde_json::from_value(repr.value)
                .map(RawFill::Gradient)
                .unwrap_or_else(|e| {
                    log::debug!("Ignoring malformed gradient fill: {}", e);
                    RawFill::None
                }),
            _ => RawFill::None,
        }
    }
}

/// Picture fill payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawImageFill {
    pub pic_base64: String,
}

/// Gradient fill payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawGradientFill {
    /// `"line"` for linear gradients, anything else is radial.
    pub path: String,
    /// Rotation in degrees.
    pub rot: f64,
    pub colors: Vec<RawGradientStop>,
}

/// A gradient stop. Positions arrive as `"45%"` strings or bare numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawGradientStop {
    pub pos: RawStopPos,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawStopPos {
    Number(f64),
    Text(String),
}

impl Default for RawStopPos {
    fn default() -> Self {
        RawStopPos::Number(0.0)
    }
}

impl RawStopPos {
    /// Position as a percentage, reading the leading integer of text forms.
    pub fn percent(&self) -> f64 {
        match self {
            RawStopPos::Number(n) => n.trunc(),
            RawStopPos::Text(text) => {
                let text = text.trim();
                let end = text
                    .char_indices()
                    .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                text[..end].parse().unwrap_or(0.0)
            }
        }
    }
}

/// Geometry shared by every raw element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise.
    pub rotate: f64,
    pub is_flip_h: bool,
    pub is_flip_v: bool,
    /// Z-order within the parent.
    pub order: i64,
}

/// Border attributes as flattened onto text, image and shape elements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBorder {
    pub border_color: String,
    pub border_width: f64,
    pub border_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawShadow {
    pub h: f64,
    pub v: f64,
    pub blur: f64,
    pub color: String,
}

/// An element list decoded entry by entry.
///
/// An entry that does not decode as a [`RawElement`] is kept out of `items`
/// and recorded in `skipped`, so one bad element never fails its siblings.
#[derive(Debug, Clone, Default)]
pub struct RawElements {
    pub items: Vec<RawElement>,
    pub skipped: Vec<SkippedElement>,
}

/// A list entry that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedElement {
    /// The entry's `type` field, or `"unknown"`.
    pub kind: String,
    pub reason: String,
}

impl RawElements {
    /// Move every entry of `other` after this list's entries.
    pub fn extend(&mut self, other: RawElements) {
        self.items.extend(other.items);
        self.skipped.extend(other.skipped);
    }

    fn decode(value: Value) -> Self {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Null => Vec::new(),
            other => {
                log::warn!("Ignoring element list that is not an array: {}", other);
                Vec::new()
            }
        };

        let mut list = RawElements::default();
        for entry in entries {
            let kind = entry
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            match serde_json::from_value::<RawElement>(entry) {
                Ok(element) => list.items.push(element),
                Err(e) => {
                    log::warn!("Skipping malformed '{}' element: {}", kind, e);
                    list.skipped.push(SkippedElement {
                        kind,
                        reason: e.to_string(),
                    });
                }
            }
        }
        list
    }
}

impl<'de> Deserialize<'de> for RawElements {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RawElements::decode)
    }
}

/// A raw element, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawElement {
    Text(RawText),
    Image(RawImage),
    Shape(RawShape),
    Table(RawTable),
    Chart(RawChart),
    Group(RawContainer),
    Diagram(RawContainer),
    Math(RawMath),
    Audio(RawMedia),
    Video(RawMedia),
}

impl RawElement {
    pub fn frame(&self) -> &RawFrame {
        match self {
            RawElement::Text(el) => &el.frame,
            RawElement::Image(el) => &el.frame,
            RawElement::Shape(el) => &el.frame,
            RawElement::Table(el) => &el.frame,
            RawElement::Chart(el) => &el.frame,
            RawElement::Group(el) | RawElement::Diagram(el) => &el.frame,
            RawElement::Math(el) => &el.frame,
            RawElement::Audio(el) | RawElement::Video(el) => &el.frame,
        }
    }

    pub fn frame_mut(&mut self) -> &mut RawFrame {
        match self {
            RawElement::Text(el) => &mut el.frame,
            RawElement::Image(el) => &mut el.frame,
            RawElement::Shape(el) => &mut el.frame,
            RawElement::Table(el) => &mut el.frame,
            RawElement::Chart(el) => &mut el.frame,
            RawElement::Group(el) | RawElement::Diagram(el) => &mut el.frame,
            RawElement::Math(el) => &mut el.frame,
            RawElement::Audio(el) | RawElement::Video(el) => &mut el.frame,
        }
    }

    /// Whether the element carries its own flip flags.
    ///
    /// Containers are excluded: their flips are applied to their children
    /// when they are flattened.
    pub fn supports_flip(&self) -> bool {
        matches!(self, RawElement::Image(_) | RawElement::Shape(_))
    }

    /// The wire name of the element kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawElement::Text(_) => "text",
            RawElement::Image(_) => "image",
            RawElement::Shape(_) => "shape",
            RawElement::Table(_) => "table",
            RawElement::Chart(_) => "chart",
            RawElement::Group(_) => "group",
            RawElement::Diagram(_) => "diagram",
            RawElement::Math(_) => "math",
            RawElement::Audio(_) => "audio",
            RawElement::Video(_) => "video",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawText {
    #[serde(flatten)]
    pub frame: RawFrame,
    /// HTML content with point-based font sizes.
    pub content: String,
    pub fill: RawFill,
    #[serde(flatten)]
    pub border: RawBorder,
    pub shadow: Option<RawShadow>,
    pub is_vertical: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawImage {
    #[serde(flatten)]
    pub frame: RawFrame,
    /// Data URL or file reference.
    pub src: String,
    /// Crop rectangle in percent from each edge.
    pub rect: Option<RawCrop>,
    /// Geometry the picture is wrapped in.
    pub geom: Option<String>,
    #[serde(flatten)]
    pub border: RawBorder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCrop {
    pub t: f64,
    pub b: f64,
    pub l: f64,
    pub r: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShape {
    #[serde(flatten)]
    pub frame: RawFrame,
    /// Vendor shape type (`rect`, `roundRect`, `custom`, `bentConnector3`, ...).
    pub shap_type: String,
    /// Raw SVG path data, in the element's original units.
    pub path: Option<String>,
    pub content: String,
    pub fill: RawFill,
    #[serde(flatten)]
    pub border: RawBorder,
    pub shadow: Option<RawShadow>,
    pub v_align: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTable {
    #[serde(flatten)]
    pub frame: RawFrame,
    pub data: Vec<Vec<RawCell>>,
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub borders: RawBorders,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCell {
    /// HTML fragment.
    pub text: String,
    pub row_span: Option<u32>,
    pub col_span: Option<u32>,
    pub fill_color: Option<String>,
    pub font_color: Option<String>,
    pub font_bold: bool,
    pub borders: RawBorders,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawBorders {
    pub top: Option<RawBorder>,
    pub bottom: Option<RawBorder>,
    pub left: Option<RawBorder>,
    pub right: Option<RawBorder>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChart {
    #[serde(flatten)]
    pub frame: RawFrame,
    /// Vendor chart type (`barChart`, `pie3DChart`, ...).
    pub chart_type: String,
    pub data: RawChartData,
    pub colors: Vec<String>,
    pub bar_dir: Option<String>,
    pub grouping: Option<String>,
}

/// Chart payload: a series list for category charts, a coordinate matrix
/// (`[xs, ys]`) for scatter and bubble charts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawChartData {
    Series(Vec<RawChartSeries>),
    Matrix(Vec<Vec<f64>>),
}

impl Default for RawChartData {
    fn default() -> Self {
        RawChartData::Series(Vec::new())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawChartSeries {
    pub key: String,
    pub values: Vec<RawChartPoint>,
    /// Category labels keyed by their index.
    pub xlabels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawChartPoint {
    pub y: f64,
}

/// Group or diagram container. Child frames are relative to the container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawContainer {
    #[serde(flatten)]
    pub frame: RawFrame,
    pub elements: RawElements,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMath {
    #[serde(flatten)]
    pub frame: RawFrame,
    /// Pre-rendered picture of the expression.
    pub pic_base64: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMedia {
    #[serde(flatten)]
    pub frame: RawFrame,
    pub blob: Option<String>,
    pub src: Option<String>,
}
