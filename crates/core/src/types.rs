//! Editor-side slide and element model produced by the import pipeline.
//!
//! All coordinates are in target (viewport) units.

use serde::{Deserialize, Serialize};

/// A 2D point `[x, y]`.
pub type Point = [f64; 2];

/// Generate a fresh opaque identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,

    /// Elements in z-order.
    pub elements: Vec<Element>,

    pub background: SlideBackground,

    /// Speaker notes.
    #[serde(default)]
    pub remark: String,
}

impl Slide {
    /// Create an empty slide with a fresh id.
    pub fn new(background: SlideBackground) -> Self {
        Self {
            id: new_id(),
            elements: Vec::new(),
            background,
            remark: String::new(),
        }
    }

    /// Replace the slide id and every element (and table cell) id.
    pub fn refresh_ids(&mut self) {
        self.id = new_id();
        for element in &mut self.elements {
            element.refresh_ids();
        }
    }
}

/// Slide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideBackground {
    Solid { color: String },
    Gradient { gradient: Gradient },
    Image { image: BackgroundImage },
}

impl Default for SlideBackground {
    fn default() -> Self {
        SlideBackground::Solid {
            color: "#fff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub src: String,
    pub size: BackgroundSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSize {
    Cover,
    Contain,
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub colors: Vec<GradientStop>,
    /// Rotation in degrees.
    pub rotate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position in percent.
    pub pos: f64,
    pub color: String,
}

/// An element on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
    Shape(ShapeElement),
    Line(LineElement),
    Table(TableElement),
    Chart(ChartElement),
    Audio(AudioElement),
    Video(VideoElement),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Element::Text(el) => &el.id,
            Element::Image(el) => &el.id,
            Element::Shape(el) => &el.id,
            Element::Line(el) => &el.id,
            Element::Table(el) => &el.id,
            Element::Chart(el) => &el.id,
            Element::Audio(el) => &el.id,
            Element::Video(el) => &el.id,
        }
    }

    /// Top-left corner of the element.
    pub fn position(&self) -> Point {
        match self {
            Element::Text(el) => [el.left, el.top],
            Element::Image(el) => [el.left, el.top],
            Element::Shape(el) => [el.left, el.top],
            Element::Line(el) => [el.left, el.top],
            Element::Table(el) => [el.left, el.top],
            Element::Chart(el) => [el.left, el.top],
            Element::Audio(el) => [el.left, el.top],
            Element::Video(el) => [el.left, el.top],
        }
    }

    /// The wire name of the element kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Image(_) => "image",
            Element::Shape(_) => "shape",
            Element::Line(_) => "line",
            Element::Table(_) => "table",
            Element::Chart(_) => "chart",
            Element::Audio(_) => "audio",
            Element::Video(_) => "video",
        }
    }

    fn refresh_ids(&mut self) {
        let id = match self {
            Element::Text(el) => &mut el.id,
            Element::Image(el) => &mut el.id,
            Element::Shape(el) => &mut el.id,
            Element::Line(el) => &mut el.id,
            Element::Table(el) => {
                for cell in el.data.iter_mut().flatten() {
                    cell.id = new_id();
                }
                &mut el.id
            }
            Element::Chart(el) => &mut el.id,
            Element::Audio(el) => &mut el.id,
            Element::Video(el) => &mut el.id,
        };
        *id = new_id();
    }
}

/// Stroke around an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: String,
    pub width: f64,
    /// `solid`, `dashed` or `dotted`.
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub h: f64,
    pub v: f64,
    pub blur: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    /// HTML content with pixel font sizes.
    pub content: String,
    pub default_font_name: String,
    pub default_color: String,
    pub line_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default)]
    pub vertical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    pub src: String,
    pub fixed_ratio: bool,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<ImageClip>,
}

/// Crop/mask descriptor. `range` is `[[left, top], [right, bottom]]` in
/// percent of the picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageClip {
    pub shape: String,
    pub range: [Point; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    pub view_box: [f64; 2],
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypoints: Option<Vec<f64>>,
    pub fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub fixed_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ShapeText>,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
    /// Freeform path that should not be re-derived from a formula.
    #[serde(default)]
    pub special: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeText {
    pub content: String,
    pub default_font_name: String,
    pub default_color: String,
    pub align: VerticalAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    /// Stroke width.
    pub width: f64,
    pub start: Point,
    pub end: Point,
    pub style: String,
    pub color: String,
    /// Marker at the start and end point (`""` or `"arrow"`).
    pub points: [String; 2],
    /// Bend midpoint for elbow connectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broken2: Option<f64>,
    /// Control offsets for curved connectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cubic: Option<[Point; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    /// Column widths as fractions summing to 1.
    pub col_widths: Vec<f64>,
    pub cell_min_height: f64,
    pub data: Vec<Vec<TableCell>>,
    pub outline: Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub id: String,
    pub colspan: u32,
    pub rowspan: u32,
    pub text: String,
    pub style: TableCellStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCellStyle {
    #[serde(default)]
    pub bold: bool,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backcolor: Option<String>,
    /// CSS size such as `"24.0px"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fontsize: Option<String>,
    pub fontname: String,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
    pub theme_colors: Vec<String>,
    pub text_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Column,
    Line,
    Area,
    Scatter,
    Pie,
    Radar,
    Ring,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub legends: Vec<String>,
    pub series: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    pub src: String,
    pub fixed_ratio: bool,
    /// Icon colour.
    pub color: String,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotate: f64,
    pub src: String,
    pub autoplay: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> Element {
        Element::Video(VideoElement {
            id: new_id(),
            left: 1.0,
            top: 2.0,
            width: 3.0,
            height: 4.0,
            rotate: 0.0,
            src: "movie.mp4".to_string(),
            autoplay: false,
        })
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_element_serializes_with_type_tag() {
        let json = serde_json::to_value(video()).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["left"], 1.0);
    }

    #[test]
    fn test_background_serialization() {
        let json = serde_json::to_value(SlideBackground::default()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "solid", "color": "#fff"}));
    }

    #[test]
    fn test_refresh_ids() {
        let mut slide = Slide::new(SlideBackground::default());
        slide.elements.push(video());
        let before_slide = slide.id.clone();
        let before_el = slide.elements[0].id().to_string();

        slide.refresh_ids();

        assert_ne!(slide.id, before_slide);
        assert_ne!(slide.elements[0].id(), before_el);
        assert_eq!(slide.elements[0].position(), [1.0, 2.0]);
    }

    #[test]
    fn test_slide_round_trips_through_json() {
        let mut slide = Slide::new(SlideBackground::default());
        slide.elements.push(video());
        let json = serde_json::to_string(&slide).unwrap();
        let back: Slide = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slide);
    }
}
