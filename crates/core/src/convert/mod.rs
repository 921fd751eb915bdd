//! Per-kind conversion of raw elements into editor elements.
//!
//! Every converter scales linear fields by the context ratio. Shapes are the
//! only kind that can fail; the flattener decides what to do with the error.

pub mod chart;
pub mod image;
pub mod line;
pub mod media;
pub mod shape;
pub mod table;
pub mod text;

pub use chart::{chart_type_for, convert_chart};
pub use image::{convert_image, is_legacy_metafile};
pub use line::{convert_line, is_line_type};
pub use media::{convert_audio, convert_math, convert_video};
pub use shape::convert_shape;
pub use table::convert_table;
pub use text::convert_text;

use crate::options::ScaleRatio;
use crate::raw::{RawBorder, RawGradientFill, RawShadow};
use crate::types::{Gradient, GradientKind, GradientStop, Outline, Shadow};

/// Round to a fixed number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Stroke style name, `solid` when the source leaves it blank.
pub(crate) fn stroke_style(border_type: &str) -> String {
    if border_type.is_empty() {
        "solid".to_string()
    } else {
        border_type.to_string()
    }
}

/// Outline from flattened border fields, `None` when the element has no
/// visible border.
pub(crate) fn outline(border: &RawBorder, ratio: ScaleRatio) -> Option<Outline> {
    if border.border_width <= 0.0 && border.border_color.is_empty() {
        return None;
    }
    Some(Outline {
        color: border.border_color.clone(),
        width: round_to(ratio.scale(border.border_width), 2),
        style: stroke_style(&border.border_type),
    })
}

pub(crate) fn shadow(raw: &RawShadow, ratio: ScaleRatio) -> Shadow {
    Shadow {
        h: ratio.scale(raw.h),
        v: ratio.scale(raw.v),
        blur: ratio.scale(raw.blur),
        color: raw.color.clone(),
    }
}

/// Gradient with its rotation shifted by `rotate_offset` degrees.
///
/// `line` paths are linear, every other path is radial.
pub(crate) fn gradient(raw: &RawGradientFill, rotate_offset: f64) -> Gradient {
    Gradient {
        kind: if raw.path == "line" {
            GradientKind::Linear
        } else {
            GradientKind::Radial
        },
        colors: raw
            .colors
            .iter()
            .map(|stop| GradientStop {
                pos: stop.pos.percent(),
                color: stop.color.clone(),
            })
            .collect(),
        rotate: raw.rot + rotate_offset,
    }
}
