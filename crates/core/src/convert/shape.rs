use super::{gradient, line, outline, shadow};
use crate::error::ShapeError;
use crate::html::convert_font_sizes;
use crate::options::Context;
use crate::raw::{RawFill, RawShape};
use crate::shapes::ShapeRequest;
use crate::types::{new_id, Element, ShapeElement, ShapeText, VerticalAlign};

/// Convert a shape, or a line when the vendor type names a connector.
///
/// Fails when no geometry can be resolved for the shape type.
pub fn convert_shape(el: &RawShape, ctx: &Context<'_>) -> Result<Element, ShapeError> {
    if line::is_line_type(&el.shap_type) {
        return Ok(Element::Line(line::convert_line(el, ctx)));
    }

    let frame = ctx.ratio.frame(&el.frame);
    let resolved = ctx.shapes.resolve(&ShapeRequest {
        shape_type: &el.shap_type,
        path: el.path.as_deref(),
        width: frame.width,
        height: frame.height,
        original_width: el.frame.width,
        original_height: el.frame.height,
    })?;

    let (fill, gradient, pattern) = match &el.fill {
        RawFill::Color(color) => (color.clone(), None, None),
        RawFill::Gradient(g) => (String::new(), Some(gradient(g, 0.0)), None),
        RawFill::Image(img) => (String::new(), None, Some(img.pic_base64.clone())),
        RawFill::None => (String::new(), None, None),
    };

    let text = (!el.content.trim().is_empty()).then(|| ShapeText {
        content: convert_font_sizes(&el.content, ctx.ratio.value()),
        default_font_name: ctx.theme.font_name.clone(),
        default_color: ctx.theme.font_color.clone(),
        align: vertical_align(&el.v_align),
    });

    Ok(Element::Shape(ShapeElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: resolved.width,
        height: resolved.height,
        rotate: el.frame.rotate,
        view_box: resolved.view_box,
        path: resolved.path,
        path_formula: resolved.path_formula.map(|f| f.name().to_string()),
        keypoints: resolved.keypoints,
        fill,
        gradient,
        pattern,
        fixed_ratio: false,
        outline: outline(&el.border, ctx.ratio),
        shadow: el.shadow.as_ref().map(|s| shadow(s, ctx.ratio)),
        text,
        flip_h: el.frame.is_flip_h,
        flip_v: el.frame.is_flip_v,
        special: resolved.special,
    }))
}

fn vertical_align(v_align: &str) -> VerticalAlign {
    match v_align {
        "up" => VerticalAlign::Top,
        "down" => VerticalAlign::Bottom,
        _ => VerticalAlign::Middle,
    }
}
