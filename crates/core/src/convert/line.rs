use super::{round_to, stroke_style};
use crate::geometry::rotate_segment;
use crate::options::Context;
use crate::raw::RawShape;
use crate::types::{new_id, LineElement, Point};

/// Whether a vendor shape type is drawn as a line rather than a shape.
pub fn is_line_type(shape_type: &str) -> bool {
    shape_type == "line" || shape_type.contains("Connector")
}

/// Convert a straight line or connector.
///
/// The flip flags select which diagonal of the bounding box the line runs
/// along. A rotation is applied to the end points and the element position
/// is shifted by the resulting change of bounding-box origin.
pub fn convert_line(el: &RawShape, ctx: &Context<'_>) -> LineElement {
    let frame = ctx.ratio.frame(&el.frame);
    let (w, h) = (frame.width, frame.height);

    let (mut start, mut end): (Point, Point) = match (el.frame.is_flip_v, el.frame.is_flip_h) {
        (false, false) => ([0.0, 0.0], [w, h]),
        (true, true) => ([w, h], [0.0, 0.0]),
        (true, false) => ([0.0, h], [w, 0.0]),
        (false, true) => ([w, 0.0], [0.0, h]),
    };

    let mut left = frame.left;
    let mut top = frame.top;
    if el.frame.rotate != 0.0 {
        let rotated = rotate_segment(start, end, el.frame.rotate);
        start = rotated.start;
        end = rotated.end;
        left += rotated.offset[0];
        top += rotated.offset[1];
    }

    let stroke = if el.border.border_width > 0.0 {
        el.border.border_width
    } else {
        1.0
    };

    let dx = (start[0] - end[0]).abs();
    let dy = (start[1] - end[1]).abs();

    LineElement {
        id: new_id(),
        left,
        top,
        width: round_to(ctx.ratio.scale(stroke), 2),
        start,
        end,
        style: stroke_style(&el.border.border_type),
        color: if el.border.border_color.is_empty() {
            ctx.theme.font_color.clone()
        } else {
            el.border.border_color.clone()
        },
        points: [
            String::new(),
            if el.shap_type.contains("straightConnector") {
                "arrow".to_string()
            } else {
                String::new()
            },
        ],
        broken2: el.shap_type.contains("bentConnector").then_some(dx / 2.0),
        cubic: el
            .shap_type
            .contains("curvedConnector")
            .then_some([[dx / 2.0, dy / 2.0], [dx / 2.0, dy / 2.0]]),
    }
}
