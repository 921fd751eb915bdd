use super::{outline, shadow};
use crate::html::convert_font_sizes;
use crate::options::Context;
use crate::raw::{RawFill, RawText};
use crate::types::{new_id, TextElement};

/// Convert a text box. Font sizes inside the HTML body are rewritten to
/// pixels.
pub fn convert_text(el: &RawText, ctx: &Context<'_>) -> TextElement {
    let frame = ctx.ratio.frame(&el.frame);

    TextElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        content: convert_font_sizes(&el.content, ctx.ratio.value()),
        default_font_name: ctx.theme.font_name.clone(),
        default_color: ctx.theme.font_color.clone(),
        line_height: 1.0,
        outline: outline(&el.border, ctx.ratio),
        fill: match &el.fill {
            RawFill::Color(color) => Some(color.clone()),
            _ => None,
        },
        vertical: el.is_vertical,
        shadow: el.shadow.as_ref().map(|s| shadow(s, ctx.ratio)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ScaleRatio, Theme};
    use crate::raw::RawFrame;
    use crate::shapes::ShapeLibrary;

    #[test]
    fn test_convert_text_scales_frame_and_fonts() {
        let theme = Theme::default();
        let shapes = ShapeLibrary::builtin();
        let ctx = Context::new(ScaleRatio::new(2.0), &theme, &shapes);

        let raw = RawText {
            frame: RawFrame {
                left: 10.0,
                top: 20.0,
                width: 100.0,
                height: 50.0,
                rotate: 15.0,
                ..Default::default()
            },
            content: r#"<p><span style="font-size: 12pt">Hi</span></p>"#.to_string(),
            fill: RawFill::Color("#abcdef".to_string()),
            ..Default::default()
        };

        let text = convert_text(&raw, &ctx);
        assert_eq!([text.left, text.top, text.width, text.height], [20.0, 40.0, 200.0, 100.0]);
        assert_eq!(text.rotate, 15.0);
        assert!(text.content.contains("font-size: 24.0px"));
        assert_eq!(text.default_font_name, theme.font_name);
        assert_eq!(text.fill.as_deref(), Some("#abcdef"));
        assert!(text.outline.is_none());
        assert!(text.shadow.is_none());
    }
}
