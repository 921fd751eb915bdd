//! Audio, video and rendered math expressions.

use crate::options::Context;
use crate::raw::{RawMath, RawMedia};
use crate::types::{new_id, AudioElement, ImageElement, VideoElement};

/// Audio takes the embedded blob and the first theme colour.
pub fn convert_audio(el: &RawMedia, ctx: &Context<'_>) -> AudioElement {
    let frame = ctx.ratio.frame(&el.frame);

    AudioElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        src: el.blob.clone().unwrap_or_default(),
        fixed_ratio: false,
        color: ctx
            .theme
            .theme_colors
            .first()
            .cloned()
            .unwrap_or_else(|| ctx.theme.font_color.clone()),
        looped: false,
        autoplay: false,
    }
}

/// Video source is the embedded blob, or the linked source when there is none.
pub fn convert_video(el: &RawMedia, ctx: &Context<'_>) -> VideoElement {
    let frame = ctx.ratio.frame(&el.frame);

    VideoElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        src: el
            .blob
            .clone()
            .filter(|b| !b.is_empty())
            .or_else(|| el.src.clone())
            .unwrap_or_default(),
        autoplay: false,
    }
}

/// A math expression is kept as its pre-rendered picture.
pub fn convert_math(el: &RawMath, ctx: &Context<'_>) -> ImageElement {
    let frame = ctx.ratio.frame(&el.frame);

    ImageElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        src: el.pic_base64.clone(),
        fixed_ratio: true,
        flip_h: false,
        flip_v: false,
        outline: None,
        clip: None,
    }
}
