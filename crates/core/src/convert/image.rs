use super::outline;
use crate::options::Context;
use crate::raw::RawImage;
use crate::types::{new_id, ImageClip, ImageElement};

/// Wrapping geometries the editor can clip a picture to.
const CLIP_SHAPES: &[&str] = &[
    "roundRect",
    "ellipse",
    "triangle",
    "rhombus",
    "pentagon",
    "hexagon",
    "heptagon",
    "octagon",
    "parallelogram",
    "trapezoid",
];

const LEGACY_MIME_TYPES: &[&str] = &["image/x-wmf", "image/x-emf", "image/wmf", "image/emf"];

/// Whether an image source is a Windows metafile the editor cannot display.
///
/// Data URLs are detected by MIME type, other sources by extension.
pub fn is_legacy_metafile(src: &str) -> bool {
    if let Some(rest) = src.strip_prefix("data:") {
        let mime = rest.split([';', ',']).next().unwrap_or_default();
        return LEGACY_MIME_TYPES
            .iter()
            .any(|legacy| mime.eq_ignore_ascii_case(legacy));
    }

    let path = src.split(['?', '#']).next().unwrap_or_default();
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".wmf") || lower.ends_with(".emf")
}

/// Convert a picture, deriving its clip from the crop rect or geometry.
pub fn convert_image(el: &RawImage, ctx: &Context<'_>) -> ImageElement {
    let frame = ctx.ratio.frame(&el.frame);

    ImageElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        src: el.src.clone(),
        fixed_ratio: true,
        flip_h: el.frame.is_flip_h,
        flip_v: el.frame.is_flip_v,
        outline: outline(&el.border, ctx.ratio),
        clip: clip_for(el),
    }
}

fn clip_for(el: &RawImage) -> Option<ImageClip> {
    let geom = el
        .geom
        .as_deref()
        .filter(|geom| CLIP_SHAPES.contains(geom));

    match (el.rect, geom) {
        (Some(rect), geom) => Some(ImageClip {
            shape: geom.unwrap_or("rect").to_string(),
            range: [[rect.l, rect.t], [100.0 - rect.r, 100.0 - rect.b]],
        }),
        (None, Some(geom)) => Some(ImageClip {
            shape: geom.to_string(),
            range: [[0.0, 0.0], [100.0, 100.0]],
        }),
        (None, None) => None,
    }
}
