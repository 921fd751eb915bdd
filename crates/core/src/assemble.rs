//! Document-level conversion: one editor slide per raw slide.

use crate::convert::gradient;
use crate::error::ElementError;
use crate::flatten::{flatten, DroppedElement};
use crate::options::{ConvertOptions, Context, ScaleRatio};
use crate::raw::{RawDocument, RawFill, RawSlide};
use crate::types::{BackgroundImage, BackgroundSize, Slide, SlideBackground};

/// Gradient rotations in backgrounds are measured from a different origin.
const BACKGROUND_GRADIENT_OFFSET: f64 = 90.0;

/// An element left out of a converted slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Zero-based index of the slide the element was on.
    pub slide: usize,
    /// Vendor shape type for shapes, element kind otherwise.
    pub kind: String,
    pub reason: ElementError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "slide {}: dropped '{}' ({})",
            self.slide + 1,
            self.kind,
            self.reason
        )
    }
}

/// Output of [`DeckConverter::convert`].
#[derive(Debug, Clone)]
pub struct Conversion {
    pub slides: Vec<Slide>,
    /// Viewport width the slides are laid out for.
    pub viewport_size: f64,
    /// Palette in effect for the converted document.
    pub theme_colors: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts raw documents into editor slides.
#[derive(Debug, Clone, Default)]
pub struct DeckConverter {
    options: ConvertOptions,
}

impl DeckConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a whole document.
    ///
    /// The scale ratio and viewport are derived once from the declared
    /// canvas width. Element-level failures are reported as diagnostics.
    pub fn convert(&self, document: RawDocument) -> Conversion {
        let (ratio, viewport_size) =
            ScaleRatio::for_canvas(document.size.width, self.options.viewport_mode());
        let theme = self.options.theme().with_palette(&document.theme_colors);
        let ctx = Context::new(ratio, &theme, self.options.shapes());

        log::debug!(
            "Converting {} slides at ratio {} (viewport {})",
            document.slides.len(),
            ratio.value(),
            viewport_size
        );

        let mut slides = Vec::with_capacity(document.slides.len());
        let mut diagnostics = Vec::new();

        for (index, raw) in document.slides.into_iter().enumerate() {
            let (slide, dropped) = convert_slide(raw, &ctx);
            log::debug!(
                "Slide {}: {} elements, {} dropped",
                index + 1,
                slide.elements.len(),
                dropped.len()
            );
            diagnostics.extend(dropped.into_iter().map(|d| Diagnostic {
                slide: index,
                kind: d.kind,
                reason: d.reason,
            }));
            slides.push(slide);
        }

        Conversion {
            slides,
            viewport_size,
            theme_colors: theme.theme_colors.clone(),
            diagnostics,
        }
    }
}

fn convert_slide(raw: RawSlide, ctx: &Context<'_>) -> (Slide, Vec<DroppedElement>) {
    let mut slide = Slide::new(resolve_background(&raw.fill));
    slide.remark = raw.note;

    let mut elements = raw.elements;
    elements.extend(raw.layout_elements);

    let flattened = flatten(elements, ctx);
    slide.elements = flattened.elements;
    (slide, flattened.dropped)
}

/// Background for a slide fill. Anything but an image or gradient is solid.
pub fn resolve_background(fill: &RawFill) -> SlideBackground {
    match fill {
        RawFill::Image(image) => SlideBackground::Image {
            image: BackgroundImage {
                src: image.pic_base64.clone(),
                size: BackgroundSize::Cover,
            },
        },
        RawFill::Gradient(g) => SlideBackground::Gradient {
            gradient: gradient(g, BACKGROUND_GRADIENT_OFFSET),
        },
        RawFill::Color(color) => SlideBackground::Solid {
            color: color.clone(),
        },
        RawFill::None => SlideBackground::default(),
    }
}
