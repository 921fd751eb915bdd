//! Conversion configuration: viewport scaling, theme defaults, shape tables.

use crate::raw::RawFrame;
use crate::shapes::ShapeLibrary;

/// Viewport width used in fixed-viewport mode.
pub const VIEWPORT_SIZE: f64 = 1000.0;

/// Points to CSS pixels.
pub const DPI_RATIO: f64 = 96.0 / 72.0;

/// How the scale ratio is derived from the declared canvas width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
    /// Keep the source size, converting points to pixels (96/72).
    #[default]
    Dpi,
    /// Scale the canvas to [`VIEWPORT_SIZE`] pixels wide.
    Fixed,
}

/// Multiplicative factor from raw units to target units. One per import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRatio(f64);

impl ScaleRatio {
    pub fn new(ratio: f64) -> Self {
        Self(ratio)
    }

    /// Derive the ratio and the resulting viewport width from the canvas
    /// width declared by the source document.
    ///
    /// A missing or non-positive width in fixed mode falls back to a ratio of
    /// 1 so that an empty document still converts.
    pub fn for_canvas(canvas_width: f64, mode: ViewportMode) -> (Self, f64) {
        match mode {
            ViewportMode::Dpi => (Self(DPI_RATIO), canvas_width.max(0.0) * DPI_RATIO),
            ViewportMode::Fixed if canvas_width > 0.0 && canvas_width.is_finite() => {
                (Self(VIEWPORT_SIZE / canvas_width), VIEWPORT_SIZE)
            }
            ViewportMode::Fixed => {
                log::warn!(
                    "Document declares no usable canvas width ({}); using a ratio of 1",
                    canvas_width
                );
                (Self(1.0), VIEWPORT_SIZE)
            }
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn scale(self, v: f64) -> f64 {
        v * self.0
    }

    /// Scale a frame's position and size.
    pub fn frame(self, frame: &RawFrame) -> ScaledFrame {
        ScaledFrame {
            left: self.scale(frame.left),
            top: self.scale(frame.top),
            width: self.scale(frame.width),
            height: self.scale(frame.height),
        }
    }
}

/// Position and size in target units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Theme defaults consulted while converting.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub font_name: String,
    pub font_color: String,
    pub theme_colors: Vec<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_name: "Microsoft YaHei".to_string(),
            font_color: "#333".to_string(),
            theme_colors: ["#5b9bd5", "#ed7d31", "#a5a5a5", "#ffc000", "#4472c4", "#70ad47"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Theme {
    /// Copy of this theme with the palette replaced, unless `colors` is empty.
    pub fn with_palette(&self, colors: &[String]) -> Self {
        let mut theme = self.clone();
        if !colors.is_empty() {
            theme.theme_colors = colors.to_vec();
        }
        theme
    }
}

/// Options for converting a raw document.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    viewport_mode: ViewportMode,
    theme: Theme,
    shapes: ShapeLibrary,
}

impl ConvertOptions {
    /// Create options with the DPI ratio, default theme and built-in shapes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport_mode(mut self, mode: ViewportMode) -> Self {
        self.viewport_mode = mode;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_shapes(mut self, shapes: ShapeLibrary) -> Self {
        self.shapes = shapes;
        self
    }

    pub fn viewport_mode(&self) -> ViewportMode {
        self.viewport_mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn shapes(&self) -> &ShapeLibrary {
        &self.shapes
    }
}

/// Read-only state threaded through every converter during one import.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub ratio: ScaleRatio,
    pub theme: &'a Theme,
    pub shapes: &'a ShapeLibrary,
}

impl<'a> Context<'a> {
    pub fn new(ratio: ScaleRatio, theme: &'a Theme, shapes: &'a ShapeLibrary) -> Self {
        Self {
            ratio,
            theme,
            shapes,
        }
    }
}
