//! Slide model, geometry, shape resolution and element conversion for
//! normalizing raw presentation trees into editor slides.

pub mod assemble;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod geometry;
pub mod html;
pub mod options;
pub mod raw;
pub mod shapes;
pub mod types;

pub use assemble::{Conversion, DeckConverter, Diagnostic};
pub use error::{ElementError, Error, Result, ShapeError};
pub use options::{ConvertOptions, ScaleRatio, Theme, ViewportMode};
pub use raw::RawDocument;
pub use shapes::{PathFormula, ShapeLibrary};
pub use types::{Element, Slide, SlideBackground};
