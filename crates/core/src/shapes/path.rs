//! SVG path data helpers: coordinate extent and invalid-token repair.

use crate::error::ShapeError;
use regex::Regex;
use std::sync::LazyLock;
use svgtypes::{PathParser, PathSegment};

/// Numeric tokens the upstream parser emits when it fails to compute a value.
static INVALID_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"NaN|Infinity|undefined").unwrap());

/// Extent of the points a path visits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PathBounds {
    fn at(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Whether the path contains tokens that are not numbers.
pub fn has_invalid_tokens(path: &str) -> bool {
    INVALID_TOKEN_REGEX.is_match(path)
}

/// Replace every invalid numeric token with `0`.
pub fn repair_invalid_tokens(path: &str) -> String {
    INVALID_TOKEN_REGEX.replace_all(path, "0").into_owned()
}

/// Compute the extent of a path's segment end points, resolving relative
/// commands against the current point.
pub fn path_bounds(path: &str) -> Result<PathBounds, ShapeError> {
    let mut bounds: Option<PathBounds> = None;
    let mut current = (0.0, 0.0);
    let mut subpath_start = (0.0, 0.0);

    for segment in PathParser::from(path) {
        let segment = segment.map_err(|e| ShapeError::InvalidPath(e.to_string()))?;

        let resolve = |abs: bool, x: f64, y: f64| {
            if abs {
                (x, y)
            } else {
                (current.0 + x, current.1 + y)
            }
        };

        let point = match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let p = resolve(abs, x, y);
                subpath_start = p;
                p
            }
            PathSegment::LineTo { abs, x, y }
            | PathSegment::SmoothQuadratic { abs, x, y }
            | PathSegment::Quadratic { abs, x, y, .. }
            | PathSegment::SmoothCurveTo { abs, x, y, .. }
            | PathSegment::CurveTo { abs, x, y, .. }
            | PathSegment::EllipticalArc { abs, x, y, .. } => resolve(abs, x, y),
            PathSegment::HorizontalLineTo { abs, x } => {
                if abs {
                    (x, current.1)
                } else {
                    (current.0 + x, current.1)
                }
            }
            PathSegment::VerticalLineTo { abs, y } => {
                if abs {
                    (current.0, y)
                } else {
                    (current.0, current.1 + y)
                }
            }
            PathSegment::ClosePath { .. } => {
                current = subpath_start;
                continue;
            }
        };

        current = point;
        match bounds.as_mut() {
            Some(b) => b.include(point.0, point.1),
            None => bounds = Some(PathBounds::at(point.0, point.1)),
        }
    }

    bounds.ok_or_else(|| ShapeError::InvalidPath("path has no points".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_bounds() {
        let b = path_bounds("M 0 0 L 200 0 L 200 100 L 0 100 Z").unwrap();
        assert_eq!(b.max_x, 200.0);
        assert_eq!(b.max_y, 100.0);
        assert_eq!(b.min_x, 0.0);
    }

    #[test]
    fn test_relative_bounds() {
        let b = path_bounds("M10 10 l 20 0 v 30 h -25 z").unwrap();
        assert_eq!(b.min_x, 5.0);
        assert_eq!(b.max_x, 30.0);
        assert_eq!(b.max_y, 40.0);
    }

    #[test]
    fn test_curve_end_points() {
        let b = path_bounds("M 0 0 C 500 500 600 600 40 80").unwrap();
        assert_eq!(b.max_x, 40.0);
        assert_eq!(b.max_y, 80.0);
    }

    #[test]
    fn test_empty_path_is_error() {
        assert!(path_bounds("").is_err());
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(has_invalid_tokens("M NaN 0 L 10 10"));
        assert!(!has_invalid_tokens("M 0 0 L 10 10"));
        assert_eq!(repair_invalid_tokens("M NaN 0 L 10 NaN"), "M 0 0 L 10 0");
    }
}
