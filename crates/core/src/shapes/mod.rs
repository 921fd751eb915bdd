//! Shape geometry resolution.
//!
//! Maps a vendor shape type to an editor path and viewBox, either through
//! the shape table (optionally backed by a [`PathFormula`]) or from the raw
//! path data carried by the element.

mod catalog;
pub mod formulas;
pub mod path;

pub use formulas::PathFormula;
pub use path::{has_invalid_tokens, path_bounds, repair_invalid_tokens, PathBounds};

use crate::error::ShapeError;

/// Vendor type of freeform shapes.
pub const CUSTOM_SHAPE_TYPE: &str = "custom";

/// Smallest size a repaired freeform shape is allowed to have.
pub const MIN_EXTENT: f64 = 0.1;

/// One row of the shape table.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    pub vendor_type: String,
    pub path: String,
    pub view_box: [f64; 2],
    pub path_formula: Option<PathFormula>,
}

/// Ordered shape table, consulted by exact vendor-type match.
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    entries: Vec<ShapeEntry>,
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Input of [`ShapeLibrary::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct ShapeRequest<'a> {
    pub shape_type: &'a str,
    pub path: Option<&'a str>,
    /// Scaled size.
    pub width: f64,
    pub height: f64,
    /// Size before scaling; the raw path is authored against it.
    pub original_width: f64,
    pub original_height: f64,
}

/// Resolved geometry for a shape element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShape {
    pub path: String,
    pub view_box: [f64; 2],
    pub path_formula: Option<PathFormula>,
    pub keypoints: Option<Vec<f64>>,
    pub special: bool,
    /// Element size, floored to [`MIN_EXTENT`] for repaired freeform paths.
    pub width: f64,
    pub height: f64,
}

impl ShapeLibrary {
    /// The built-in table of preset shapes.
    pub fn builtin() -> Self {
        Self::new(catalog::builtin_entries())
    }

    pub fn new(entries: Vec<ShapeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ShapeEntry] {
        &self.entries
    }

    /// First entry whose vendor type matches exactly.
    pub fn lookup(&self, vendor_type: &str) -> Option<&ShapeEntry> {
        self.entries.iter().find(|e| e.vendor_type == vendor_type)
    }

    /// Resolve the geometry of a shape.
    ///
    /// Order: freeform (`custom`) handling, table entry, raw path. The
    /// result is rejected when its viewBox is not strictly positive.
    pub fn resolve(&self, req: &ShapeRequest<'_>) -> Result<ResolvedShape, ShapeError> {
        let resolved = if req.shape_type == CUSTOM_SHAPE_TYPE {
            resolve_custom(req)?
        } else if let Some(entry) = self.lookup(req.shape_type) {
            resolve_entry(entry, req)
        } else {
            match req.path {
                Some(path) if !path.trim().is_empty() && !has_invalid_tokens(path) => {
                    let bounds = path_bounds(path)?;
                    ResolvedShape {
                        path: path.to_string(),
                        view_box: view_box_for(&bounds, req.original_width, req.original_height),
                        path_formula: None,
                        keypoints: None,
                        special: false,
                        width: req.width,
                        height: req.height,
                    }
                }
                _ => return Err(ShapeError::NoGeometry(req.shape_type.to_string())),
            }
        };

        let [vw, vh] = resolved.view_box;
        if !(vw.is_finite() && vh.is_finite() && vw > 0.0 && vh > 0.0) {
            return Err(ShapeError::DegenerateViewBox(vw, vh));
        }
        Ok(resolved)
    }
}

fn resolve_entry(entry: &ShapeEntry, req: &ShapeRequest<'_>) -> ResolvedShape {
    let mut resolved = ResolvedShape {
        path: entry.path.clone(),
        view_box: entry.view_box,
        path_formula: entry.path_formula,
        keypoints: None,
        special: false,
        width: req.width,
        height: req.height,
    };

    if let Some(formula) = entry.path_formula {
        resolved.view_box = [req.width, req.height];
        match formula.default_value() {
            Some(defaults) => {
                resolved.path = formula.path(req.width, req.height, Some(defaults));
                resolved.keypoints = Some(defaults.to_vec());
            }
            None => resolved.path = formula.path(req.width, req.height, None),
        }
    }

    resolved
}

fn resolve_custom(req: &ShapeRequest<'_>) -> Result<ResolvedShape, ShapeError> {
    let raw_path = req
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ShapeError::NoGeometry(CUSTOM_SHAPE_TYPE.to_string()))?;

    let floor = |v: f64| if v == 0.0 { MIN_EXTENT } else { v };

    let (path, special, width, height, original_width, original_height) =
        if has_invalid_tokens(raw_path) {
            (
                repair_invalid_tokens(raw_path),
                false,
                floor(req.width),
                floor(req.height),
                floor(req.original_width),
                floor(req.original_height),
            )
        } else {
            (
                raw_path.to_string(),
                true,
                req.width,
                req.height,
                req.original_width,
                req.original_height,
            )
        };

    let bounds = path_bounds(&path)?;
    Ok(ResolvedShape {
        view_box: view_box_for(&bounds, original_width, original_height),
        path,
        path_formula: None,
        keypoints: None,
        special,
        width,
        height,
    })
}

/// ViewBox keeping the path's extent while matching the element's aspect.
fn view_box_for(bounds: &PathBounds, original_width: f64, original_height: f64) -> [f64; 2] {
    let (max_x, max_y) = (bounds.max_x, bounds.max_y);
    if max_x / max_y > original_width / original_height {
        [max_x, max_x * original_height / original_width]
    } else {
        [max_y * original_width / original_height, max_y]
    }
}
