//! Built-in shape table keyed by vendor preset name.

use super::{PathFormula, ShapeEntry};

const VIEW_BOX: [f64; 2] = [200.0, 200.0];

const RECT: &str = "M 0 0 L 200 0 L 200 200 L 0 200 Z";
const DIAMOND: &str = "M 100 0 L 0 100 L 100 200 L 200 100 Z";

/// Presets with a fixed path on a 200 × 200 viewBox.
const FIXED_SHAPES: &[(&str, &str)] = &[
    ("rect", RECT),
    ("ellipse", "M 100 0 A 50 50 0 1 1 100 200 A 50 50 0 1 1 100 0 Z"),
    ("rtTriangle", "M 0 0 L 0 200 L 200 200 Z"),
    ("diamond", DIAMOND),
    ("pentagon", "M 100 0 L 0 76 L 38 200 L 162 200 L 200 76 Z"),
    ("hexagon", "M 50 0 L 150 0 L 200 100 L 150 200 L 50 200 L 0 100 Z"),
    ("heptagon", "M 100 0 L 22 38 L 0 124 L 56 200 L 144 200 L 200 124 L 178 38 Z"),
    ("octagon", "M 58 0 L 142 0 L 200 58 L 200 142 L 142 200 L 58 200 L 0 142 L 0 58 Z"),
    ("homePlate", "M 0 0 L 150 0 L 200 100 L 150 200 L 0 200 Z"),
    ("rightArrow", "M 0 50 L 120 50 L 120 0 L 200 100 L 120 200 L 120 150 L 0 150 Z"),
    ("leftArrow", "M 200 50 L 80 50 L 80 0 L 0 100 L 80 200 L 80 150 L 200 150 Z"),
    ("upArrow", "M 50 200 L 50 80 L 0 80 L 100 0 L 200 80 L 150 80 L 150 200 Z"),
    ("downArrow", "M 50 0 L 50 120 L 0 120 L 100 200 L 200 120 L 150 120 L 150 0 Z"),
    (
        "leftRightArrow",
        "M 0 100 L 50 0 L 50 50 L 150 50 L 150 0 L 200 100 L 150 200 L 150 150 L 50 150 L 50 200 Z",
    ),
    ("star4", "M 100 0 L 125 75 L 200 100 L 125 125 L 100 200 L 75 125 L 0 100 L 75 75 Z"),
    (
        "star5",
        "M 100 0 L 124 76 L 200 76 L 138 122 L 162 200 L 100 152 L 38 200 L 62 122 L 0 76 L 76 76 Z",
    ),
    (
        "heart",
        "M 100 40 C 100 -10 0 -10 0 60 C 0 120 100 170 100 200 C 100 170 200 120 200 60 C 200 -10 100 -10 100 40 Z",
    ),
    ("flowChartProcess", RECT),
    ("flowChartDecision", DIAMOND),
    (
        "flowChartTerminator",
        "M 50 0 L 150 0 Q 200 0 200 100 Q 200 200 150 200 L 50 200 Q 0 200 0 100 Q 0 0 50 0 Z",
    ),
];

/// Presets whose path depends on the element size.
const FORMULA_SHAPES: &[(&str, PathFormula)] = &[
    ("roundRect", PathFormula::RoundRect),
    ("round2DiagRect", PathFormula::RoundRectDiagonal),
    ("round1Rect", PathFormula::RoundRectSingle),
    ("round2SameRect", PathFormula::RoundRectSameSide),
    ("snip2DiagRect", PathFormula::CutRectDiagonal),
    ("snip1Rect", PathFormula::CutRectSingle),
    ("snip2SameRect", PathFormula::CutRectSameSide),
    ("snipRoundRect", PathFormula::CutRoundRect),
    ("wedgeRectCallout", PathFormula::Message),
    ("wedgeRoundRectCallout", PathFormula::RoundMessage),
    ("corner", PathFormula::L),
    ("frame", PathFormula::RingRect),
    ("plus", PathFormula::Plus),
    ("triangle", PathFormula::Triangle),
    ("parallelogram", PathFormula::ParallelogramLeft),
    ("flowChartInputOutput", PathFormula::ParallelogramRight),
    ("trapezoid", PathFormula::Trapezoid),
    ("chevron", PathFormula::Indicator),
    ("flowChartOffpageConnector", PathFormula::Bullet),
];

pub(super) fn builtin_entries() -> Vec<ShapeEntry> {
    let fixed = FIXED_SHAPES.iter().map(|&(vendor_type, path)| ShapeEntry {
        vendor_type: vendor_type.to_string(),
        path: path.to_string(),
        view_box: VIEW_BOX,
        path_formula: None,
    });

    let formulas = FORMULA_SHAPES.iter().map(|&(vendor_type, formula)| ShapeEntry {
        vendor_type: vendor_type.to_string(),
        path: formula.path(VIEW_BOX[0], VIEW_BOX[1], None),
        view_box: VIEW_BOX,
        path_formula: Some(formula),
    });

    fixed.chain(formulas).collect()
}
