//! Parametric path formulas.
//!
//! A formula produces a path in element space (viewBox `[width, height]`)
//! from the element's current size. Editable formulas also take control
//! values ("keypoints") that the editor lets the user drag.

use std::fmt::Write;

/// Named path formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathFormula {
    RoundRect,
    RoundRectDiagonal,
    RoundRectSingle,
    RoundRectSameSide,
    CutRectDiagonal,
    CutRectSingle,
    CutRectSameSide,
    CutRoundRect,
    Message,
    RoundMessage,
    L,
    RingRect,
    Plus,
    Triangle,
    ParallelogramLeft,
    ParallelogramRight,
    Trapezoid,
    Bullet,
    Indicator,
}

impl PathFormula {
    pub const ALL: [PathFormula; 19] = [
        PathFormula::RoundRect,
        PathFormula::RoundRectDiagonal,
        PathFormula::RoundRectSingle,
        PathFormula::RoundRectSameSide,
        PathFormula::CutRectDiagonal,
        PathFormula::CutRectSingle,
        PathFormula::CutRectSameSide,
        PathFormula::CutRoundRect,
        PathFormula::Message,
        PathFormula::RoundMessage,
        PathFormula::L,
        PathFormula::RingRect,
        PathFormula::Plus,
        PathFormula::Triangle,
        PathFormula::ParallelogramLeft,
        PathFormula::ParallelogramRight,
        PathFormula::Trapezoid,
        PathFormula::Bullet,
        PathFormula::Indicator,
    ];

    /// Name stored on the produced element.
    pub fn name(self) -> &'static str {
        match self {
            PathFormula::RoundRect => "roundRect",
            PathFormula::RoundRectDiagonal => "roundRectDiagonal",
            PathFormula::RoundRectSingle => "roundRectSingle",
            PathFormula::RoundRectSameSide => "roundRectSameSide",
            PathFormula::CutRectDiagonal => "cutRectDiagonal",
            PathFormula::CutRectSingle => "cutRectSingle",
            PathFormula::CutRectSameSide => "cutRectSameSide",
            PathFormula::CutRoundRect => "cutRoundRect",
            PathFormula::Message => "message",
            PathFormula::RoundMessage => "roundMessage",
            PathFormula::L => "L",
            PathFormula::RingRect => "ringRect",
            PathFormula::Plus => "plus",
            PathFormula::Triangle => "triangle",
            PathFormula::ParallelogramLeft => "parallelogramLeft",
            PathFormula::ParallelogramRight => "parallelogramRight",
            PathFormula::Trapezoid => "trapezoid",
            PathFormula::Bullet => "bullet",
            PathFormula::Indicator => "indicator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Default control values, `None` for fixed formulas.
    pub fn default_value(self) -> Option<&'static [f64]> {
        match self {
            PathFormula::RoundRect
            | PathFormula::RoundRectDiagonal
            | PathFormula::RoundRectSingle
            | PathFormula::RoundRectSameSide
            | PathFormula::CutRoundRect => Some(&[0.125]),
            PathFormula::CutRectDiagonal
            | PathFormula::CutRectSingle
            | PathFormula::CutRectSameSide
            | PathFormula::Bullet
            | PathFormula::Indicator => Some(&[0.2]),
            PathFormula::L
            | PathFormula::RingRect
            | PathFormula::Plus
            | PathFormula::ParallelogramLeft
            | PathFormula::ParallelogramRight
            | PathFormula::Trapezoid => Some(&[0.25]),
            PathFormula::Triangle => Some(&[0.5]),
            PathFormula::Message | PathFormula::RoundMessage => None,
        }
    }

    pub fn is_editable(self) -> bool {
        self.default_value().is_some()
    }

    /// Build the path for a `width` × `height` element.
    ///
    /// Editable formulas read their first control value from `values`,
    /// falling back to the default when none is given.
    pub fn path(self, width: f64, height: f64, values: Option<&[f64]>) -> String {
        let (w, h) = (width, height);
        let value = values
            .and_then(|v| v.first().copied())
            .or_else(|| self.default_value().and_then(|d| d.first().copied()))
            .unwrap_or(0.0);
        let short = w.min(h);

        let mut p = PathBuilder::default();
        match self {
            PathFormula::RoundRect => {
                let r = short * value;
                p.m(r, 0.0).l(w - r, 0.0).q(w, 0.0, w, r).l(w, h - r);
                p.q(w, h, w - r, h).l(r, h).q(0.0, h, 0.0, h - r).l(0.0, r);
                p.q(0.0, 0.0, r, 0.0).z();
            }
            PathFormula::RoundRectDiagonal => {
                let r = short * value;
                p.m(r, 0.0).l(w, 0.0).l(w, h - r).q(w, h, w - r, h);
                p.l(0.0, h).l(0.0, r).q(0.0, 0.0, r, 0.0).z();
            }
            PathFormula::RoundRectSingle => {
                let r = short * value;
                p.m(0.0, 0.0).l(w - r, 0.0).q(w, 0.0, w, r);
                p.l(w, h).l(0.0, h).l(0.0, 0.0).z();
            }
            PathFormula::RoundRectSameSide => {
                let r = short * value;
                p.m(0.0, r).q(0.0, 0.0, r, 0.0).l(w - r, 0.0).q(w, 0.0, w, r);
                p.l(w, h).l(0.0, h).z();
            }
            PathFormula::CutRectDiagonal => {
                let r = short * value;
                p.m(0.0, h - r).l(0.0, 0.0).l(w - r, 0.0).l(w, r);
                p.l(w, h).l(r, h).z();
            }
            PathFormula::CutRectSingle => {
                let r = short * value;
                p.m(0.0, h).l(0.0, 0.0).l(w - r, 0.0).l(w, r).l(w, h).z();
            }
            PathFormula::CutRectSameSide => {
                let r = short * value;
                p.m(0.0, r).l(r, 0.0).l(w - r, 0.0).l(w, r).l(w, h).l(0.0, h).z();
            }
            PathFormula::CutRoundRect => {
                let r = short * value;
                p.m(r, 0.0).l(w - r, 0.0).l(w, r).l(w, h).l(0.0, h);
                p.l(0.0, r).q(0.0, 0.0, r, 0.0).z();
            }
            PathFormula::Message => {
                let aw = w * 0.2;
                let ah = h * 0.2;
                p.m(0.0, 0.0).l(w, 0.0).l(w, h - ah).l(w / 2.0, h - ah);
                p.l(w / 2.0 - aw, h).l(w / 2.0 - aw, h - ah).l(0.0, h - ah).z();
            }
            PathFormula::RoundMessage => {
                let r = short * 0.125;
                let aw = w * 0.2;
                let ah = h * 0.2;
                p.m(r, 0.0).l(w - r, 0.0).q(w, 0.0, w, r).l(w, h - ah - r);
                p.q(w, h - ah, w - r, h - ah).l(w / 2.0, h - ah);
                p.l(w / 2.0 - aw, h).l(w / 2.0 - aw, h - ah).l(r, h - ah);
                p.q(0.0, h - ah, 0.0, h - ah - r).l(0.0, r).q(0.0, 0.0, r, 0.0).z();
            }
            PathFormula::L => {
                let t = short * value;
                p.m(0.0, 0.0).l(0.0, h).l(w, h).l(w, h - t).l(t, h - t).l(t, 0.0).z();
            }
            PathFormula::RingRect => {
                let t = short * value;
                p.m(0.0, 0.0).l(w, 0.0).l(w, h).l(0.0, h).z();
                p.m(t, t).l(t, h - t).l(w - t, h - t).l(w - t, t).z();
            }
            PathFormula::Plus => {
                let tw = w * value;
                let th = h * value;
                p.m(tw, 0.0).l(w - tw, 0.0).l(w - tw, th).l(w, th).l(w, h - th);
                p.l(w - tw, h - th).l(w - tw, h).l(tw, h).l(tw, h - th);
                p.l(0.0, h - th).l(0.0, th).l(tw, th).z();
            }
            PathFormula::Triangle => {
                p.m(w * value, 0.0).l(0.0, h).l(w, h).z();
            }
            PathFormula::ParallelogramLeft => {
                let x = w * value;
                p.m(x, 0.0).l(w, 0.0).l(w - x, h).l(0.0, h).z();
            }
            PathFormula::ParallelogramRight => {
                let x = w * value;
                p.m(0.0, 0.0).l(w - x, 0.0).l(w, h).l(x, h).z();
            }
            PathFormula::Trapezoid => {
                let x = w * value;
                p.m(x, 0.0).l(w - x, 0.0).l(w, h).l(0.0, h).z();
            }
            PathFormula::Bullet => {
                let y = h * value;
                p.m(w / 2.0, 0.0).l(0.0, y).l(0.0, h).l(w, h).l(w, y).z();
            }
            PathFormula::Indicator => {
                let x = w * value;
                p.m(w, h / 2.0).l(w - x, 0.0).l(0.0, 0.0).l(x, h / 2.0);
                p.l(0.0, h).l(w - x, h).z();
            }
        }
        p.finish()
    }
}

/// Accumulates `M/L/Q/Z` commands separated by spaces.
#[derive(Default)]
struct PathBuilder {
    buf: String,
}

impl PathBuilder {
    fn cmd(&mut self, c: char, coords: &[f64]) -> &mut Self {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push(c);
        for v in coords {
            // Writing to a String cannot fail.
            let _ = write!(self.buf, " {}", v);
        }
        self
    }

    fn m(&mut self, x: f64, y: f64) -> &mut Self {
        self.cmd('M', &[x, y])
    }

    fn l(&mut self, x: f64, y: f64) -> &mut Self {
        self.cmd('L', &[x, y])
    }

    fn q(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.cmd('Q', &[cx, cy, x, y])
    }

    fn z(&mut self) -> &mut Self {
        self.cmd('Z', &[])
    }

    fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::path::path_bounds;

    #[test]
    fn test_names_round_trip() {
        for formula in PathFormula::ALL {
            assert_eq!(PathFormula::from_name(formula.name()), Some(formula));
        }
        assert_eq!(PathFormula::from_name("nope"), None);
    }

    #[test]
    fn test_round_rect_default() {
        let path = PathFormula::RoundRect.path(200.0, 100.0, None);
        assert!(path.starts_with("M 12.5 0 L 187.5 0 Q 200 0 200 12.5"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn test_triangle_uses_given_value() {
        assert_eq!(
            PathFormula::Triangle.path(100.0, 80.0, Some(&[0.25])),
            "M 25 0 L 0 80 L 100 80 Z"
        );
    }

    #[test]
    fn test_editable_flags() {
        assert!(PathFormula::RoundRect.is_editable());
        assert!(!PathFormula::Message.is_editable());
    }

    #[test]
    fn test_every_formula_fits_its_box() {
        for formula in PathFormula::ALL {
            let path = formula.path(300.0, 120.0, None);
            let b = path_bounds(&path).unwrap();
            assert!(b.min_x >= 0.0 && b.min_y >= 0.0, "{}", formula.name());
            assert!(b.max_x <= 300.0 && b.max_y <= 120.0, "{}", formula.name());
        }
    }
}
