//! Geometry helpers for connector rotation and container flattening.
//!
//! Screen coordinates: x grows to the right, y grows downwards, positive
//! angles rotate clockwise.

use crate::types::Point;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Anything that occupies a rectangle and can be moved.
pub trait Placement: Sized {
    fn bounds(&self) -> Rect;

    /// A copy of `self` with its top-left corner at `(left, top)`.
    fn moved_to(&self, left: f64, top: f64) -> Self;
}

impl Placement for Rect {
    fn bounds(&self) -> Rect {
        *self
    }

    fn moved_to(&self, left: f64, top: f64) -> Self {
        Rect { left, top, ..*self }
    }
}

/// A segment after [`rotate_segment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedSegment {
    pub start: Point,
    pub end: Point,
    /// Shift of the bounding-box origin caused by the rotation. Add it to
    /// the owning element's position.
    pub offset: Point,
}

/// Rotate a segment about its midpoint, then renormalize it so that its
/// bounding box starts at the origin.
pub fn rotate_segment(start: Point, end: Point, angle_deg: f64) -> RotatedSegment {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let mid = [(start[0] + end[0]) / 2.0, (start[1] + end[1]) / 2.0];

    let rotate = |p: Point| -> Point {
        let dx = p[0] - mid[0];
        let dy = p[1] - mid[1];
        [dx * cos - dy * sin + mid[0], dx * sin + dy * cos + mid[1]]
    };

    let new_start = rotate(start);
    let new_end = rotate(end);

    let before = [start[0].min(end[0]), start[1].min(end[1])];
    let after = [new_start[0].min(new_end[0]), new_start[1].min(new_end[1])];

    RotatedSegment {
        start: [new_start[0] - after[0], new_start[1] - after[1]],
        end: [new_end[0] - after[0], new_end[1] - after[1]],
        offset: [after[0] - before[0], after[1] - before[1]],
    }
}

/// Mirror axis for [`flip_siblings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror across the vertical centre line (`left` changes). Applied for
    /// horizontal flips.
    Y,
    /// Mirror across the horizontal centre line (`top` changes). Applied for
    /// vertical flips.
    X,
}

/// Mirror a set of siblings inside their joint bounding box.
///
/// Each element's box is mapped onto its reflection, so the joint box is
/// unchanged and applying the same flip twice restores the input.
pub fn flip_siblings<T: Placement>(elements: &[T], axis: FlipAxis) -> Vec<T> {
    let Some(joint) = joint_bounds(elements.iter().map(Placement::bounds)) else {
        return Vec::new();
    };

    let center_x = joint.left + joint.width / 2.0;
    let center_y = joint.top + joint.height / 2.0;

    elements
        .iter()
        .map(|element| {
            let b = element.bounds();
            match axis {
                FlipAxis::Y => element.moved_to(2.0 * center_x - b.left - b.width, b.top),
                FlipAxis::X => element.moved_to(b.left, 2.0 * center_y - b.top - b.height),
            }
        })
        .collect()
}

/// Bounding box of a set of rectangles, `None` when empty.
pub fn joint_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    let mut iter = rects.into_iter();
    let first = iter.next()?;
    let (mut min_x, mut min_y) = (first.left, first.top);
    let (mut max_x, mut max_y) = (first.left + first.width, first.top + first.height);

    for r in iter {
        min_x = min_x.min(r.left);
        min_y = min_y.min(r.top);
        max_x = max_x.max(r.left + r.width);
        max_y = max_y.max(r.top + r.height);
    }

    Some(Rect {
        left: min_x,
        top: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

/// Where a point, given relative to an unrotated container, lands once the
/// container at `(x, y, width, height)` is rotated about its centre.
///
/// Returns absolute coordinates.
pub fn rotated_child_position(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    container_h: f64,
    child_x: f64,
    child_y: f64,
    angle_deg: f64,
) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let rel_x = child_x - container_w / 2.0;
    let rel_y = child_y - container_h / 2.0;

    [
        container_x + container_w / 2.0 + rel_x * cos - rel_y * sin,
        container_y + container_h / 2.0 + rel_x * sin + rel_y * cos,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a[0] - b[0]).abs() < EPS && (a[1] - b[1]).abs() < EPS
    }

    fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let r = rotate_segment([0.0, 0.0], [100.0, 50.0], 0.0);
        assert_eq!(r.start, [0.0, 0.0]);
        assert_eq!(r.end, [100.0, 50.0]);
        assert_eq!(r.offset, [0.0, 0.0]);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // Horizontal segment of length 100 becomes vertical.
        let r = rotate_segment([0.0, 0.0], [100.0, 0.0], 90.0);
        assert!(close(r.start, [0.0, 0.0]));
        assert!(close(r.end, [0.0, 100.0]));
        assert!(close(r.offset, [50.0, -50.0]));
    }

    #[test]
    fn test_rotate_then_unrotate_restores_segment() {
        for angle in [15.0, 45.0, 90.0, 133.0, 270.0, -60.0] {
            let start = [100.0, 0.0];
            let end = [0.0, 50.0];
            let there = rotate_segment(start, end, angle);
            let back = rotate_segment(there.start, there.end, -angle);
            assert!(close(back.start, start), "angle {}", angle);
            assert!(close(back.end, end), "angle {}", angle);
            assert!(close(
                [there.offset[0] + back.offset[0], there.offset[1] + back.offset[1]],
                [0.0, 0.0]
            ));
        }
    }

    #[test]
    fn test_flip_siblings_mirrors_left() {
        let items = vec![rect(0.0, 0.0, 20.0, 10.0), rect(80.0, 5.0, 20.0, 10.0)];
        let flipped = flip_siblings(&items, FlipAxis::Y);
        assert_eq!(flipped[0], rect(80.0, 0.0, 20.0, 10.0));
        assert_eq!(flipped[1], rect(0.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn test_flip_siblings_mirrors_top() {
        let items = vec![rect(0.0, 0.0, 20.0, 10.0), rect(30.0, 40.0, 20.0, 60.0)];
        let flipped = flip_siblings(&items, FlipAxis::X);
        assert_eq!(flipped[0], rect(0.0, 90.0, 20.0, 10.0));
        assert_eq!(flipped[1], rect(30.0, 0.0, 20.0, 60.0));
    }

    #[test]
    fn test_flip_siblings_is_involution() {
        let items = vec![
            rect(3.0, 7.0, 11.0, 13.0),
            rect(-5.0, 20.0, 40.0, 2.0),
            rect(17.5, -3.25, 1.0, 9.0),
        ];
        for axis in [FlipAxis::X, FlipAxis::Y] {
            let twice = flip_siblings(&flip_siblings(&items, axis), axis);
            assert_eq!(twice, items);
        }
    }

    #[test]
    fn test_flip_siblings_empty() {
        let items: Vec<Rect> = Vec::new();
        assert!(flip_siblings(&items, FlipAxis::Y).is_empty());
    }

    #[test]
    fn test_rotated_child_position() {
        // Unrotated: plain translation.
        let p = rotated_child_position(10.0, 20.0, 100.0, 100.0, 25.0, 30.0, 0.0);
        assert!(close(p, [35.0, 50.0]));

        // Quarter turn clockwise: the top-left corner moves to the top-right.
        let p = rotated_child_position(0.0, 0.0, 100.0, 100.0, 0.0, 0.0, 90.0);
        assert!(close(p, [100.0, 0.0]));

        // The centre is a fixed point.
        let p = rotated_child_position(0.0, 0.0, 100.0, 60.0, 50.0, 30.0, 37.0);
        assert!(close(p, [50.0, 30.0]));
    }
}
