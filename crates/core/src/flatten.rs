//! Recursive flattening of raw element trees.
//!
//! Elements are visited in ascending `order`. Group and diagram containers
//! are dissolved: their children are moved into the parent's coordinate
//! space and flattened in turn, so only leaf elements reach the output.

use crate::convert;
use crate::error::ElementError;
use crate::geometry::{flip_siblings, rotated_child_position, FlipAxis, Placement, Rect};
use crate::options::Context;
use crate::raw::{RawContainer, RawElement, RawElements, SkippedElement};
use crate::types::Element;

/// An element that was left out of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedElement {
    /// Vendor shape type for shapes, element kind otherwise.
    pub kind: String,
    pub reason: ElementError,
}

impl From<SkippedElement> for DroppedElement {
    fn from(skipped: SkippedElement) -> Self {
        Self {
            kind: skipped.kind,
            reason: ElementError::Malformed(skipped.reason),
        }
    }
}

/// Result of flattening one element list.
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    pub elements: Vec<Element>,
    pub dropped: Vec<DroppedElement>,
}

impl Flattened {
    fn one(element: Element) -> Self {
        Self {
            elements: vec![element],
            dropped: Vec::new(),
        }
    }

    fn append(mut self, other: Flattened) -> Self {
        self.elements.extend(other.elements);
        self.dropped.extend(other.dropped);
        self
    }
}

impl Placement for RawElement {
    fn bounds(&self) -> Rect {
        let f = self.frame();
        Rect {
            left: f.left,
            top: f.top,
            width: f.width,
            height: f.height,
        }
    }

    fn moved_to(&self, left: f64, top: f64) -> Self {
        let mut moved = self.clone();
        let frame = moved.frame_mut();
        frame.left = left;
        frame.top = top;
        moved
    }
}

/// Flatten a list of sibling elements.
///
/// Entries that failed to decode are reported as dropped.
pub fn flatten(elements: RawElements, ctx: &Context<'_>) -> Flattened {
    let RawElements {
        items: mut elements,
        skipped,
    } = elements;
    // Stable: equal orders keep their input sequence.
    elements.sort_by_key(|el| el.frame().order);

    let decoded = Flattened {
        elements: Vec::new(),
        dropped: skipped.into_iter().map(DroppedElement::from).collect(),
    };
    elements
        .into_iter()
        .map(|el| flatten_element(el, ctx))
        .fold(decoded, Flattened::append)
}

fn flatten_element(el: RawElement, ctx: &Context<'_>) -> Flattened {
    match el {
        RawElement::Group(container) | RawElement::Diagram(container) => {
            flatten(place_children(container), ctx)
        }
        RawElement::Shape(shape) => match convert::convert_shape(&shape, ctx) {
            Ok(element) => Flattened::one(element),
            Err(reason) => {
                log::warn!("Dropping shape '{}': {}", shape.shap_type, reason);
                Flattened {
                    elements: Vec::new(),
                    dropped: vec![DroppedElement {
                        kind: shape.shap_type,
                        reason: reason.into(),
                    }],
                }
            }
        },
        RawElement::Text(text) => Flattened::one(Element::Text(convert::convert_text(&text, ctx))),
        RawElement::Image(image) => {
            Flattened::one(Element::Image(convert::convert_image(&image, ctx)))
        }
        RawElement::Table(table) => {
            Flattened::one(Element::Table(convert::convert_table(&table, ctx)))
        }
        RawElement::Chart(chart) => {
            Flattened::one(Element::Chart(convert::convert_chart(&chart, ctx)))
        }
        RawElement::Math(math) => Flattened::one(Element::Image(convert::convert_math(&math, ctx))),
        RawElement::Audio(media) => {
            Flattened::one(Element::Audio(convert::convert_audio(&media, ctx)))
        }
        RawElement::Video(media) => {
            Flattened::one(Element::Video(convert::convert_video(&media, ctx)))
        }
    }
}

/// Move a container's children into its parent's raw coordinate space.
///
/// Unrotated containers translate their children by their origin. Rotated
/// containers move each child's centre around the container centre and add
/// the container rotation to the child. Container flips are toggled onto
/// children that carry their own flip flags, then the children are mirrored
/// inside their joint bounding box.
fn place_children(container: RawContainer) -> RawElements {
    let parent = container.frame;
    let RawElements { items, skipped } = container.elements;

    let mut children: Vec<RawElement> = items
        .into_iter()
        .map(|mut child| {
            let supports_flip = child.supports_flip();
            let frame = child.frame_mut();

            if parent.rotate != 0.0 {
                let [x, y] = rotated_child_position(
                    parent.left,
                    parent.top,
                    parent.width,
                    parent.height,
                    frame.left + frame.width / 2.0,
                    frame.top + frame.height / 2.0,
                    parent.rotate,
                );
                frame.left = x - frame.width / 2.0;
                frame.top = y - frame.height / 2.0;
                frame.rotate += parent.rotate;
            } else {
                frame.left += parent.left;
                frame.top += parent.top;
            }

            if supports_flip {
                frame.is_flip_h ^= parent.is_flip_h;
                frame.is_flip_v ^= parent.is_flip_v;
            }
            child
        })
        .collect();

    if parent.is_flip_h {
        children = flip_siblings(&children, FlipAxis::Y);
    }
    if parent.is_flip_v {
        children = flip_siblings(&children, FlipAxis::X);
    }
    RawElements {
        items: children,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use crate::options::{ScaleRatio, Theme};
    use crate::shapes::ShapeLibrary;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawElements {
        serde_json::from_value(value).unwrap()
    }

    fn run(elements: RawElements, ratio: f64) -> Flattened {
        let theme = Theme::default();
        let shapes = ShapeLibrary::builtin();
        flatten(elements, &Context::new(ScaleRatio::new(ratio), &theme, &shapes))
    }

    #[test]
    fn test_sorted_by_order_stably() {
        let out = run(
            raw(json!([
                {"type": "text", "order": 2, "left": 3},
                {"type": "text", "order": 1, "left": 1},
                {"type": "text", "order": 2, "left": 4},
                {"type": "text", "order": 0, "left": 0}
            ])),
            1.0,
        );
        let lefts: Vec<f64> = out.elements.iter().map(|e| e.position()[0]).collect();
        assert_eq!(lefts, vec![0.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_leaf_fields_scale_by_ratio() {
        let out = run(
            raw(json!([{"type": "text", "left": 10, "top": 20, "width": 100, "height": 50}])),
            1.333,
        );
        let Element::Text(text) = &out.elements[0] else {
            panic!("expected text");
        };
        for (actual, expected) in [
            (text.left, 13.33),
            (text.top, 26.66),
            (text.width, 133.3),
            (text.height, 66.65),
        ] {
            assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_group_children_are_translated() {
        let out = run(
            raw(json!([{
                "type": "group",
                "left": 50, "top": 30, "width": 200, "height": 100,
                "elements": [
                    {"type": "text", "left": 0, "top": 0, "width": 20, "height": 10},
                    {"type": "text", "left": 100, "top": 40, "width": 20, "height": 10}
                ]
            }])),
            2.0,
        );
        assert_eq!(out.elements.len(), 2);
        assert_eq!(out.elements[0].position(), [100.0, 60.0]);
        assert_eq!(out.elements[1].position(), [300.0, 140.0]);
        assert!(out.elements.iter().all(|e| e.kind_name() == "text"));
    }

    #[test]
    fn test_flipped_group_mirrors_children() {
        let out = run(
            raw(json!([{
                "type": "group",
                "left": 0, "top": 0, "width": 200, "height": 100,
                "isFlipH": true,
                "elements": [
                    {"type": "shape", "shapType": "rect", "left": 0, "top": 0, "width": 20, "height": 10},
                    {"type": "text", "left": 80, "top": 50, "width": 120, "height": 50}
                ]
            }])),
            1.0,
        );
        assert_eq!(out.elements[0].position(), [180.0, 0.0]);
        assert_eq!(out.elements[1].position(), [0.0, 50.0]);
        match &out.elements[0] {
            Element::Shape(shape) => assert!(shape.flip_h && !shape.flip_v),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rotated_group_rotates_children() {
        let out = run(
            raw(json!([{
                "type": "group",
                "left": 0, "top": 0, "width": 100, "height": 100,
                "rotate": 90,
                "elements": [
                    {"type": "text", "left": 0, "top": 0, "width": 20, "height": 20}
                ]
            }])),
            1.0,
        );
        // The top-left child ends up in the top-right corner.
        match &out.elements[0] {
            Element::Text(text) => {
                assert!((text.left - 80.0).abs() < 1e-9);
                assert!(text.top.abs() < 1e-9);
                assert_eq!(text.rotate, 90.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_containers() {
        let out = run(
            raw(json!([{
                "type": "diagram",
                "left": 10, "top": 10, "width": 100, "height": 100,
                "elements": [{
                    "type": "group",
                    "left": 5, "top": 5, "width": 50, "height": 50,
                    "elements": [
                        {"type": "video", "left": 1, "top": 2, "width": 3, "height": 4, "src": "v.mp4"}
                    ]
                }]
            }])),
            1.0,
        );
        assert_eq!(out.elements.len(), 1);
        assert_eq!(out.elements[0].position(), [16.0, 17.0]);
    }

    #[test]
    fn test_unresolvable_shape_is_dropped() {
        let out = run(
            raw(json!([
                {"type": "shape", "shapType": "mystery", "width": 10, "height": 10},
                {"type": "shape", "shapType": "rect", "width": 10, "height": 10}
            ])),
            1.0,
        );
        assert_eq!(out.elements.len(), 1);
        assert_eq!(out.dropped.len(), 1);
        assert_eq!(out.dropped[0].kind, "mystery");
        assert!(matches!(
            out.dropped[0].reason,
            ElementError::Shape(ShapeError::NoGeometry(_))
        ));
    }

    #[test]
    fn test_malformed_child_of_group_is_dropped() {
        let out = run(
            raw(json!([{
                "type": "group",
                "left": 10, "top": 10, "width": 100, "height": 100,
                "elements": [
                    {"type": "text", "left": 1, "top": 1, "width": 5, "height": 5},
                    {"type": "ink"}
                ]
            }])),
            1.0,
        );
        assert_eq!(out.elements.len(), 1);
        assert_eq!(out.elements[0].position(), [11.0, 11.0]);
        assert_eq!(out.dropped.len(), 1);
        assert_eq!(out.dropped[0].kind, "ink");
        assert!(matches!(out.dropped[0].reason, ElementError::Malformed(_)));
    }

    #[test]
    fn test_group_never_in_output() {
        let out = run(
            raw(json!([{"type": "group", "width": 10, "height": 10, "elements": []}])),
            1.0,
        );
        assert!(out.elements.is_empty());
        assert!(out.dropped.is_empty());
    }
}
