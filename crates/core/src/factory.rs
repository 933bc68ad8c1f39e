//! Initial annotations for the drawing tools.

use crate::model::{Annotation, Position, Provenance, TextAnchor};
use crate::shape::{Shape, ShapeType};

/// Width of a freshly drawn rectangle.
pub const DEFAULT_RECT_WIDTH: f64 = 100.0;

/// Height of a freshly drawn rectangle.
pub const DEFAULT_RECT_HEIGHT: f64 = 50.0;

/// Build an unsaved, unlabeled annotation of the given shape anchored at
/// `position`.
///
/// Polygons start as a small triangle hanging off the anchor. An
/// unrecognized tag produces an annotation with no geometry, which the
/// validator will not accept until it has been given a real shape.
pub fn make_default(shape_type: &str, position: Position) -> Annotation {
    let Position { x, y } = position;

    let shape = if shape_type.trim().is_empty() {
        Shape::Missing
    } else {
        match ShapeType::parse(shape_type) {
            Some(ShapeType::Rect) => Shape::Rect {
                w: DEFAULT_RECT_WIDTH,
                h: DEFAULT_RECT_HEIGHT,
            },
            Some(ShapeType::Point) => Shape::Point,
            Some(ShapeType::Poly) => Shape::Polygon {
                points: Some(vec![x, y, x + 50.0, y, x + 25.0, y + 50.0]),
            },
            None => Shape::Other(shape_type.to_string()),
        }
    };

    Annotation {
        annotation_id: None,
        label: String::new(),
        description: String::new(),
        x,
        y,
        shape,
        text: TextAnchor::for_position(position),
        show_default_text: true,
        locked: false,
        provenance: Provenance::default(),
        link_id: None,
        context_type: None,
        context_id: None,
    }
}
