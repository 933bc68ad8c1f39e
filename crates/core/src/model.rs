//! In-memory annotation records.
//!
//! These are the types the editing UI works with. They are produced from
//! the wire format by [`crate::transform::wire_to_domain`] or by
//! [`crate::factory::make_default`], and turned back into wire records by
//! [`crate::transform::domain_to_wire`].

use crate::shape::Shape;
use crate::types::{DbId, Timestamp};

/// Horizontal offset of the default label anchor from the shape anchor.
pub const TEXT_OFFSET_X: f64 = 10.0;

/// Vertical offset of the default label anchor from the shape anchor.
///
/// Negative: the label sits above the shape.
pub const TEXT_OFFSET_Y: f64 = -10.0;

/// A canvas position in image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Box describing where the label text renders relative to the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub tx: f64,
    pub ty: f64,
    pub tw: f64,
    pub th: f64,
}

impl TextAnchor {
    /// The default anchor for a shape anchored at `position`:
    /// up and to the right, unit-sized.
    pub fn for_position(position: Position) -> Self {
        Self {
            tx: position.x + TEXT_OFFSET_X,
            ty: position.y + TEXT_OFFSET_Y,
            tw: 1.0,
            th: 1.0,
        }
    }
}

/// Server-assigned authorship data. Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provenance {
    pub user_name: Option<String>,
    pub created_on: Option<Timestamp>,
    pub updated_on: Option<Timestamp>,
}

/// A labeled geometric region or point overlaid on a media asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// `None` until the server has persisted the record.
    pub annotation_id: Option<DbId>,
    pub label: String,
    pub description: String,
    /// Shape anchor. Top-left corner for rectangles.
    pub x: f64,
    pub y: f64,
    pub shape: Shape,
    pub text: TextAnchor,
    pub show_default_text: bool,
    pub locked: bool,
    pub provenance: Provenance,
    /// Parent entity instance (e.g. a specific view of the media).
    pub link_id: Option<DbId>,
    pub context_type: Option<String>,
    pub context_id: Option<DbId>,
}

impl Annotation {
    /// Whether the server has assigned this annotation an id.
    pub fn is_saved(&self) -> bool {
        self.annotation_id.is_some()
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}
