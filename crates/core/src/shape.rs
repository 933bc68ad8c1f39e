//! Shape tags and per-shape geometry.
//!
//! Every annotation carries an anchor point (`x`, `y`) plus a [`Shape`]
//! that holds whatever extra geometry its kind needs. Matching on
//! [`Shape`] is exhaustive, so the transform layer and the validator both
//! fail to compile when a new kind is added without a rule.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Shape tags
// ---------------------------------------------------------------------------

/// The recognized shape kinds, as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Rect,
    Point,
    Poly,
}

/// All valid shape tag strings.
pub const VALID_SHAPE_TYPES: &[&str] = &["rect", "point", "poly"];

impl ShapeType {
    /// Return the wire tag for this shape kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Point => "point",
            Self::Poly => "poly",
        }
    }

    /// Leniently map a wire tag to a shape kind.
    ///
    /// Accepts the long spellings `rectangle` and `polygon` and ignores
    /// case and surrounding whitespace. Returns `None` for anything else.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Some(Self::Rect),
            "point" => Some(Self::Point),
            "poly" | "polygon" => Some(Self::Poly),
            _ => None,
        }
    }

    /// Strict variant of [`parse`](Self::parse) for user-facing input.
    pub fn from_str(tag: &str) -> Result<Self, CoreError> {
        Self::parse(tag).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid shape type '{tag}'. Must be one of: {}",
                VALID_SHAPE_TYPES.join(", ")
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Shape-specific geometry of an annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle anchored at the annotation's `x`, `y`.
    Rect { w: f64, h: f64 },
    /// A single marker at the annotation's `x`, `y`.
    Point,
    /// Flat `[x0, y0, x1, y1, ...]` coordinate list.
    ///
    /// `None` when the record carried no point list at all.
    Polygon { points: Option<Vec<f64>> },
    /// A type tag this crate does not know. Carried verbatim.
    Other(String),
    /// The record had no type tag.
    Missing,
}

impl Shape {
    /// The recognized kind, if any.
    pub fn shape_type(&self) -> Option<ShapeType> {
        match self {
            Self::Rect { .. } => Some(ShapeType::Rect),
            Self::Point => Some(ShapeType::Point),
            Self::Polygon { .. } => Some(ShapeType::Poly),
            Self::Other(_) | Self::Missing => None,
        }
    }

    /// The tag written to the wire `type` field.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Other(tag) => Some(tag.as_str()),
            Self::Missing => None,
            known => known.shape_type().map(|t| t.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_short_and_long_spellings() {
        assert_eq!(ShapeType::parse("rect"), Some(ShapeType::Rect));
        assert_eq!(ShapeType::parse("Rectangle"), Some(ShapeType::Rect));
        assert_eq!(ShapeType::parse(" point "), Some(ShapeType::Point));
        assert_eq!(ShapeType::parse("polygon"), Some(ShapeType::Poly));
        assert_eq!(ShapeType::parse("circle"), None);
    }

    #[test]
    fn from_str_lists_valid_tags() {
        let err = ShapeType::from_str("ellipse").unwrap_err();
        assert!(err.to_string().contains("rect, point, poly"));
    }

    #[test]
    fn as_str_roundtrips_through_parse() {
        for tag in VALID_SHAPE_TYPES {
            assert_eq!(ShapeType::parse(tag).map(|t| t.as_str()), Some(*tag));
        }
    }

    #[test]
    fn unknown_tag_is_kept_verbatim() {
        let shape = Shape::Other("Ellipse".to_string());
        assert_eq!(shape.tag(), Some("Ellipse"));
        assert_eq!(shape.shape_type(), None);
        assert_eq!(Shape::Missing.tag(), None);
    }
}
