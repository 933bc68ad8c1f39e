//! Wire <-> domain mapping.
//!
//! Both directions are total: a malformed batch yields an empty list, a
//! malformed element is skipped, and a missing field takes its default.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{Annotation, Provenance, TextAnchor, TEXT_OFFSET_X, TEXT_OFFSET_Y};
use crate::shape::{Shape, ShapeType};
use crate::wire::WireAnnotation;

/// Text anchor coordinate used when the record has neither an explicit
/// anchor nor the shape coordinate to derive one from.
pub const FALLBACK_TEXT_COORD: f64 = 10.0;

/// Size used for `w`, `h`, `tw` and `th` when the record has none.
pub const DEFAULT_EXTENT: f64 = 1.0;

// ---------------------------------------------------------------------------
// Wire -> domain
// ---------------------------------------------------------------------------

/// Map a wire response body to domain annotations.
///
/// Anything other than a JSON array yields an empty list. Array elements
/// that are not objects are skipped.
pub fn wire_to_domain(body: &Value) -> Vec<Annotation> {
    let Some(items) = body.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!(index, "Skipping annotation record that is not an object");
                return None;
            }
            match WireAnnotation::deserialize(item) {
                Ok(record) => Some(Annotation::from(&record)),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable annotation record");
                    None
                }
            }
        })
        .collect()
}

fn shape_from_wire(record: &WireAnnotation) -> Shape {
    let Some(tag) = record.shape_type.as_deref().filter(|t| !t.trim().is_empty()) else {
        return Shape::Missing;
    };
    match ShapeType::parse(tag) {
        Some(ShapeType::Rect) => Shape::Rect {
            w: record.w.unwrap_or(DEFAULT_EXTENT),
            h: record.h.unwrap_or(DEFAULT_EXTENT),
        },
        Some(ShapeType::Point) => Shape::Point,
        Some(ShapeType::Poly) => Shape::Polygon {
            points: record.points.clone(),
        },
        None => Shape::Other(tag.to_string()),
    }
}

impl From<&WireAnnotation> for Annotation {
    fn from(record: &WireAnnotation) -> Self {
        let text = TextAnchor {
            tx: record
                .tx
                .or(record.x.map(|x| x + TEXT_OFFSET_X))
                .unwrap_or(FALLBACK_TEXT_COORD),
            ty: record
                .ty
                .or(record.y.map(|y| y + TEXT_OFFSET_Y))
                .unwrap_or(FALLBACK_TEXT_COORD),
            tw: record.tw.unwrap_or(DEFAULT_EXTENT),
            th: record.th.unwrap_or(DEFAULT_EXTENT),
        };

        Self {
            annotation_id: record.annotation_id,
            label: record.label.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            x: record.x.unwrap_or(0.0),
            y: record.y.unwrap_or(0.0),
            shape: shape_from_wire(record),
            text,
            show_default_text: record.show_default_text.unwrap_or(true),
            locked: record.locked.unwrap_or(false),
            provenance: Provenance {
                user_name: record.user_name.clone(),
                created_on: record.created_on,
                updated_on: record.updated_on,
            },
            link_id: record.link_id,
            context_type: record.context_type.clone(),
            context_id: record.context_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Domain -> wire
// ---------------------------------------------------------------------------

/// Map domain annotations to wire records ready for a save batch.
pub fn domain_to_wire(annotations: &[Annotation]) -> Vec<WireAnnotation> {
    annotations.iter().map(WireAnnotation::from).collect()
}

/// Finite value or the default extent.
fn extent(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        DEFAULT_EXTENT
    }
}

impl From<&Annotation> for WireAnnotation {
    fn from(annotation: &Annotation) -> Self {
        let (w, h, points) = match &annotation.shape {
            Shape::Rect { w, h } => (Some(extent(*w)), Some(extent(*h)), None),
            Shape::Point => (Some(DEFAULT_EXTENT), Some(DEFAULT_EXTENT), None),
            Shape::Polygon { points } => {
                (Some(DEFAULT_EXTENT), Some(DEFAULT_EXTENT), points.clone())
            }
            Shape::Other(_) | Shape::Missing => (None, None, None),
        };

        Self {
            annotation_id: annotation.annotation_id,
            label: Some(annotation.label.clone()),
            description: Some(annotation.description.clone()),
            shape_type: annotation.shape.tag().map(str::to_string),
            x: Some(annotation.x),
            y: Some(annotation.y),
            w,
            h,
            points,
            tx: Some(annotation.text.tx),
            ty: Some(annotation.text.ty),
            tw: Some(extent(annotation.text.tw)),
            th: Some(extent(annotation.text.th)),
            show_default_text: Some(annotation.show_default_text),
            locked: Some(annotation.locked),
            // Provenance is server-assigned and never sent back.
            user_name: None,
            created_on: None,
            updated_on: None,
            link_id: annotation.link_id,
            context_type: annotation.context_type.clone(),
            context_id: annotation.context_id,
        }
    }
}
