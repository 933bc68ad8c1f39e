//! Structural checks run before an annotation is persisted.
//!
//! Validation never fails the call: problems are returned as data in a
//! [`ValidationResult`]. Errors block persistence, warnings do not.

use serde::Serialize;

use crate::model::Annotation;
use crate::shape::Shape;

/// Labels longer than this (in characters) draw a warning.
pub const MAX_LABEL_LENGTH: usize = 255;

/// Minimum number of coordinates in a polygon (three vertices).
pub const MIN_POLYGON_COORDS: usize = 6;

/// Aggregated result of checking one annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
    pub warnings: Vec<FieldViolation>,
}

/// A single problem found on an annotation field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Default)]
struct Collector {
    errors: Vec<FieldViolation>,
    warnings: Vec<FieldViolation>,
}

impl Collector {
    fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    fn warning(&mut self, field: &'static str, message: impl Into<String>) {
        self.warnings.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Check one annotation against the label and per-shape geometry rules.
pub fn validate(annotation: &Annotation) -> ValidationResult {
    let mut out = Collector::default();

    if annotation.label.trim().is_empty() {
        out.error("label", "Label is required");
    } else {
        let len = annotation.label.chars().count();
        if len > MAX_LABEL_LENGTH {
            out.warning(
                "label",
                format!("Label is {len} characters, longer than {MAX_LABEL_LENGTH}"),
            );
        }
    }

    match &annotation.shape {
        Shape::Rect { w, h } => {
            check_anchor(&mut out, annotation);
            if !(w.is_finite() && *w > 0.0) {
                out.error("w", format!("Rectangle width must be greater than 0, got {w}"));
            }
            if !(h.is_finite() && *h > 0.0) {
                out.error("h", format!("Rectangle height must be greater than 0, got {h}"));
            }
        }
        Shape::Point => check_anchor(&mut out, annotation),
        Shape::Polygon { points } => check_polygon(&mut out, points.as_deref()),
        Shape::Other(tag) => out.warning("type", format!("Unrecognized shape type '{tag}'")),
        Shape::Missing => out.error("type", "Shape type is required"),
    }

    out.finish()
}

/// Validate a batch, returning only the entries that failed, keyed by
/// their index in `annotations`.
pub fn validate_all(annotations: &[Annotation]) -> Vec<(usize, ValidationResult)> {
    annotations
        .iter()
        .enumerate()
        .map(|(i, a)| (i, validate(a)))
        .filter(|(_, result)| !result.is_valid)
        .collect()
}

fn check_anchor(out: &mut Collector, annotation: &Annotation) {
    for (field, value) in [("x", annotation.x), ("y", annotation.y)] {
        if !value.is_finite() {
            out.error(field, format!("{field} must be a finite number"));
        } else if value < 0.0 {
            out.error(field, format!("{field} must not be negative, got {value}"));
        }
    }
}

fn check_polygon(out: &mut Collector, points: Option<&[f64]>) {
    let Some(points) = points else {
        out.error("points", "Polygon requires a list of points");
        return;
    };

    let n = points.len();
    if n < MIN_POLYGON_COORDS {
        out.error(
            "points",
            format!(
                "Polygon requires at least 3 points ({MIN_POLYGON_COORDS} coordinates), got {n} coordinates"
            ),
        );
    }
    if n % 2 != 0 {
        out.error(
            "points",
            format!("Polygon must have an even number of coordinates, got an odd count of {n}"),
        );
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        out.error("points", format!("Polygon coordinate {i} is not a number"));
    }
}
