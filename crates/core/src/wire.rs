//! Persistence wire format.
//!
//! [`WireAnnotation`] mirrors the JSON record exchanged with the labels
//! endpoints. Deserialization is deliberately lenient: the backend has
//! historically sent numbers as strings, flags as booleans or integers,
//! and point lists either as arrays or as JSON-encoded strings. Every
//! field is optional here; defaulting happens in [`crate::transform`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::types::{DbId, Timestamp};

/// One annotation record as exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireAnnotation {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub annotation_id: Option<DbId>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub shape_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub y: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub w: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub h: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_points",
        skip_serializing_if = "Option::is_none"
    )]
    pub points: Option<Vec<f64>>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub tx: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ty: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tw: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub th: Option<f64>,

    #[serde(
        rename = "showDefaultText",
        default,
        deserialize_with = "lenient_flag",
        serialize_with = "flag_as_int"
    )]
    pub show_default_text: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient_flag",
        serialize_with = "flag_as_int"
    )]
    pub locked: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        serialize_with = "chrono::serde::ts_seconds_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_on: Option<Timestamp>,

    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        serialize_with = "chrono::serde::ts_seconds_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_on: Option<Timestamp>,

    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_id: Option<DbId>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_id: Option<DbId>,
}

/// Body of a `labels/edit` request. Records without an id are created,
/// records with one are updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveRequest {
    #[serde(rename = "linkId")]
    pub link_id: DbId,
    pub save: Vec<WireAnnotation>,
}

/// Body of a `labels/delete` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteRequest {
    #[serde(rename = "annotationIds")]
    pub annotation_ids: Vec<DbId>,
}

/// One or many annotation ids, normalized to a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationIds(pub Vec<DbId>);

impl AnnotationIds {
    pub fn into_vec(self) -> Vec<DbId> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<DbId> for AnnotationIds {
    fn from(id: DbId) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<DbId>> for AnnotationIds {
    fn from(ids: Vec<DbId>) -> Self {
        Self(ids)
    }
}

impl From<&[DbId]> for AnnotationIds {
    fn from(ids: &[DbId]) -> Self {
        Self(ids.to_vec())
    }
}

impl<const N: usize> From<[DbId; N]> for AnnotationIds {
    fn from(ids: [DbId; N]) -> Self {
        Self(ids.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Coerce a JSON scalar to a finite number.
///
/// Numbers pass through, numeric strings are parsed after trimming and
/// booleans map to `1` / `0`. Everything else yields `None`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

/// Coerce a JSON scalar to an integer id.
pub fn id_from_value(value: &Value) -> Option<DbId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as DbId)),
        Value::String(s) => s.trim().parse::<DbId>().ok(),
        _ => None,
    }
}

/// Coerce a point list element-wise. Non-numeric elements become NaN so
/// the validator can report them instead of them silently vanishing.
pub fn points_from_value(value: &Value) -> Option<Vec<f64>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| number_from_value(item).unwrap_or(f64::NAN))
                .collect(),
        ),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(inner @ Value::Array(_)) => points_from_value(&inner),
            _ => None,
        },
        _ => None,
    }
}

fn flag_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn timestamp_from_value(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(secs) = s.parse::<i64>() {
                return chrono::DateTime::from_timestamp(secs, 0);
            }
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&chrono::Utc))
        }
        _ => None,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(number_from_value))
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DbId>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(id_from_value))
}

fn lenient_points<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<f64>>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(points_from_value))
}

fn lenient_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(flag_from_value))
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(timestamp_from_value))
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn flag_as_int<S: Serializer>(flag: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
    match flag {
        Some(b) => s.serialize_u8(u8::from(*b)),
        None => s.serialize_none(),
    }
}
