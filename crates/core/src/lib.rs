//! Annotation model, wire mapping and validation for media labels.
//!
//! Pure logic only: nothing in this crate performs I/O. The HTTP side
//! lives in `specimark-client`.

pub mod error;
pub mod factory;
pub mod model;
pub mod query;
pub mod scope;
pub mod shape;
pub mod stats;
pub mod transform;
pub mod types;
pub mod validate;
pub mod wire;
