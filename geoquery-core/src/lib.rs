//! Core value objects and columnar geometry storage shared by the rest of
//! the engine: coordinates, bounding boxes, geometry kinds, the CSR-backed
//! `GeometryCollection`, and the adapter that lazily turns a row of one
//! into a `geo_types::Geometry`.

mod adapter;
mod bbox;
mod collection;
mod coordinate;
mod error;
mod kind;

pub use adapter::row_to_geometry;
pub use bbox::BoundingBox;
pub use collection::{CoordBuffer, GeometryCollection, RowCoords};
pub use coordinate::Coordinate;
pub use error::GeometryError;
pub use kind::GeometryKind;
