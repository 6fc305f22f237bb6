//! R-tree spatial index and the batch query engine built on top of it.

mod engine;
mod indexed_geometry;
mod query_result;
mod rtree_index;
mod spatial_index;

pub use engine::SpatialEngine;
pub use query_result::QueryResult;
pub use rtree_index::RTreeSpatialIndex;
pub use spatial_index::SpatialIndex;
