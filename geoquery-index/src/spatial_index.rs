use geoquery_core::{BoundingBox, Coordinate};

/// Read-only, re-entrant spatial index over target row envelopes.
///
/// Unlike the teacher's `SpatialIndex` trait, this one has no `insert` or
/// `remove`: the index is always produced once, in full, by `bulk_load`, and
/// never mutated afterward; incremental indices are out of scope here.
pub trait SpatialIndex: Sized {
    /// Build the index in one pass from every target row's (id, envelope).
    fn bulk_load(entries: Vec<(u32, BoundingBox)>) -> Self;

    /// Every target row-id whose envelope intersects `env`.
    fn query_intersects_box(&self, env: &BoundingBox) -> Vec<u32>;

    /// Target row-ids in non-decreasing order of envelope-to-point distance,
    /// paired with that envelope distance. Lazy, so a best-first refinement
    /// loop can stop pulling as soon as it has proved optimality without
    /// forcing evaluation of the whole tree. Used to seed point query rows.
    fn nearest_candidates<'a>(&'a self, point: Coordinate) -> Box<dyn Iterator<Item = (u32, f64)> + 'a>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
