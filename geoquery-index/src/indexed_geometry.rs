use geoquery_core::BoundingBox;
use rstar::{PointDistance, RTreeObject, AABB};

/// Wrapper around a target row-id and its envelope for storage in an R*-tree.
///
/// `PartialEq` compares by `id` only; the tree never needs to distinguish two
/// entries with the same id (this engine's index is bulk-loaded once and never
/// mutated, so unlike the teacher's incremental index there is no `remove`
/// that depends on this, but the comparison shape is kept for consistency
/// with `rstar`'s own expectations of its stored objects).
#[derive(Debug, Clone)]
pub struct IndexedGeometry {
    id: u32,
    envelope: AABB<[f64; 2]>,
}

impl IndexedGeometry {
    pub fn new(id: u32, bbox: &BoundingBox) -> Self {
        let envelope = AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y]);
        Self { id, envelope }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl PartialEq for IndexedGeometry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl RTreeObject for IndexedGeometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for IndexedGeometry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.envelope.distance_2(point)
    }
}
