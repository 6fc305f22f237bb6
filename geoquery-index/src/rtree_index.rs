use geoquery_core::{BoundingBox, Coordinate};
use rstar::{PointDistance, RTree, AABB};

use crate::indexed_geometry::IndexedGeometry;
use crate::spatial_index::SpatialIndex;

/// R*-tree backed spatial index, bulk-loaded once over the target set's
/// envelopes and never mutated afterward.
pub struct RTreeSpatialIndex {
    tree: RTree<IndexedGeometry>,
}

impl SpatialIndex for RTreeSpatialIndex {
    fn bulk_load(entries: Vec<(u32, BoundingBox)>) -> Self {
        let indexed = entries
            .iter()
            .map(|(id, bbox)| IndexedGeometry::new(*id, bbox))
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    fn query_intersects_box(&self, env: &BoundingBox) -> Vec<u32> {
        let envelope = AABB::from_corners([env.min_x, env.min_y], [env.max_x, env.max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.id())
            .collect()
    }

    fn nearest_candidates<'a>(
        &'a self,
        point: Coordinate,
    ) -> Box<dyn Iterator<Item = (u32, f64)> + 'a> {
        let pt = [point.x(), point.y()];
        Box::new(self.tree.nearest_neighbor_iter(&pt).map(move |entry| {
            let dist = entry.distance_2(&pt).sqrt();
            (entry.id(), dist)
        }))
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    #[test]
    fn bulk_load_empty_is_valid() {
        let index = RTreeSpatialIndex::bulk_load(vec![]);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn query_intersects_box_finds_overlapping_entries() {
        let index = RTreeSpatialIndex::bulk_load(vec![
            (0, bbox(0.0, 0.0, 5.0, 5.0)),
            (1, bbox(3.0, 3.0, 8.0, 8.0)),
            (2, bbox(20.0, 20.0, 25.0, 25.0)),
        ]);
        let mut hits = index.query_intersects_box(&bbox(4.0, 4.0, 6.0, 6.0));
        hits.sort();
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn nearest_candidates_are_in_nondecreasing_order() {
        let index = RTreeSpatialIndex::bulk_load(vec![
            (0, bbox(10.0, 10.0, 10.0, 10.0)),
            (1, bbox(0.0, 0.0, 0.0, 0.0)),
            (2, bbox(5.0, 5.0, 5.0, 5.0)),
        ]);
        let candidates: Vec<(u32, f64)> = index
            .nearest_candidates(Coordinate::new(0.0, 0.0))
            .collect();
        assert_eq!(candidates[0].0, 1);
        assert!(candidates.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn single_entry_tree_round_trips() {
        let index = RTreeSpatialIndex::bulk_load(vec![(7, bbox(1.0, 1.0, 2.0, 2.0))]);
        assert_eq!(index.len(), 1);
        let hits = index.query_intersects_box(&bbox(0.0, 0.0, 10.0, 10.0));
        assert_eq!(hits, vec![7]);
    }
}
