use geo::algorithm::Relate;
use geo::{Distance, Euclidean};
use geo_types::Geometry;
use geoquery_core::{row_to_geometry, GeometryCollection, GeometryError};
use rayon::prelude::*;

use crate::query_result::QueryResult;
use crate::rtree_index::RTreeSpatialIndex;
use crate::spatial_index::SpatialIndex;

/// Batch spatial query engine over a fixed target [`GeometryCollection`].
///
/// Built once from a target collection (which it owns for its whole
/// lifetime) and a bulk-loaded R-tree over that target's row envelopes.
/// Both are read-only after `build`, so `&self` query methods need no
/// interior mutability and the engine is `Sync` by construction.
pub struct SpatialEngine {
    target: GeometryCollection,
    index: RTreeSpatialIndex,
}

impl SpatialEngine {
    pub fn build(target: GeometryCollection) -> Result<Self, GeometryError> {
        let mut entries = Vec::with_capacity(target.len());
        for i in 0..target.len() {
            let bbox = target.bbox(i).ok_or_else(|| GeometryError::InvalidGeometry {
                detail: format!("target row {i} has no coordinates"),
            })?;
            entries.push((i as u32, bbox));
        }
        let index = RTreeSpatialIndex::bulk_load(entries);
        Ok(Self { target, index })
    }

    pub fn overlaps(&self, query: &GeometryCollection) -> Result<QueryResult, GeometryError> {
        self.csr_query(query, 0.0, |target_geom, query_geom| {
            target_geom.relate(query_geom).is_overlaps()
        })
    }

    pub fn intersects(&self, query: &GeometryCollection) -> Result<QueryResult, GeometryError> {
        self.csr_query(query, 0.0, |target_geom, query_geom| {
            target_geom.relate(query_geom).is_intersects()
        })
    }

    pub fn within_distance(
        &self,
        query: &GeometryCollection,
        distance: f64,
    ) -> Result<QueryResult, GeometryError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(GeometryError::InvalidDistance { distance });
        }
        self.csr_query(query, distance, move |target_geom, query_geom| {
            Euclidean::distance(target_geom, query_geom) <= distance
        })
    }

    pub fn nearest(&self, query: &GeometryCollection) -> Result<QueryResult, GeometryError> {
        let num_query_rows = query.len();
        if self.target.is_empty() || num_query_rows == 0 {
            return Ok(QueryResult::empty_per_item());
        }

        let rows: Result<Vec<(u32, f64)>, GeometryError> = (0..num_query_rows)
            .into_par_iter()
            .map(|i| self.nearest_for_row(query, i))
            .collect();
        let rows = rows?;

        let (indices, distances) = rows.into_iter().unzip();
        Ok(QueryResult::PerItem { indices, distances })
    }

    /// Shared shape for overlaps/intersects/within_distance: per query row,
    /// expand its envelope by `expand_by` (0 for overlaps/intersects, the
    /// distance threshold for within_distance), ask the index for candidates,
    /// refine each with `refine`, sort + dedup, and append to the CSR buffer.
    fn csr_query(
        &self,
        query: &GeometryCollection,
        expand_by: f64,
        refine: impl Fn(&Geometry<f64>, &Geometry<f64>) -> bool + Sync,
    ) -> Result<QueryResult, GeometryError> {
        let num_query_rows = query.len();
        if self.target.is_empty() || num_query_rows == 0 {
            return Ok(QueryResult::Csr {
                indices: Vec::new(),
                row_ptr: vec![0; num_query_rows + 1],
            });
        }

        let per_row: Result<Vec<Vec<u32>>, GeometryError> = (0..num_query_rows)
            .into_par_iter()
            .map(|i| self.matches_for_row(query, i, expand_by, &refine))
            .collect();
        let per_row = per_row?;

        let mut indices = Vec::new();
        let mut row_ptr = Vec::with_capacity(num_query_rows + 1);
        row_ptr.push(0u32);
        for mut matches in per_row {
            matches.sort_unstable();
            matches.dedup();
            indices.extend(matches);
            row_ptr.push(indices.len() as u32);
        }

        Ok(QueryResult::Csr { indices, row_ptr })
    }

    fn matches_for_row(
        &self,
        query: &GeometryCollection,
        row: usize,
        expand_by: f64,
        refine: &(impl Fn(&Geometry<f64>, &Geometry<f64>) -> bool + Sync),
    ) -> Result<Vec<u32>, GeometryError> {
        let query_bbox = query.bbox(row).ok_or_else(|| GeometryError::InvalidGeometry {
            detail: format!("query row {row} has no coordinates"),
        })?;
        let expanded = query_bbox.expand_by(expand_by);
        let candidates = self.index.query_intersects_box(&expanded);
        let query_geom = row_to_geometry(query, row)?;

        let mut matches = Vec::new();
        for candidate in candidates {
            let target_geom = row_to_geometry(&self.target, candidate as usize)?;
            if refine(&target_geom, &query_geom) {
                matches.push(candidate);
            }
        }
        Ok(matches)
    }

    /// Best-first nearest-neighbor refinement for a single query row, using
    /// whichever of the two strategies its geometry kind needs.
    fn nearest_for_row(
        &self,
        query: &GeometryCollection,
        row: usize,
    ) -> Result<(u32, f64), GeometryError> {
        let query_geom = row_to_geometry(query, row)?;

        if query.kind() == geoquery_core::GeometryKind::Point {
            let point = query.row(row).get(0);
            let mut best: Option<(u32, f64)> = None;
            for (candidate, envelope_distance) in self.index.nearest_candidates(point) {
                if let Some((_, best_distance)) = best {
                    if best_distance <= envelope_distance {
                        break;
                    }
                }
                let target_geom = row_to_geometry(&self.target, candidate as usize)?;
                let true_distance = Euclidean::distance(&query_geom, &target_geom);
                if best.map_or(true, |(_, bd)| true_distance < bd) {
                    best = Some((candidate, true_distance));
                }
            }
            return best.ok_or_else(|| GeometryError::InternalError {
                detail: format!("nearest search found no target for query row {row}"),
            });
        }

        self.nearest_for_row_expanding_ring(query, row, &query_geom)
    }

    /// Expanding-ring nearest search for non-point query rows: `rstar` has no
    /// envelope-to-envelope nearest API, so this doubles a search radius
    /// around the query envelope until the best true distance found is
    /// provably optimal (envelope-to-envelope distance is always a lower
    /// bound on true geometry distance).
    fn nearest_for_row_expanding_ring(
        &self,
        query: &GeometryCollection,
        row: usize,
        query_geom: &Geometry<f64>,
    ) -> Result<(u32, f64), GeometryError> {
        let query_bbox = query.bbox(row).ok_or_else(|| GeometryError::InvalidGeometry {
            detail: format!("query row {row} has no coordinates"),
        })?;

        let mut radius = query_bbox.width().max(query_bbox.height()).max(1.0);
        let mut best: Option<(u32, f64)> = None;

        loop {
            let expanded = query_bbox.expand_by(radius);
            for candidate in self.index.query_intersects_box(&expanded) {
                let candidate_bbox =
                    self.target
                        .bbox(candidate as usize)
                        .ok_or_else(|| GeometryError::InternalError {
                            detail: format!("target row {candidate} has no envelope"),
                        })?;
                let lower_bound = query_bbox.distance_to(&candidate_bbox);
                if best.is_some_and(|(_, bd)| lower_bound >= bd) {
                    continue;
                }
                let target_geom = row_to_geometry(&self.target, candidate as usize)?;
                let true_distance = Euclidean::distance(query_geom, &target_geom);
                if best.map_or(true, |(_, bd)| true_distance < bd) {
                    best = Some((candidate, true_distance));
                }
            }

            if let Some((_, best_distance)) = best {
                if best_distance <= radius {
                    return Ok(best.unwrap());
                }
            }
            radius *= 2.0;
        }
    }
}
