/// The result of a batch spatial query.
///
/// The teacher's own `QueryResult` packs three optional arrays
/// (indices/row_ptr/distances) into one struct and leans on callers to know
/// which fields apply to which query kind. Here that's a tagged sum instead:
/// `Csr` for the all-matches query kinds (overlaps/intersects/within_distance),
/// `PerItem` for nearest. A caller dispatches on the variant instead of
/// checking which optional field happens to be populated.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// `indices[row_ptr[i]..row_ptr[i+1])` is the sorted, deduplicated set of
    /// target row-ids matching query row `i`. `row_ptr` has length `Nq + 1`.
    Csr { indices: Vec<u32>, row_ptr: Vec<u32> },

    /// `indices[i]` is the nearest target row-id to query row `i`, and
    /// `distances[i]` its true distance. Both arrays have length `Nq`.
    PerItem {
        indices: Vec<u32>,
        distances: Vec<f64>,
    },
}

impl QueryResult {
    pub fn empty_csr() -> Self {
        QueryResult::Csr {
            indices: Vec::new(),
            row_ptr: Vec::new(),
        }
    }

    pub fn empty_per_item() -> Self {
        QueryResult::PerItem {
            indices: Vec::new(),
            distances: Vec::new(),
        }
    }
}
