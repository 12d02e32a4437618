//! Read-only view of a region adjacency graph with colour features.
//!
//! The influence builder only needs the feature and neighbour list of each
//! region; [`RegionPartition`](super::RegionPartition) is the canonical
//! implementor, but any adjacency structure can drive the automaton.
use crate::error::{SaliencyError, SaliencyResult};

pub trait RegionGraph {
    /// Number of regions `N`; valid indices are `0..N`.
    fn region_count(&self) -> usize;

    /// Mean normalized colour feature of region `i`.
    fn feature(&self, i: usize) -> [f32; 3];

    /// Neighbour indices of region `i`.
    fn neighbors(&self, i: usize) -> &[usize];
}

/// Reject graphs whose neighbour lists point outside `0..N`.
pub fn validate_graph<G: RegionGraph + ?Sized>(graph: &G) -> SaliencyResult<()> {
    let n = graph.region_count();
    for i in 0..n {
        if let Some(&bad) = graph.neighbors(i).iter().find(|&&j| j >= n) {
            return Err(SaliencyError::RegionIndex {
                what: "neighbor list",
                index: bad,
                count: n,
            });
        }
    }
    Ok(())
}

/// Reject border sets that reference regions outside `0..count`.
pub fn validate_indices(what: &'static str, indices: &[usize], count: usize) -> SaliencyResult<()> {
    match indices.iter().find(|&&i| i >= count) {
        Some(&index) => Err(SaliencyError::RegionIndex { what, index, count }),
        None => Ok(()),
    }
}
