//! Hand-built adjacency lists for unit tests.
//!
//! Covers shapes a label map cannot produce, such as isolated regions.
use crate::regions::RegionGraph;

pub(crate) struct TestGraph {
    pub features: Vec<[f32; 3]>,
    pub neighbors: Vec<Vec<usize>>,
}

impl TestGraph {
    /// Path `0 - 1 - ... - (n-1)` with the given features.
    pub fn chain(features: Vec<[f32; 3]>) -> Self {
        let n = features.len();
        let neighbors = (0..n)
            .map(|i| {
                let mut list = Vec::new();
                if i > 0 {
                    list.push(i - 1);
                }
                if i + 1 < n {
                    list.push(i + 1);
                }
                list
            })
            .collect();
        Self {
            features,
            neighbors,
        }
    }
}

impl RegionGraph for TestGraph {
    fn region_count(&self) -> usize {
        self.features.len()
    }
    fn feature(&self, i: usize) -> [f32; 3] {
        self.features[i]
    }
    fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }
}
