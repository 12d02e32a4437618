//! Influence matrix between neighbouring regions.
//!
//! Algorithm
//! 1. Colour distance for every unordered neighbour pair, stored symmetrically.
//! 2. Min-max normalization of the whole matrix into `[0, 1]`.
//! 3. `exp(scale * d)` on adjacent pairs; everything else stays exactly zero.
//! 4. Row normalization; rows without neighbours stay zero.

use super::normalize::normalize_unit;
use super::params::InfluenceParams;
use crate::error::{SaliencyError, SaliencyResult};
use crate::regions::{feature_distance, validate_graph, RegionGraph};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

/// Row-normalized N×N influence matrix `F`.
///
/// Entries lie in `[0, 1]`; each row sums to 1, or to 0 for a region without
/// neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceMatrix {
    matrix: DMatrix<f32>,
}

impl InfluenceMatrix {
    /// Wrap a precomputed matrix; it must be square.
    pub fn from_matrix(matrix: DMatrix<f32>) -> SaliencyResult<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(SaliencyError::MatrixShape {
                what: "influence",
                rows: matrix.nrows(),
                cols: matrix.ncols(),
                expected: matrix.nrows(),
            });
        }
        Ok(Self { matrix })
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn as_matrix(&self) -> &DMatrix<f32> {
        &self.matrix
    }

    pub fn into_matrix(self) -> DMatrix<f32> {
        self.matrix
    }

    /// Largest entry of row `i`, 0 for an isolated region.
    pub fn row_max(&self, i: usize) -> f32 {
        self.matrix.row(i).iter().copied().fold(0.0, f32::max)
    }

    /// `F · v`: influence-weighted neighbour average for every region.
    pub fn apply(&self, v: &DVector<f32>) -> DVector<f32> {
        &self.matrix * v
    }
}

/// Unordered neighbour pairs `(j, k)` with `k > j` and their colour distance.
///
/// Rows are independent, so they are evaluated in parallel.
fn neighbor_distances<G: RegionGraph + Sync + ?Sized>(graph: &G) -> Vec<(usize, usize, f32)> {
    (0..graph.region_count())
        .into_par_iter()
        .flat_map_iter(|j| {
            let fj = graph.feature(j);
            graph
                .neighbors(j)
                .iter()
                .copied()
                .filter(move |&k| k > j)
                .map(move |k| (j, k, feature_distance(&fj, &graph.feature(k))))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Symmetric matrix of raw colour distances between neighbours (step 1).
pub fn raw_distances<G: RegionGraph + Sync + ?Sized>(graph: &G) -> SaliencyResult<DMatrix<f32>> {
    validate_graph(graph)?;
    let n = graph.region_count();
    let mut m = DMatrix::zeros(n, n);
    for (j, k, d) in neighbor_distances(graph) {
        m[(j, k)] = d;
        m[(k, j)] = d;
    }
    Ok(m)
}

/// Build the row-normalized influence matrix for `graph`.
pub fn build_influence<G: RegionGraph + Sync + ?Sized>(
    graph: &G,
    params: &InfluenceParams,
) -> SaliencyResult<InfluenceMatrix> {
    validate_graph(graph)?;
    let n = graph.region_count();
    let pairs = neighbor_distances(graph);

    let mut dist = DMatrix::zeros(n, n);
    for &(j, k, d) in &pairs {
        dist[(j, k)] = d;
        dist[(k, j)] = d;
    }
    normalize_unit(dist.as_mut_slice());

    // Only adjacent pairs receive exp(scale * d); exp(0) = 1 elsewhere would
    // couple regions that never touch.
    let mut matrix = DMatrix::zeros(n, n);
    for &(j, k, _) in &pairs {
        let closeness = (params.distance_scale * dist[(j, k)]).exp();
        matrix[(j, k)] = closeness;
        matrix[(k, j)] = closeness;
    }

    let mut isolated = 0usize;
    for i in 0..n {
        let sum: f32 = matrix.row(i).sum();
        if sum > 0.0 {
            for v in matrix.row_mut(i).iter_mut() {
                *v /= sum;
            }
        } else {
            isolated += 1;
        }
    }
    if isolated > 0 {
        warn!("influence: {isolated} of {n} regions have no neighbours; their rows stay zero");
    }
    debug!("influence: {} regions, {} neighbour pairs", n, pairs.len());

    Ok(InfluenceMatrix { matrix })
}
