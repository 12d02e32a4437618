//! Per-region coherence (self-trust) derived from the influence matrix.
//!
//! A region with one dominant neighbour has a large row maximum, hence a small
//! reciprocal and little self-trust; a region whose influence is spread thin
//! keeps more of its own value. Reciprocals are min-max normalized jointly
//! into `[min, min + span]`.

use super::influence::InfluenceMatrix;
use super::normalize::normalize_into;
use super::params::InfluenceParams;
use nalgebra::{DMatrix, DVector};

/// Diagonal N×N coherence matrix `C`, stored as its diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct CoherenceMatrix {
    diagonal: DVector<f32>,
}

impl CoherenceMatrix {
    pub fn from_diagonal(diagonal: DVector<f32>) -> Self {
        Self { diagonal }
    }

    pub fn len(&self) -> usize {
        self.diagonal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagonal.is_empty()
    }

    pub fn diagonal(&self) -> &DVector<f32> {
        &self.diagonal
    }

    /// Dense N×N form with the coherence values on the diagonal.
    pub fn to_dense(&self) -> DMatrix<f32> {
        DMatrix::from_diagonal(&self.diagonal)
    }
}

/// Derive the coherence matrix from a row-normalized influence matrix.
///
/// Isolated regions (zero row maximum) take the upper bound: with nothing to
/// diffuse from, they trust themselves fully. When every connected region
/// has the same row maximum the reciprocals carry no spread and all of them
/// collapse onto the lower bound.
pub fn build_coherence(influence: &InfluenceMatrix, params: &InfluenceParams) -> CoherenceMatrix {
    let lo = params.coherence_min;
    let hi = params.coherence_max();
    let n = influence.len();

    let mut finite = Vec::with_capacity(n);
    let mut slots = Vec::with_capacity(n);
    for i in 0..n {
        let max = influence.row_max(i);
        if max > 0.0 {
            slots.push(Some(finite.len()));
            finite.push(1.0 / max);
        } else {
            slots.push(None);
        }
    }
    if !normalize_into(&mut finite, lo, hi) {
        finite.fill(lo.min(hi));
    }

    let diagonal = DVector::from_iterator(
        n,
        slots.into_iter().map(|slot| slot.map_or(hi, |k| finite[k])),
    );
    CoherenceMatrix { diagonal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::influence::build_influence;
    use crate::automata::test_graph::TestGraph;

    fn star() -> TestGraph {
        // hub 0 linked to 1..=3 at equal colour distance; leaves only see the hub
        TestGraph {
            features: vec![
                [0.5, 0.0, 0.0],
                [0.3, 0.0, 0.0],
                [0.7, 0.0, 0.0],
                [0.5, 0.2, 0.0],
            ],
            neighbors: vec![vec![1, 2, 3], vec![0], vec![0], vec![0]],
        }
    }

    #[test]
    fn diagonal_spans_target_range() {
        let params = InfluenceParams::default();
        let f = build_influence(&star(), &params).unwrap();
        let c = build_coherence(&f, &params);
        assert_eq!(c.len(), 4);
        assert!(c
            .diagonal()
            .iter()
            .all(|&v| (0.2 - 1e-6..=0.8 + 1e-6).contains(&v)));
        // the hub spreads its influence, leaves have a single neighbour
        assert!((c.diagonal()[0] - 0.8).abs() < 1e-6);
        assert!((c.diagonal()[1] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn dense_form_is_diagonal() {
        let params = InfluenceParams::default();
        let f = build_influence(&star(), &params).unwrap();
        let dense = build_coherence(&f, &params).to_dense();
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    assert_eq!(dense[(i, j)], 0.0);
                }
            }
        }
    }

    #[test]
    fn isolated_region_takes_upper_bound() {
        let params = InfluenceParams::default();
        let g = TestGraph {
            features: vec![[0.0; 3], [0.3, 0.0, 0.0], [0.6, 0.0, 0.0], [0.9, 0.0, 0.0]],
            neighbors: vec![vec![1], vec![0, 2], vec![1], vec![]],
        };
        let f = build_influence(&g, &params).unwrap();
        let c = build_coherence(&f, &params);
        assert!((c.diagonal()[3] - 0.8).abs() < 1e-6);
        assert!(c.diagonal().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn uniform_row_maxima_collapse_to_lower_bound() {
        let params = InfluenceParams::default();
        let pair = TestGraph {
            features: vec![[0.1, 0.0, 0.0], [0.9, 0.0, 0.0]],
            neighbors: vec![vec![1], vec![0]],
        };
        let f = build_influence(&pair, &params).unwrap();
        let c = build_coherence(&f, &params);
        assert_eq!(c.diagonal().as_slice(), &[0.2, 0.2]);

        // a lone isolated region still keeps the upper bound
        let g = TestGraph {
            features: vec![[0.1, 0.0, 0.0], [0.9, 0.0, 0.0], [0.5, 0.0, 0.0]],
            neighbors: vec![vec![1], vec![0], vec![]],
        };
        let f = build_influence(&g, &params).unwrap();
        let c = build_coherence(&f, &params);
        assert_eq!(c.diagonal().as_slice(), &[0.2, 0.2, 0.8]);
    }
}
