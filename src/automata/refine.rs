//! Three-stage iterative refinement of the region signal.
//!
//! Every iteration applies the cellular-automaton update
//!
//! ```text
//! v' = C·v + (I − C)·F·v
//! ```
//!
//! where `C` is the diagonal coherence matrix and `F` the row-normalized
//! influence matrix: each region blends its own value (weight `c_i`) with the
//! influence-weighted mean of its neighbours (weight `1 − c_i`).
//!
//! Schedule
//! 1. Border suppression: lower border regions, update, rescale with border
//!    values held.
//! 2. Foreground control: as stage 1, and while confident foreground is rare
//!    it is held across an extra rescale before the update.
//! 3. Convergence: update and rescale, nothing held.
//!
//! Iteration counts are fixed; there is no convergence test.

use super::coherence::CoherenceMatrix;
use super::influence::InfluenceMatrix;
use super::normalize::{normalize_unit, normalize_unit_holding};
use super::params::RefineParams;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{RefineStage, RefineTrace, StageKind};
use crate::error::{SaliencyError, SaliencyResult};
use crate::regions::validate_indices;
use log::{debug, warn};
use nalgebra::DVector;
use std::time::Instant;

/// One automaton update `C·v + (I − C)·F·v`, using the diagonal form of `C`.
pub fn diffuse_step(
    v: &DVector<f32>,
    influence: &InfluenceMatrix,
    coherence: &CoherenceMatrix,
) -> DVector<f32> {
    let neighbor_mean = influence.apply(v);
    let c = coherence.diagonal();
    DVector::from_iterator(
        v.len(),
        c.iter()
            .zip(v.iter())
            .zip(neighbor_mean.iter())
            .map(|((&ci, &vi), &fi)| ci * vi + (1.0 - ci) * fi),
    )
}

/// Lower every border region by `delta`, never below `floor`.
pub fn suppress_border(v: &mut DVector<f32>, border: &[usize], delta: f32, floor: f32) {
    for &i in border {
        v[i] = (v[i] - delta).max(floor);
    }
}

fn mean_abs_delta(a: &DVector<f32>, b: &DVector<f32>) -> f32 {
    if a.is_empty() {
        return 0.0;
    }
    (a - b).abs().sum() / a.len() as f32
}

/// Runs the fixed three-stage schedule over a region signal vector.
pub struct Refiner {
    params: RefineParams,
}

impl Refiner {
    pub fn new(params: RefineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RefineParams {
        &self.params
    }

    /// Refine `signal` in place. On return every entry lies in `[0, 1]`.
    ///
    /// `signal`, `influence` and `coherence` must agree on the region count,
    /// every signal entry must be finite and every border index must address
    /// a region.
    pub fn refine(
        &self,
        signal: &mut DVector<f32>,
        influence: &InfluenceMatrix,
        coherence: &CoherenceMatrix,
        border: &[usize],
    ) -> SaliencyResult<RefineTrace> {
        let n = signal.len();
        check_shapes(n, influence, coherence)?;
        if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
            return Err(SaliencyError::NonFiniteSignal {
                what: "region signal",
                index,
            });
        }
        validate_indices("border set", border, n)?;

        let mut trace = RefineTrace {
            regions: n,
            border_regions: border.len(),
            flat_initial: false,
            stages: Vec::with_capacity(3),
        };
        if n == 0 {
            return Ok(trace);
        }

        if !normalize_unit(signal.as_mut_slice()) {
            warn!("refine: initial signal has zero variance; diffusion keeps it flat");
            trace.flat_initial = true;
        }

        trace.stages.push(self.border_stage(signal, influence, coherence, border));
        trace
            .stages
            .push(self.foreground_stage(signal, influence, coherence, border));
        trace.stages.push(self.convergence_stage(signal, influence, coherence));

        debug!(
            "refine: {} regions ({} border) after {} iterations",
            n,
            border.len(),
            trace.total_iterations()
        );
        Ok(trace)
    }

    fn border_stage(
        &self,
        v: &mut DVector<f32>,
        influence: &InfluenceMatrix,
        coherence: &CoherenceMatrix,
        border: &[usize],
    ) -> RefineStage {
        let p = &self.params;
        let start = Instant::now();
        let mut stage = RefineStage::new(StageKind::BorderSuppression);
        for _ in 0..p.border_iterations {
            suppress_border(v, border, p.border_suppression, p.suppression_floor);
            let next = diffuse_step(v, influence, coherence);
            stage.last_delta = mean_abs_delta(&next, v);
            *v = next;
            normalize_unit_holding(v.as_mut_slice(), border);
            stage.iterations += 1;
        }
        stage.elapsed_ms = elapsed_ms(start);
        stage
    }

    fn foreground_stage(
        &self,
        v: &mut DVector<f32>,
        influence: &InfluenceMatrix,
        coherence: &CoherenceMatrix,
        border: &[usize],
    ) -> RefineStage {
        let p = &self.params;
        let start = Instant::now();
        let mut stage = RefineStage::new(StageKind::ForegroundControl);
        let limit = p.foreground_ratio * v.len() as f32;
        for _ in 0..p.foreground_iterations {
            suppress_border(v, border, p.border_suppression, p.suppression_floor);

            let confident: Vec<usize> = v
                .iter()
                .enumerate()
                .filter_map(|(i, &x)| (x > p.foreground_threshold).then_some(i))
                .collect();
            if (confident.len() as f32) < limit {
                normalize_unit_holding(v.as_mut_slice(), &confident);
                stage.protected_iterations += 1;
                stage.max_protected = stage.max_protected.max(confident.len());
            }

            let next = diffuse_step(v, influence, coherence);
            stage.last_delta = mean_abs_delta(&next, v);
            *v = next;
            normalize_unit_holding(v.as_mut_slice(), border);
            stage.iterations += 1;
        }
        stage.elapsed_ms = elapsed_ms(start);
        stage
    }

    fn convergence_stage(
        &self,
        v: &mut DVector<f32>,
        influence: &InfluenceMatrix,
        coherence: &CoherenceMatrix,
    ) -> RefineStage {
        let start = Instant::now();
        let mut stage = RefineStage::new(StageKind::Convergence);
        for _ in 0..self.params.convergence_iterations {
            let next = diffuse_step(v, influence, coherence);
            stage.last_delta = mean_abs_delta(&next, v);
            *v = next;
            normalize_unit(v.as_mut_slice());
            stage.iterations += 1;
        }
        stage.elapsed_ms = elapsed_ms(start);
        stage
    }
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new(RefineParams::default())
    }
}

fn check_shapes(
    n: usize,
    influence: &InfluenceMatrix,
    coherence: &CoherenceMatrix,
) -> SaliencyResult<()> {
    // `InfluenceMatrix` is square by construction
    if influence.len() != n {
        return Err(SaliencyError::SignalLength {
            got: n,
            expected: influence.len(),
        });
    }
    if coherence.len() != n {
        return Err(SaliencyError::MatrixShape {
            what: "coherence",
            rows: coherence.len(),
            cols: coherence.len(),
            expected: n,
        });
    }
    Ok(())
}
