//! Parameter types configuring the saliency automaton.
//!
//! Every default is an empirically tuned value; the named constants below are
//! the single source of those values.
//! Configuration files only need to mention the knobs they override.

use serde::{Deserialize, Serialize};

/// Scale applied to normalized colour distance before exponentiation.
pub const DISTANCE_SCALE: f32 = -10.0;
/// Lower bound `b` of the coherence range `[b, a + b]`.
pub const COHERENCE_MIN: f32 = 0.2;
/// Width `a` of the coherence range `[b, a + b]`.
pub const COHERENCE_SPAN: f32 = 0.6;
/// Amount subtracted from border regions before each stage-1/2 update.
pub const BORDER_SUPPRESSION: f32 = 0.6;
/// Floor applied after border suppression; suppressed values stay positive.
pub const SUPPRESSION_FLOOR: f32 = 0.001;
/// Value above which a region counts as confident foreground.
pub const FOREGROUND_THRESHOLD: f32 = 0.93;
/// Foreground protection applies while the confident fraction is below this.
pub const FOREGROUND_RATIO: f32 = 0.02;
pub const BORDER_ITERATIONS: usize = 5;
pub const FOREGROUND_ITERATIONS: usize = 5;
pub const CONVERGENCE_ITERATIONS: usize = 10;

/// Knobs for the influence and coherence matrices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceParams {
    /// Negative scale turning normalized distance into `exp(scale * d)`.
    pub distance_scale: f32,
    /// Lower bound of the coherence diagonal.
    pub coherence_min: f32,
    /// Width of the coherence range; the upper bound is `min + span`.
    pub coherence_span: f32,
}

impl Default for InfluenceParams {
    fn default() -> Self {
        Self {
            distance_scale: DISTANCE_SCALE,
            coherence_min: COHERENCE_MIN,
            coherence_span: COHERENCE_SPAN,
        }
    }
}

impl InfluenceParams {
    /// Upper bound of the coherence diagonal.
    pub fn coherence_max(&self) -> f32 {
        self.coherence_min + self.coherence_span
    }
}

/// Three-stage refinement schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineParams {
    /// Stage 1 iterations (border suppression only).
    pub border_iterations: usize,
    /// Stage 2 iterations (border suppression + foreground-ratio control).
    pub foreground_iterations: usize,
    /// Stage 3 iterations (plain update + rescale).
    pub convergence_iterations: usize,
    pub border_suppression: f32,
    pub suppression_floor: f32,
    pub foreground_threshold: f32,
    /// Fraction of all regions, e.g. `0.02` for 2%.
    pub foreground_ratio: f32,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            border_iterations: BORDER_ITERATIONS,
            foreground_iterations: FOREGROUND_ITERATIONS,
            convergence_iterations: CONVERGENCE_ITERATIONS,
            border_suppression: BORDER_SUPPRESSION,
            suppression_floor: SUPPRESSION_FLOOR,
            foreground_threshold: FOREGROUND_THRESHOLD,
            foreground_ratio: FOREGROUND_RATIO,
        }
    }
}

/// Automaton-wide parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomataParams {
    pub influence: InfluenceParams,
    pub refine: RefineParams,
}
