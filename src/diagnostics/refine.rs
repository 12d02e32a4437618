use serde::{Deserialize, Serialize};

/// The three refinement stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageKind {
    /// Border suppression with border values held across the rescale.
    BorderSuppression,
    /// Border suppression plus confident-foreground protection.
    ForegroundControl,
    /// Plain update with unconditional rescale.
    Convergence,
}

/// What one refinement stage did.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineStage {
    pub kind: StageKind,
    pub iterations: usize,
    /// Iterations in which confident foreground was held during a rescale.
    pub protected_iterations: usize,
    /// Largest number of confident-foreground regions held at once.
    pub max_protected: usize,
    /// Mean absolute change of the signal over the stage's last iteration.
    pub last_delta: f32,
    pub elapsed_ms: f64,
}

impl RefineStage {
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            iterations: 0,
            protected_iterations: 0,
            max_protected: 0,
            last_delta: 0.0,
            elapsed_ms: 0.0,
        }
    }
}

/// Per-stage trace of a refinement run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineTrace {
    pub regions: usize,
    pub border_regions: usize,
    /// Whether the initial normalization hit a zero-variance vector.
    pub flat_initial: bool,
    pub stages: Vec<RefineStage>,
}

impl RefineTrace {
    pub fn stage(&self, kind: StageKind) -> Option<&RefineStage> {
        self.stages.iter().find(|s| s.kind == kind)
    }

    pub fn total_iterations(&self) -> usize {
        self.stages.iter().map(|s| s.iterations).sum()
    }
}
