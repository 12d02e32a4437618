#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod automata;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod regions;

// Tooling around the core: JSON configs for the demo binary.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: automaton + report.
pub use crate::automata::{AutomataParams, SaliencyAutomaton};
pub use crate::diagnostics::{RefineTrace, SaliencyReport};
pub use crate::error::{SaliencyError, SaliencyResult};

// Region bookkeeping consumed by the automaton.
pub use crate::regions::{RegionGraph, RegionPartition};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use region_saliency::prelude::*;
///
/// # fn main() -> Result<(), SaliencyError> {
/// let (w, h) = (64usize, 48usize);
/// let partition = RegionPartition::from_blocks(w, h, 8)?;
/// let prior = ImageF32::from_fn(w, h, |x, _| x as f32 / w as f32);
///
/// let automaton = SaliencyAutomaton::new(AutomataParams::default());
/// let report = automaton.run(&prior, &partition)?;
/// println!("regions={} total_ms={:.3}", report.region_values.len(), report.timing.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageF32;
    pub use crate::{AutomataParams, RegionPartition, SaliencyAutomaton, SaliencyError};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Component builders and the refiner.
    pub use crate::automata::{
        build_coherence, build_influence, diffuse_step, initial_signal, raw_distances,
        suppress_border, CoherenceMatrix, InfluenceMatrix, InfluenceParams, RefineParams,
        Refiner,
    };

    // Structured diagnostics types.
    pub use crate::diagnostics::{RefineStage, StageKind, StageTiming, TimingBreakdown};
}
