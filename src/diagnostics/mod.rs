//! Diagnostics data model returned by the automaton and the demo tooling.
//!
//! `SaliencyReport` is the main entry point: it bundles the refined region
//! values with a `RefineTrace` describing what each refinement stage did and
//! a `TimingBreakdown` of the pipeline.

pub mod refine;
pub mod report;
pub mod timing;

pub use refine::{RefineStage, RefineTrace, StageKind};
pub use report::SaliencyReport;
pub use timing::{StageTiming, TimingBreakdown};
