//! Cellular-automata saliency diffusion over a region graph.
//!
//! Overview
//! - [`extract`] averages a per-pixel prior over each region.
//! - [`influence`] turns neighbour colour distances into a row-normalized
//!   influence matrix `F`.
//! - [`coherence`] derives the diagonal self-trust matrix `C` from `F`.
//! - [`refine`] runs the fixed three-stage update `v' = C·v + (I − C)·F·v`
//!   with border suppression and foreground-ratio control.
//! - `pipeline` chains the pieces into [`SaliencyAutomaton`].
//!
//! Everything is rebuilt per call; no state survives between runs.

pub mod coherence;
pub mod extract;
pub mod influence;
pub mod normalize;
pub mod params;
mod pipeline;
pub mod refine;

#[cfg(test)]
pub(crate) mod test_graph;

pub use coherence::{build_coherence, CoherenceMatrix};
pub use extract::initial_signal;
pub use influence::{build_influence, raw_distances, InfluenceMatrix};
pub use params::{AutomataParams, InfluenceParams, RefineParams};
pub use pipeline::SaliencyAutomaton;
pub use refine::{diffuse_step, suppress_border, Refiner};
