//! Region bookkeeping around the saliency automaton.
//!
//! A [`RegionPartition`] owns the label map produced by an external
//! superpixel segmentation and derives everything the automaton consumes:
//! per-region pixel lists, 4-connected neighbour lists, the set of regions
//! touching the image frame, and mean colour features. It also paints the
//! refined per-region values back onto pixels.

mod accumulator;
pub mod features;
mod graph;
mod partition;

pub use features::{feature_distance, normalized_lab};
pub use graph::{validate_graph, validate_indices, RegionGraph};
pub use partition::{Region, RegionPartition};

#[cfg(test)]
mod tests;
