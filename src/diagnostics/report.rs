use super::{RefineTrace, TimingBreakdown};
use crate::image::ImageF32;
use serde::Serialize;

/// Result of a full automaton run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaliencyReport {
    pub width: usize,
    pub height: usize,
    /// Mean prior signal per region, before any normalization.
    pub initial_values: Vec<f32>,
    /// Refined saliency per region, in `[0, 1]`.
    pub region_values: Vec<f32>,
    pub trace: RefineTrace,
    pub timing: TimingBreakdown,
    /// Per-pixel saliency; each pixel carries its region's value.
    #[serde(skip)]
    pub saliency: ImageF32,
}
