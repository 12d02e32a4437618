use super::coherence::build_coherence;
use super::extract::initial_signal;
use super::influence::build_influence;
use super::params::AutomataParams;
use super::refine::Refiner;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{RefineTrace, SaliencyReport, TimingBreakdown};
use crate::error::SaliencyResult;
use crate::image::ImageF32;
use crate::regions::{RegionGraph, RegionPartition};
use log::debug;
use nalgebra::DVector;
use std::time::Instant;

/// Saliency automaton: prior signal + region partition → refined saliency.
///
/// Stateless apart from its parameters; a single instance can serve any
/// number of images.
#[derive(Clone, Debug, Default)]
pub struct SaliencyAutomaton {
    params: AutomataParams,
}

impl SaliencyAutomaton {
    pub fn new(params: AutomataParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AutomataParams {
        &self.params
    }

    /// Full run using the partition's own frame-touching regions as the
    /// border set.
    pub fn run(
        &self,
        signal: &ImageF32,
        partition: &RegionPartition,
    ) -> SaliencyResult<SaliencyReport> {
        let border = partition.border_regions();
        self.run_with_border(signal, partition, &border)
    }

    /// Full run with a caller-supplied border set: extract, build `F` and
    /// `C`, refine, scatter back to pixels.
    pub fn run_with_border(
        &self,
        signal: &ImageF32,
        partition: &RegionPartition,
        border: &[usize],
    ) -> SaliencyResult<SaliencyReport> {
        let total = Instant::now();
        let mut timing = TimingBreakdown::default();

        let start = Instant::now();
        let initial = initial_signal(signal, partition)?;
        let start = timing.lap("extract", start);

        let (refined, trace) =
            self.diffuse_timed(initial.clone(), partition, border, &mut timing, start)?;

        let start = Instant::now();
        let saliency = partition.scatter(refined.as_slice())?;
        timing.lap("scatter", start);
        timing.total_ms = elapsed_ms(total);

        debug!(
            "SaliencyAutomaton::run {}x{} regions={} total_ms={:.3}",
            partition.width(),
            partition.height(),
            partition.len(),
            timing.total_ms
        );

        Ok(SaliencyReport {
            width: partition.width(),
            height: partition.height(),
            initial_values: initial.iter().copied().collect(),
            region_values: refined.iter().copied().collect(),
            trace,
            timing,
            saliency,
        })
    }

    /// Region-level core: diffuse an initial vector over any region graph.
    pub fn diffuse<G: RegionGraph + Sync + ?Sized>(
        &self,
        initial: DVector<f32>,
        graph: &G,
        border: &[usize],
    ) -> SaliencyResult<(DVector<f32>, RefineTrace)> {
        let mut timing = TimingBreakdown::default();
        self.diffuse_timed(initial, graph, border, &mut timing, Instant::now())
    }

    fn diffuse_timed<G: RegionGraph + Sync + ?Sized>(
        &self,
        mut signal: DVector<f32>,
        graph: &G,
        border: &[usize],
        timing: &mut TimingBreakdown,
        start: Instant,
    ) -> SaliencyResult<(DVector<f32>, RefineTrace)> {
        let influence = build_influence(graph, &self.params.influence)?;
        let start = timing.lap("influence", start);
        let coherence = build_coherence(&influence, &self.params.influence);
        let start = timing.lap("coherence", start);

        let trace = Refiner::new(self.params.refine.clone()).refine(
            &mut signal,
            &influence,
            &coherence,
            border,
        )?;
        timing.lap("refine", start);
        Ok((signal, trace))
    }
}
