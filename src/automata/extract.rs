//! Region signal extraction: mean pixel signal per region.

use crate::error::{SaliencyError, SaliencyResult};
use crate::image::{ImageF32, ImageView};
use crate::regions::RegionPartition;
use nalgebra::DVector;
use rayon::prelude::*;

/// Average `signal` over every region of `partition`.
///
/// Entry `i` of the result is the arithmetic mean of the signal over the
/// pixels of region `i`. The signal must have the partition's dimensions and
/// hold only finite values.
pub fn initial_signal(
    signal: &ImageF32,
    partition: &RegionPartition,
) -> SaliencyResult<DVector<f32>> {
    partition.check_dimensions(signal.width(), signal.height())?;
    if signal.len() != partition.width() * partition.height() {
        return Err(SaliencyError::BufferLength {
            got: signal.len(),
            expected: partition.width() * partition.height(),
        });
    }
    if let Some(index) = signal.data.iter().position(|v| !v.is_finite()) {
        return Err(SaliencyError::NonFiniteSignal {
            what: "signal field",
            index,
        });
    }
    if let Some(empty) = partition.regions().iter().position(|r| r.pixels.is_empty()) {
        return Err(SaliencyError::EmptyRegion(empty));
    }

    let data = &signal.data;
    let means: Vec<f32> = partition
        .regions()
        .par_iter()
        .map(|region| {
            let sum: f64 = region.pixels.iter().map(|&p| data[p] as f64).sum();
            (sum / region.size() as f64) as f32
        })
        .collect();
    Ok(DVector::from_vec(means))
}
