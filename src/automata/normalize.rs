//! Min-max rescaling helpers shared by the influence builder and the refiner.
//!
//! A zero (or sub-epsilon) range leaves values unchanged apart from clamping
//! into the target interval, so a constant vector never turns into NaN.

const RANGE_EPS: f32 = f32::EPSILON;

/// Smallest and largest finite value, `None` if there is none.
pub fn finite_range(values: &[f32]) -> Option<(f32, f32)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linearly map `values` so the minimum lands on `lo` and the maximum on `hi`.
///
/// Returns `false` when the range is degenerate and the values were only
/// clamped into `[lo, hi]`.
pub fn normalize_into(values: &mut [f32], lo: f32, hi: f32) -> bool {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let Some((min, max)) = finite_range(values) else {
        return false;
    };
    let range = max - min;
    if range <= RANGE_EPS {
        for v in values.iter_mut() {
            *v = v.clamp(lo, hi);
        }
        return false;
    }
    let scale = (hi - lo) / range;
    for v in values.iter_mut() {
        // clamp absorbs rounding at the extremes
        *v = (lo + (*v - min) * scale).clamp(lo, hi);
    }
    true
}

/// Rescale into `[0, 1]`.
#[inline]
pub fn normalize_unit(values: &mut [f32]) -> bool {
    normalize_into(values, 0.0, 1.0)
}

/// Rescale into `[0, 1]` while keeping the entries at `held` at their
/// pre-rescale values.
///
/// The rescale itself sees the whole vector; only afterwards are the held
/// entries restored.
pub fn normalize_unit_holding(values: &mut [f32], held: &[usize]) -> bool {
    let saved: Vec<f32> = held.iter().map(|&i| values[i]).collect();
    let rescaled = normalize_unit(values);
    for (&i, v) in held.iter().zip(saved) {
        values[i] = v;
    }
    rescaled
}
