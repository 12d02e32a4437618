//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Carries the per-pixel signal fed into region extraction and the saliency
//! map painted back from the refined region vector.
use crate::error::{SaliencyError, SaliencyResult};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a buffer of size `w × h` where every pixel equals `value`.
    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer, rejecting a length mismatch.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> SaliencyResult<Self> {
        if data.len() != w * h {
            return Err(SaliencyError::BufferLength {
                got: data.len(),
                expected: w * h,
            });
        }
        Ok(Self { w, h, data })
    }

    /// Build an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    /// Total pixel count.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Smallest and largest pixel value, `None` for an empty image.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn from_vec_rejects_length_mismatch() {
        let err = ImageF32::from_vec(3, 2, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            SaliencyError::BufferLength {
                got: 5,
                expected: 6
            }
        ));
    }

    #[test]
    fn from_fn_is_row_major() {
        let img = ImageF32::from_fn(3, 2, |x, y| (y * 10 + x) as f32);
        assert_eq!(img.row(1), &[10.0, 11.0, 12.0]);
        assert_eq!(img.get(2, 0), 2.0);
        assert_eq!(img.min_max(), Some((0.0, 12.0)));
    }
}
