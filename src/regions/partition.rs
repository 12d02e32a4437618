use super::accumulator::ColorAccumulator;
use super::features::normalized_lab;
use super::graph::RegionGraph;
use crate::error::{SaliencyError, SaliencyResult};
use crate::image::{ImageF32, ImageView, RgbImage8};
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;

/// One region (superpixel) of the partition.
#[derive(Clone, Debug, Default)]
pub struct Region {
    /// Linear pixel indices (`y * width + x`) owned by the region.
    pub pixels: Vec<usize>,
    /// Mean normalized Lab colour.
    pub feature: [f32; 3],
    /// Sorted, deduplicated indices of 4-connected neighbouring regions.
    pub neighbors: Vec<usize>,
}

impl Region {
    /// Number of pixels owned by the region.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }
}

/// Partition of an image into labeled regions.
///
/// Invariants upheld by every constructor: labels are compact (`0..N`), every
/// region owns at least one pixel, pixel sets are disjoint and cover the
/// `width × height` grid.
#[derive(Clone, Debug)]
pub struct RegionPartition {
    width: usize,
    height: usize,
    labels: Vec<usize>,
    regions: Vec<Region>,
}

impl RegionPartition {
    /// Build a partition from a per-pixel label map.
    ///
    /// Labels may be arbitrary; they are compacted to `0..N` in first-seen
    /// (row-major) order. Neighbour lists are computed immediately, colour
    /// features start at zero until [`Self::compute_features`] or
    /// [`Self::set_features`] is called.
    pub fn from_labels(width: usize, height: usize, labels: &[u32]) -> SaliencyResult<Self> {
        if labels.len() != width * height {
            return Err(SaliencyError::BufferLength {
                got: labels.len(),
                expected: width * height,
            });
        }
        if labels.is_empty() {
            return Err(SaliencyError::EmptyPartition);
        }

        let mut remap: HashMap<u32, usize> = HashMap::new();
        let mut compact = Vec::with_capacity(labels.len());
        let mut regions: Vec<Region> = Vec::new();
        for (idx, &raw) in labels.iter().enumerate() {
            let next = remap.len();
            let label = *remap.entry(raw).or_insert(next);
            if label == regions.len() {
                regions.push(Region::default());
            }
            regions[label].pixels.push(idx);
            compact.push(label);
        }

        let mut partition = Self {
            width,
            height,
            labels: compact,
            regions,
        };
        partition.refresh_neighbors();
        debug!(
            "RegionPartition::from_labels {}x{} -> {} regions",
            width,
            height,
            partition.len()
        );
        Ok(partition)
    }

    /// Regular grid of `block × block` tiles; the last row/column of tiles is
    /// clipped to the image frame.
    pub fn from_blocks(width: usize, height: usize, block: usize) -> SaliencyResult<Self> {
        let block = block.max(1);
        let cols = width.div_ceil(block);
        let mut labels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                labels.push(((y / block) * cols + x / block) as u32);
            }
        }
        Self::from_labels(width, height, &labels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of regions `N`.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, i: usize) -> &Region {
        &self.regions[i]
    }

    /// Compact label of the pixel at (x, y).
    pub fn label_at(&self, x: usize, y: usize) -> usize {
        self.labels[y * self.width + x]
    }

    /// Pixel coordinates `(x, y)` of region `i`.
    pub fn coords(&self, i: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.regions[i].pixels.iter().map(move |&p| (p % w, p / w))
    }

    /// Recompute every region's neighbour list from the label map using
    /// 4-connectivity. Lists are symmetric, sorted and free of duplicates.
    pub fn refresh_neighbors(&mut self) {
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); self.regions.len()];
        let w = self.width;
        for y in 0..self.height {
            for x in 0..w {
                let a = self.labels[y * w + x];
                if x + 1 < w {
                    let b = self.labels[y * w + x + 1];
                    if a != b {
                        neighbors[a].push(b);
                        neighbors[b].push(a);
                    }
                }
                if y + 1 < self.height {
                    let b = self.labels[(y + 1) * w + x];
                    if a != b {
                        neighbors[a].push(b);
                        neighbors[b].push(a);
                    }
                }
            }
        }
        for (region, mut list) in self.regions.iter_mut().zip(neighbors) {
            list.sort_unstable();
            list.dedup();
            region.neighbors = list;
        }
    }

    /// Sorted indices of regions owning at least one pixel on the image frame.
    pub fn border_regions(&self) -> Vec<usize> {
        let mut on_border = vec![false; self.regions.len()];
        let (w, h) = (self.width, self.height);
        for x in 0..w {
            on_border[self.labels[x]] = true;
            on_border[self.labels[(h - 1) * w + x]] = true;
        }
        for y in 0..h {
            on_border[self.labels[y * w]] = true;
            on_border[self.labels[y * w + w - 1]] = true;
        }
        on_border
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Compute each region's mean normalized Lab colour from an RGB image of
    /// the same size.
    pub fn compute_features(&mut self, rgb: &RgbImage8<'_>) -> SaliencyResult<()> {
        self.check_dimensions(rgb.width(), rgb.height())?;
        let expected = self.width * self.height;
        if rgb.data.len() != expected {
            return Err(SaliencyError::BufferLength {
                got: rgb.data.len(),
                expected,
            });
        }
        let data = rgb.data;
        self.regions.par_iter_mut().for_each(|region| {
            let mut acc = ColorAccumulator::default();
            for &p in &region.pixels {
                acc.push(normalized_lab(data[p]));
            }
            region.feature = acc.mean();
        });
        Ok(())
    }

    /// Builder form of [`Self::compute_features`].
    pub fn with_features(mut self, rgb: &RgbImage8<'_>) -> SaliencyResult<Self> {
        self.compute_features(rgb)?;
        Ok(self)
    }

    /// Install externally computed features, one per region.
    pub fn set_features(&mut self, features: &[[f32; 3]]) -> SaliencyResult<()> {
        if features.len() != self.regions.len() {
            return Err(SaliencyError::SignalLength {
                got: features.len(),
                expected: self.regions.len(),
            });
        }
        for (region, f) in self.regions.iter_mut().zip(features) {
            region.feature = *f;
        }
        Ok(())
    }

    /// Check the partition invariants: every region non-empty, pixel sets
    /// covering the grid exactly once, neighbour indices in range.
    pub fn validate(&self) -> SaliencyResult<()> {
        let n = self.regions.len();
        if n == 0 {
            return Err(SaliencyError::EmptyPartition);
        }
        let mut seen = vec![false; self.width * self.height];
        for (i, region) in self.regions.iter().enumerate() {
            if region.pixels.is_empty() {
                return Err(SaliencyError::EmptyRegion(i));
            }
            for &p in &region.pixels {
                if p >= seen.len() || std::mem::replace(&mut seen[p], true) {
                    return Err(SaliencyError::OverlappingPixel(p));
                }
            }
            if let Some(&bad) = region.neighbors.iter().find(|&&j| j >= n || j == i) {
                return Err(SaliencyError::RegionIndex {
                    what: "neighbor list",
                    index: bad,
                    count: n,
                });
            }
        }
        let uncovered = seen.iter().filter(|&&s| !s).count();
        if uncovered > 0 {
            return Err(SaliencyError::UncoveredPixels(uncovered));
        }
        Ok(())
    }

    /// Paint per-region values onto a `width × height` image.
    pub fn scatter(&self, values: &[f32]) -> SaliencyResult<ImageF32> {
        if values.len() != self.regions.len() {
            return Err(SaliencyError::SignalLength {
                got: values.len(),
                expected: self.regions.len(),
            });
        }
        let data = self.labels.iter().map(|&l| values[l]).collect();
        ImageF32::from_vec(self.width, self.height, data)
    }

    pub(crate) fn check_dimensions(&self, w: usize, h: usize) -> SaliencyResult<()> {
        if w != self.width || h != self.height {
            return Err(SaliencyError::SignalDimensions {
                got_w: w,
                got_h: h,
                want_w: self.width,
                want_h: self.height,
            });
        }
        Ok(())
    }
}

impl RegionGraph for RegionPartition {
    fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn feature(&self, i: usize) -> [f32; 3] {
        self.regions[i].feature
    }

    fn neighbors(&self, i: usize) -> &[usize] {
        &self.regions[i].neighbors
    }
}
