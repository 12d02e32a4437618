use region_saliency::image::ImageF32;

pub const BACKGROUND: [u8; 3] = [120, 120, 120];
pub const OBJECT: [u8; 3] = [200, 40, 40];

/// Grey canvas with a solid red square covering `[lo, hi)` on both axes.
pub fn square_on_canvas(size: usize, lo: usize, hi: usize) -> Vec<[u8; 3]> {
    assert!(lo < hi && hi <= size, "square must fit inside the canvas");
    let mut img = vec![BACKGROUND; size * size];
    for y in lo..hi {
        for x in lo..hi {
            img[y * size + x] = OBJECT;
        }
    }
    img
}

/// Gaussian centre prior, `sigma` relative to the image diagonal.
pub fn center_prior(w: usize, h: usize, sigma: f32) -> ImageF32 {
    let cx = (w as f32 - 1.0) * 0.5;
    let cy = (h as f32 - 1.0) * 0.5;
    let s = sigma * ((w * w + h * h) as f32).sqrt();
    ImageF32::from_fn(w, h, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        (-(dx * dx + dy * dy) / (2.0 * s * s)).exp()
    })
}

/// Deterministic irregular labels: 5-pixel bands cut into runs whose length
/// varies per band, giving uneven region shapes without a segmentation step.
pub fn irregular_labels(w: usize, h: usize) -> Vec<u32> {
    let mut labels = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let band = y / 5;
            let run = 3 + (band * 7 + 3) % 6;
            labels.push((band * 100 + x / run) as u32);
        }
    }
    labels
}
