use region_saliency::config::demo::{self, PriorConfig, SaliencyDemoConfig};
use region_saliency::error::{SaliencyError, SaliencyResult};
use region_saliency::image::io::{
    load_grayscale_f32, load_label_map, load_rgb_image, save_grayscale_f32, write_json_file,
};
use region_saliency::image::ImageF32;
use region_saliency::{RegionPartition, SaliencyAutomaton};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> SaliencyResult<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = demo::load_config(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;
    let (w, h) = (rgb.width(), rgb.height());
    let partition = build_partition(&config, w, h)?.with_features(&rgb.as_view())?;
    let prior = build_prior(&config.prior, w, h)?;

    let automaton = SaliencyAutomaton::new(config.automata.clone());
    let report = automaton.run(&prior, &partition)?;

    save_grayscale_f32(&report.saliency, &config.output.saliency_image)?;
    println!(
        "Saved saliency map for {} regions ({} on the border) to {}",
        report.trace.regions,
        report.trace.border_regions,
        config.output.saliency_image.display()
    );
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    println!("total_ms={:.3}", report.timing.total_ms);
    Ok(())
}

fn build_partition(
    config: &SaliencyDemoConfig,
    w: usize,
    h: usize,
) -> SaliencyResult<RegionPartition> {
    match &config.regions.labels {
        Some(path) => {
            let map = load_label_map(path)?;
            if map.width != w || map.height != h {
                return Err(SaliencyError::SignalDimensions {
                    got_w: map.width,
                    got_h: map.height,
                    want_w: w,
                    want_h: h,
                });
            }
            RegionPartition::from_labels(w, h, &map.labels)
        }
        None => RegionPartition::from_blocks(w, h, config.regions.block_size),
    }
}

fn build_prior(config: &PriorConfig, w: usize, h: usize) -> SaliencyResult<ImageF32> {
    match &config.image {
        Some(path) => load_grayscale_f32(path),
        None => Ok(center_prior(w, h, config.center_sigma)),
    }
}

/// Gaussian fall-off from the image centre, `sigma` relative to the diagonal.
fn center_prior(w: usize, h: usize, sigma: f32) -> ImageF32 {
    let cx = (w as f32 - 1.0) * 0.5;
    let cy = (h as f32 - 1.0) * 0.5;
    let diag = ((w * w + h * h) as f32).sqrt().max(1.0);
    let s = (sigma * diag).max(1e-3);
    let denom = 2.0 * s * s;
    ImageF32::from_fn(w, h, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        (-(dx * dx + dy * dy) / denom).exp()
    })
}

fn usage() -> SaliencyError {
    SaliencyError::Config {
        path: String::new(),
        message: "Usage: saliency_demo <config.json>".to_string(),
    }
}
