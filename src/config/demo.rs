use crate::automata::AutomataParams;
use crate::error::{SaliencyError, SaliencyResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SaliencyDemoConfig {
    /// Colour image the region features are computed from.
    pub input: PathBuf,
    #[serde(default)]
    pub regions: RegionSourceConfig,
    #[serde(default)]
    pub prior: PriorConfig,
    #[serde(default)]
    pub automata: AutomataParams,
    pub output: SaliencyOutputConfig,
}

/// Where the region partition comes from.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegionSourceConfig {
    /// Grayscale label map (8 or 16 bit); each gray level is one region.
    pub labels: Option<PathBuf>,
    /// Tile size used when no label map is given.
    pub block_size: usize,
}

impl Default for RegionSourceConfig {
    fn default() -> Self {
        Self {
            labels: None,
            block_size: 16,
        }
    }
}

/// Per-pixel prior fed into the automaton.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PriorConfig {
    /// Grayscale prior map; overrides the centre prior.
    pub image: Option<PathBuf>,
    /// Width of the Gaussian centre prior relative to the image diagonal.
    pub center_sigma: f32,
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            image: None,
            center_sigma: 0.25,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaliencyOutputConfig {
    pub saliency_image: PathBuf,
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> SaliencyResult<SaliencyDemoConfig> {
    let data = fs::read_to_string(path).map_err(|e| SaliencyError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_config(&data).map_err(|e| match e {
        SaliencyError::Config { message, .. } => SaliencyError::Config {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

pub fn parse_config(json: &str) -> SaliencyResult<SaliencyDemoConfig> {
    serde_json::from_str(json).map_err(|e| SaliencyError::Config {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(
            r#"{ "input": "in.png", "output": { "saliency_image": "out/sal.png" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.regions.block_size, 16);
        assert!(cfg.regions.labels.is_none());
        assert_eq!(cfg.prior.center_sigma, 0.25);
        assert_eq!(cfg.automata, AutomataParams::default());
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = parse_config(
            r#"{
                "input": "in.png",
                "regions": { "labels": "labels.png" },
                "automata": { "refine": { "foreground_threshold": 0.9 } },
                "output": { "saliency_image": "sal.png", "report_json": "r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.regions.labels, Some(PathBuf::from("labels.png")));
        assert_eq!(cfg.automata.refine.foreground_threshold, 0.9);
        assert_eq!(cfg.automata.refine.convergence_iterations, 10);
    }

    #[test]
    fn missing_output_is_a_config_error() {
        let err = parse_config(r#"{ "input": "in.png" }"#).unwrap_err();
        assert!(matches!(err, SaliencyError::Config { .. }));
    }
}
