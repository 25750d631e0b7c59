use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::system::process::DEFAULT_TOP_PROCESSES;
use crate::system::sampler::{DEFAULT_MAX_DISKS, SampleLimits};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub gpu: GpuConfig,
    pub thresholds: ThresholdsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn sample_limits(&self) -> SampleLimits {
        SampleLimits {
            top_processes: self.general.top_processes,
            max_disks: self.general.max_disks,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub top_processes: usize,
    pub max_disks: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            top_processes: DEFAULT_TOP_PROCESSES,
            max_disks: DEFAULT_MAX_DISKS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub enabled: bool,
    pub nvidia_smi: String,
}

impl Default for GpuConfig {
    fn default() -> Self {
        GpuConfig {
            enabled: true,
            nvidia_smi: "nvidia-smi".to_string(),
        }
    }
}

/// Percentages above `warn` render yellow, above `crit` red.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Threshold {
    pub warn: f64,
    pub crit: f64,
}

impl Threshold {
    pub const fn new(warn: f64, crit: f64) -> Self {
        Threshold { warn, crit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub cpu: Threshold,
    pub memory: Threshold,
    pub swap: Threshold,
    pub disk: Threshold,
    pub temperature: Threshold,
    pub gpu_utilization: Threshold,
    pub process_cpu: Threshold,
    pub process_memory: Threshold,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        ThresholdsConfig {
            cpu: Threshold::new(60.0, 80.0),
            memory: Threshold::new(60.0, 80.0),
            swap: Threshold::new(20.0, 50.0),
            disk: Threshold::new(75.0, 90.0),
            temperature: Threshold::new(65.0, 80.0),
            gpu_utilization: Threshold::new(70.0, 90.0),
            process_cpu: Threshold::new(20.0, 50.0),
            process_memory: Threshold::new(10.0, 20.0),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysoverview").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
