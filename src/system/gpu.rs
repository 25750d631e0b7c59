use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use serde::Serialize;

use crate::config::GpuConfig;

const QUERY_FIELDS: &str =
    "name,utilization.gpu,memory.used,memory.total,temperature.gpu,power.draw,power.limit";
const FIELD_COUNT: usize = 7;

/// Per-device counters; `None` wherever the driver reports no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuDevice {
    pub name: String,
    pub utilization_percent: Option<f32>,
    pub memory_used_mb: Option<u64>,
    pub memory_total_mb: Option<u64>,
    pub temperature_c: Option<f32>,
    pub power_watts: Option<f32>,
    pub power_limit_watts: Option<f32>,
}

#[derive(Debug)]
pub enum GpuError {
    Spawn(io::Error),
    Exit { code: Option<i32>, stderr: String },
    Parse(String),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::Spawn(e) => write!(f, "failed to run nvidia-smi: {e}"),
            GpuError::Exit { code, stderr } => match code {
                Some(code) => write!(f, "nvidia-smi exited with status {code}: {stderr}"),
                None => write!(f, "nvidia-smi terminated by signal: {stderr}"),
            },
            GpuError::Parse(line) => write!(f, "unexpected nvidia-smi output: {line}"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

/// A source of GPU device counters.
pub trait GpuProvider {
    fn label(&self) -> &'static str;
    fn devices(&mut self) -> Result<Vec<GpuDevice>, GpuError>;
}

/// Used when no GPU management tool is available; always reports zero devices.
#[derive(Debug, Default)]
pub struct NoGpu;

impl GpuProvider for NoGpu {
    fn label(&self) -> &'static str {
        "none"
    }

    fn devices(&mut self) -> Result<Vec<GpuDevice>, GpuError> {
        Ok(Vec::new())
    }
}

/// NVIDIA devices queried through `nvidia-smi` in CSV mode.
#[derive(Debug)]
pub struct NvidiaSmi {
    program: PathBuf,
}

impl NvidiaSmi {
    /// Runs one query and keeps the provider only if at least one device answers.
    pub fn probe(program: impl Into<PathBuf>) -> Result<(Self, Vec<GpuDevice>), GpuError> {
        let mut provider = NvidiaSmi {
            program: program.into(),
        };
        let devices = provider.devices()?;
        if devices.is_empty() {
            return Err(GpuError::Parse("no devices listed".to_string()));
        }
        Ok((provider, devices))
    }
}

impl GpuProvider for NvidiaSmi {
    fn label(&self) -> &'static str {
        "nvidia-smi"
    }

    fn devices(&mut self) -> Result<Vec<GpuDevice>, GpuError> {
        let output = Command::new(&self.program)
            .arg(format!("--query-gpu={QUERY_FIELDS}"))
            .arg("--format=csv,noheader,nounits")
            .output()
            .map_err(GpuError::Spawn)?;
        if !output.status.success() {
            return Err(GpuError::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_query_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Picks the provider for the whole run; failures degrade to [`NoGpu`].
pub fn detect(config: &GpuConfig) -> Box<dyn GpuProvider> {
    if !config.enabled {
        tracing::info!("gpu collection disabled by configuration");
        return Box::new(NoGpu);
    }
    match NvidiaSmi::probe(&config.nvidia_smi) {
        Ok((provider, devices)) => {
            tracing::info!(count = devices.len(), "nvidia gpus detected");
            Box::new(provider)
        }
        Err(e) => {
            tracing::info!(error = %e, "no gpu provider available");
            Box::new(NoGpu)
        }
    }
}

pub fn parse_query_output(stdout: &str) -> Result<Vec<GpuDevice>, GpuError> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_query_line)
        .collect()
}

fn parse_query_line(line: &str) -> Result<GpuDevice, GpuError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(GpuError::Parse(line.to_string()));
    }
    Ok(GpuDevice {
        name: fields[0].to_string(),
        utilization_percent: fields[1].parse().ok(),
        memory_used_mb: parse_mib(fields[2]),
        memory_total_mb: parse_mib(fields[3]),
        temperature_c: fields[4].parse().ok(),
        power_watts: fields[5].parse().ok(),
        power_limit_watts: fields[6].parse().ok(),
    })
}

// nvidia-smi reports MiB as integers, but some drivers print a fraction.
fn parse_mib(field: &str) -> Option<u64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}
