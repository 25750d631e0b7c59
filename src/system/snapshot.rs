use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::gpu::GpuDevice;
use super::network::NetworkStats;
use super::process::ProcessEntry;

/// One metric category's outcome for a tick.
///
/// Collection never aborts a tick; a category that could not be read is
/// carried as `Unavailable` with a short reason so the UI can show "N/A".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Metric<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Metric::Unavailable(reason.into())
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Available(v) => Metric::Available(f(v)),
            Metric::Unavailable(reason) => Metric::Unavailable(reason),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Metric<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Metric::Available(v),
            Err(e) => Metric::Unavailable(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostInfo {
    pub os: String,
    pub arch: String,
    pub kernel: Option<String>,
    pub hostname: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuUsage {
    pub percent: f32,
    pub cores: usize,
    pub frequency_mhz: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryUsage {
    pub used: u64,
    pub total: u64,
    pub percent: f64,
}

impl MemoryUsage {
    pub fn new(used: u64, total: u64) -> Self {
        Self {
            used,
            total,
            percent: percent_of(used, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    pub device: String,
    pub mount_point: String,
    pub used: u64,
    pub free: u64,
    pub total: u64,
    pub percent: f64,
}

/// One tick's complete metrics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub taken_at: DateTime<Local>,
    pub uptime: Duration,
    pub host: HostInfo,
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    pub swap: Metric<MemoryUsage>,
    pub disks: Metric<Vec<DiskUsage>>,
    pub network: Metric<NetworkStats>,
    pub processes: Metric<Vec<ProcessEntry>>,
    pub gpus: Metric<Vec<GpuDevice>>,
}

impl Sample {
    /// Pretty JSON form printed by `--once`.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub(crate) fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
