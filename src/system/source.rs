use color_eyre::Result;

use super::network::NetworkCounters;
use super::process::ProcessReading;
use super::snapshot::{CpuUsage, HostInfo, Metric};

#[derive(Debug, Clone, PartialEq)]
pub struct DiskReading {
    pub device: String,
    pub mount_point: String,
    pub total: u64,
    pub available: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkReading {
    pub counters: NetworkCounters,
    pub active_interfaces: Vec<String>,
}

/// Raw OS counters for one tick, before any derivation.
///
/// Disk partitions carry their own per-entry outcome so one unreadable
/// mount does not hide the others.
#[derive(Debug, Clone, PartialEq)]
pub struct Readings {
    pub host: HostInfo,
    pub cpu: CpuUsage,
    pub memory_used: u64,
    pub memory_total: u64,
    pub swap_used: u64,
    pub swap_total: u64,
    pub disks: Metric<Vec<Result<DiskReading, String>>>,
    pub network: Metric<NetworkReading>,
    pub processes: Metric<Vec<ProcessReading>>,
}

/// Operating system metrics provider.
pub trait MetricsSource {
    /// Refreshes and returns the current counters.
    fn read(&mut self) -> Result<Readings>;

    /// Network counters alone, used to seed the rate baseline at startup.
    fn network_counters(&mut self) -> Option<NetworkCounters> {
        self.read()
            .ok()
            .and_then(|r| r.network.value().map(|n| n.counters))
    }
}
