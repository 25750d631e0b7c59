use std::time::{Duration, Instant};

use color_eyre::Result;
use sysinfo::{
    Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, ProcessRefreshKind, ProcessesToUpdate, System,
};

use super::network::NetworkCounters;
use super::process::ProcessReading;
use super::snapshot::{CpuUsage, HostInfo, Metric};
use super::source::{DiskReading, MetricsSource, NetworkReading, Readings};

/// [`MetricsSource`] backed by `sysinfo`.
pub struct SysinfoSource {
    sys: System,
    disks: Disks,
    networks: Networks,
    host: HostInfo,
    cpu_refreshed_at: Instant,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        SysinfoSource {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            host: read_host_info(),
            cpu_refreshed_at: Instant::now(),
        }
    }

    fn cpu(&self) -> CpuUsage {
        let cpus = self.sys.cpus();
        let frequency_mhz = cpus
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|mhz| *mhz > 0)
            .map(|mhz| mhz as f64);
        CpuUsage {
            percent: self.sys.global_cpu_usage().clamp(0.0, 100.0),
            cores: cpus.len(),
            frequency_mhz,
        }
    }

    fn disk_readings(&self) -> Vec<Result<DiskReading, String>> {
        self.disks
            .list()
            .iter()
            .map(|disk| {
                Ok(DiskReading {
                    device: disk.name().to_string_lossy().to_string(),
                    mount_point: disk.mount_point().display().to_string(),
                    total: disk.total_space(),
                    available: disk.available_space(),
                })
            })
            .collect()
    }

    fn network_reading(&self) -> NetworkReading {
        let mut counters = NetworkCounters::default();
        let mut active_interfaces = Vec::new();
        for (name, data) in &self.networks {
            counters.bytes_sent += data.total_transmitted();
            counters.bytes_recv += data.total_received();
            counters.packets_sent += data.total_packets_transmitted();
            counters.packets_recv += data.total_packets_received();
            if !data.ip_networks().is_empty() {
                active_interfaces.push(name.clone());
            }
        }
        active_interfaces.sort();
        NetworkReading {
            counters,
            active_interfaces,
        }
    }

    fn process_readings(&self) -> Vec<ProcessReading> {
        self.sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessReading {
                pid: pid.as_u32(),
                name: Some(process.name().to_string_lossy().to_string()),
                cpu_percent: Some(process.cpu_usage()),
                memory_bytes: Some(process.memory()),
                status: Some(process.status().to_string()),
            })
            .collect()
    }
}

impl MetricsSource for SysinfoSource {
    fn read(&mut self) -> Result<Readings> {
        let _span = tracing::debug_span!("collector.read").entered();

        if let Some(wait) = cpu_settle_delay(self.cpu_refreshed_at.elapsed()) {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "waiting for cpu counters");
            std::thread::sleep(wait);
        }

        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        self.cpu_refreshed_at = Instant::now();
        self.disks.refresh(true);
        self.networks.refresh(true);

        Ok(Readings {
            host: self.host.clone(),
            cpu: self.cpu(),
            memory_used: self.sys.used_memory(),
            memory_total: self.sys.total_memory(),
            swap_used: self.sys.used_swap(),
            swap_total: self.sys.total_swap(),
            disks: Metric::Available(self.disk_readings()),
            network: Metric::Available(self.network_reading()),
            processes: Metric::Available(self.process_readings()),
        })
    }

    fn network_counters(&mut self) -> Option<NetworkCounters> {
        self.networks.refresh(true);
        Some(self.network_reading().counters)
    }
}

/// CPU usage is a delta between two refreshes; closer together than
/// sysinfo's minimum interval the figures are noise.
fn cpu_settle_delay(since_last_refresh: Duration) -> Option<Duration> {
    MINIMUM_CPU_UPDATE_INTERVAL
        .checked_sub(since_last_refresh)
        .filter(|wait| !wait.is_zero())
}

fn read_host_info() -> HostInfo {
    HostInfo {
        os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        arch: std::env::consts::ARCH.to_string(),
        kernel: System::kernel_version(),
        hostname: System::host_name(),
        user: std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|u| !u.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_live_counters_without_failing() {
        let mut source = SysinfoSource::new();
        let readings = source.read().unwrap();
        assert!(readings.cpu.cores > 0);
        assert!(readings.memory_total > 0);
        assert!(readings.memory_used <= readings.memory_total);
        assert!((0.0..=100.0).contains(&readings.cpu.percent));
    }

    #[test]
    fn settle_delay_covers_the_rest_of_the_minimum_window() {
        assert_eq!(
            cpu_settle_delay(Duration::ZERO),
            Some(MINIMUM_CPU_UPDATE_INTERVAL)
        );
        assert_eq!(cpu_settle_delay(MINIMUM_CPU_UPDATE_INTERVAL), None);
        assert_eq!(cpu_settle_delay(Duration::from_secs(1)), None);
    }

    #[test]
    fn first_read_right_after_construction_waits_for_cpu_window() {
        let mut source = SysinfoSource::new();
        let start = Instant::now();
        source.read().unwrap();
        assert!(start.elapsed() >= MINIMUM_CPU_UPDATE_INTERVAL / 2);
        assert!(source.cpu_refreshed_at >= start);
    }

    #[test]
    fn network_counters_are_available() {
        let mut source = SysinfoSource::new();
        assert!(source.network_counters().is_some());
    }
}
