use std::time::{Duration, Instant};

use chrono::Local;
use color_eyre::Result;

use super::gpu::{GpuDevice, GpuProvider};
use super::network::{NetworkBaseline, NetworkStats};
use super::process::{DEFAULT_TOP_PROCESSES, ProcessEntry, top_by_cpu};
use super::snapshot::{DiskUsage, MemoryUsage, Metric, Sample, percent_of};
use super::source::{MetricsSource, Readings};

pub const DEFAULT_MAX_DISKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimits {
    pub top_processes: usize,
    pub max_disks: usize,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            top_processes: DEFAULT_TOP_PROCESSES,
            max_disks: DEFAULT_MAX_DISKS,
        }
    }
}

/// Turns a metrics source and a GPU provider into [`Sample`]s.
///
/// The network baseline is not stored here: the caller passes the previous
/// one in and keeps the one handed back.
pub struct Sampler {
    source: Box<dyn MetricsSource>,
    gpu: Box<dyn GpuProvider>,
    limits: SampleLimits,
    started_at: Instant,
}

impl Sampler {
    pub fn new(
        source: Box<dyn MetricsSource>,
        gpu: Box<dyn GpuProvider>,
        limits: SampleLimits,
    ) -> Self {
        Self {
            source,
            gpu,
            limits,
            started_at: Instant::now(),
        }
    }

    pub fn gpu_label(&self) -> &'static str {
        self.gpu.label()
    }

    /// First network reading, taken before the first tick.
    pub fn baseline_at(&mut self, now: Instant) -> NetworkBaseline {
        NetworkBaseline::new(self.source.network_counters(), now)
    }

    pub fn baseline(&mut self) -> NetworkBaseline {
        self.baseline_at(Instant::now())
    }

    pub fn sample(&mut self, previous: &NetworkBaseline) -> Result<(Sample, NetworkBaseline)> {
        self.sample_at(previous, Instant::now())
    }

    pub fn sample_at(
        &mut self,
        previous: &NetworkBaseline,
        now: Instant,
    ) -> Result<(Sample, NetworkBaseline)> {
        let readings = self.source.read()?;
        let gpus: Metric<Vec<_>> = self.gpu.devices().into();
        if let Metric::Unavailable(reason) = &gpus {
            tracing::warn!(%reason, provider = self.gpu.label(), "gpu query failed");
        }
        let uptime = now.saturating_duration_since(self.started_at);
        Ok(sample_from(readings, gpus, previous, now, uptime, &self.limits))
    }
}

/// Derives a [`Sample`] from raw readings and the previous tick's baseline.
pub fn sample_from(
    readings: Readings,
    gpus: Metric<Vec<GpuDevice>>,
    previous: &NetworkBaseline,
    now: Instant,
    uptime: Duration,
    limits: &SampleLimits,
) -> (Sample, NetworkBaseline) {
    let memory = MemoryUsage::new(readings.memory_used, readings.memory_total);
    let swap = if readings.swap_total > 0 {
        Metric::Available(MemoryUsage::new(readings.swap_used, readings.swap_total))
    } else {
        Metric::unavailable("no swap configured")
    };

    let disks = readings.disks.map(|entries| {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(disk) if disk.total > 0 => Some(disk),
                Ok(_) => None,
                Err(reason) => {
                    tracing::debug!(%reason, "skipping disk partition");
                    None
                }
            })
            .take(limits.max_disks)
            .map(|disk| {
                let free = disk.available.min(disk.total);
                let used = disk.total - free;
                DiskUsage {
                    device: disk.device,
                    mount_point: disk.mount_point,
                    used,
                    free,
                    total: disk.total,
                    percent: percent_of(used, disk.total),
                }
            })
            .collect()
    });

    let (network, next_baseline) = match readings.network {
        Metric::Available(reading) => {
            let rates = previous.rates_to(&reading.counters, now);
            (
                Metric::Available(NetworkStats {
                    counters: reading.counters,
                    rates,
                    active_interfaces: reading.active_interfaces,
                }),
                NetworkBaseline::new(Some(reading.counters), now),
            )
        }
        Metric::Unavailable(reason) => {
            tracing::warn!(%reason, "network counters unavailable");
            (Metric::Unavailable(reason), NetworkBaseline::new(None, now))
        }
    };

    let total_memory = readings.memory_total;
    let processes = readings.processes.map(|list| {
        let entries = list
            .into_iter()
            .map(|reading| ProcessEntry::from_reading(reading, total_memory))
            .collect();
        top_by_cpu(entries, limits.top_processes)
    });

    let sample = Sample {
        taken_at: Local::now(),
        uptime,
        host: readings.host,
        cpu: readings.cpu,
        memory,
        swap,
        disks,
        network,
        processes,
        gpus,
    };
    (sample, next_baseline)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use color_eyre::eyre::eyre;

    use super::*;
    use crate::system::gpu::{GpuError, NoGpu};
    use crate::system::network::NetworkCounters;
    use crate::system::process::ProcessReading;
    use crate::system::snapshot::{CpuUsage, HostInfo};
    use crate::system::source::{DiskReading, NetworkReading};

    fn readings(bytes_sent: u64) -> Readings {
        Readings {
            host: HostInfo {
                os: "Linux".into(),
                arch: "x86_64".into(),
                kernel: None,
                hostname: None,
                user: None,
            },
            cpu: CpuUsage {
                percent: 12.0,
                cores: 4,
                frequency_mhz: None,
            },
            memory_used: 512,
            memory_total: 1024,
            swap_used: 0,
            swap_total: 0,
            disks: Metric::Available(vec![]),
            network: Metric::Available(NetworkReading {
                counters: NetworkCounters {
                    bytes_sent,
                    ..Default::default()
                },
                active_interfaces: vec!["eth0".into()],
            }),
            processes: Metric::Available(vec![]),
        }
    }

    fn disk(device: &str, total: u64, available: u64) -> Result<DiskReading, String> {
        Ok(DiskReading {
            device: device.into(),
            mount_point: format!("/mnt/{device}"),
            total,
            available,
        })
    }

    struct Scripted(VecDeque<Readings>);

    impl MetricsSource for Scripted {
        fn read(&mut self) -> Result<Readings> {
            self.0.pop_front().ok_or_else(|| eyre!("source exhausted"))
        }
    }

    struct BrokenGpu;

    impl GpuProvider for BrokenGpu {
        fn label(&self) -> &'static str {
            "broken"
        }

        fn devices(&mut self) -> std::result::Result<Vec<GpuDevice>, GpuError> {
            Err(GpuError::Parse("garbage".into()))
        }
    }

    #[test]
    fn network_rate_uses_previous_baseline() {
        let t0 = Instant::now();
        let baseline = NetworkBaseline::new(Some(NetworkCounters::default()), t0);
        let (sample, next) = sample_from(
            readings(2048),
            Metric::Available(vec![]),
            &baseline,
            t0 + Duration::from_secs(2),
            Duration::ZERO,
            &SampleLimits::default(),
        );
        let network = sample.network.value().unwrap();
        assert_eq!(network.rates.upload, 1024.0);
        assert_eq!(next.counters.unwrap().bytes_sent, 2048);
        assert_eq!(next.taken_at, t0 + Duration::from_secs(2));
    }

    #[test]
    fn swap_absent_is_unavailable() {
        let t0 = Instant::now();
        let (sample, _) = sample_from(
            readings(0),
            Metric::Available(vec![]),
            &NetworkBaseline::new(None, t0),
            t0,
            Duration::ZERO,
            &SampleLimits::default(),
        );
        assert!(!sample.swap.is_available());
        assert_eq!(sample.memory.percent, 50.0);
    }

    #[test]
    fn failing_partition_does_not_hide_others() {
        let mut r = readings(0);
        r.disks = Metric::Available(vec![
            disk("sda1", 100, 25),
            Err("permission denied".into()),
            disk("sdb1", 200, 200),
            disk("proc", 0, 0),
        ]);
        let t0 = Instant::now();
        let (sample, _) = sample_from(
            r,
            Metric::Available(vec![]),
            &NetworkBaseline::new(None, t0),
            t0,
            Duration::ZERO,
            &SampleLimits::default(),
        );
        let disks = sample.disks.value().unwrap();
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].device, "sda1");
        assert_eq!(disks[0].used, 75);
        assert_eq!(disks[0].percent, 75.0);
        assert_eq!(disks[1].percent, 0.0);
    }

    #[test]
    fn disks_are_capped() {
        let mut r = readings(0);
        r.disks = Metric::Available((0..8).map(|i| disk(&format!("d{i}"), 10, 5)).collect());
        let t0 = Instant::now();
        let (sample, _) = sample_from(
            r,
            Metric::Available(vec![]),
            &NetworkBaseline::new(None, t0),
            t0,
            Duration::ZERO,
            &SampleLimits::default(),
        );
        assert_eq!(sample.disks.value().unwrap().len(), DEFAULT_MAX_DISKS);
    }

    #[test]
    fn processes_sorted_with_memory_percent() {
        let mut r = readings(0);
        r.processes = Metric::Available(vec![
            ProcessReading {
                pid: 1,
                name: Some("idle".into()),
                cpu_percent: None,
                memory_bytes: Some(256),
                status: Some("Sleeping".into()),
            },
            ProcessReading {
                pid: 2,
                name: Some("busy".into()),
                cpu_percent: Some(75.0),
                memory_bytes: Some(512),
                status: Some("Runnable".into()),
            },
        ]);
        let t0 = Instant::now();
        let (sample, _) = sample_from(
            r,
            Metric::Available(vec![]),
            &NetworkBaseline::new(None, t0),
            t0,
            Duration::ZERO,
            &SampleLimits::default(),
        );
        let procs = sample.processes.value().unwrap();
        assert_eq!(procs[0].name, "busy");
        assert_eq!(procs[0].memory_percent, 50.0);
        assert_eq!(procs[1].cpu_percent, 0.0);
    }

    #[test]
    fn unavailable_network_resets_baseline() {
        let mut r = readings(0);
        r.network = Metric::unavailable("no interfaces");
        let t0 = Instant::now();
        let (sample, next) = sample_from(
            r,
            Metric::Available(vec![]),
            &NetworkBaseline::new(Some(NetworkCounters::default()), t0),
            t0,
            Duration::ZERO,
            &SampleLimits::default(),
        );
        assert!(!sample.network.is_available());
        assert!(next.counters.is_none());
    }

    #[test]
    fn sampler_carries_baseline_between_ticks() {
        let source = Scripted(VecDeque::from([readings(0), readings(4096)]));
        let mut sampler = Sampler::new(
            Box::new(source),
            Box::new(NoGpu),
            SampleLimits::default(),
        );
        let t0 = Instant::now();
        let baseline = sampler.baseline_at(t0);
        let (sample, _) = sampler
            .sample_at(&baseline, t0 + Duration::from_secs(4))
            .unwrap();
        assert_eq!(sample.network.value().unwrap().rates.upload, 1024.0);
        assert_eq!(sample.gpus, Metric::Available(vec![]));
    }

    #[test]
    fn gpu_failure_is_contained() {
        let source = Scripted(VecDeque::from([readings(0)]));
        let mut sampler = Sampler::new(
            Box::new(source),
            Box::new(BrokenGpu),
            SampleLimits::default(),
        );
        let t0 = Instant::now();
        let (sample, _) = sampler
            .sample_at(&NetworkBaseline::new(None, t0), t0)
            .unwrap();
        assert!(!sample.gpus.is_available());
        assert!(sample.network.is_available());
    }

    #[test]
    fn source_failure_is_an_error() {
        let mut sampler = Sampler::new(
            Box::new(Scripted(VecDeque::new())),
            Box::new(NoGpu),
            SampleLimits::default(),
        );
        let t0 = Instant::now();
        assert!(sampler.sample_at(&NetworkBaseline::new(None, t0), t0).is_err());
    }
}
