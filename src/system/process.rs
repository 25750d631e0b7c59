use serde::Serialize;

pub const DEFAULT_TOP_PROCESSES: usize = 10;

/// Raw per-process reading as handed over by a metrics source.
///
/// Fields are optional because a process can exit or deny access between
/// enumeration and inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReading {
    pub pid: u32,
    pub name: Option<String>,
    pub cpu_percent: Option<f32>,
    pub memory_bytes: Option<u64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub status: String,
}

impl ProcessEntry {
    pub fn from_reading(reading: ProcessReading, total_memory: u64) -> Self {
        let memory_percent = match (reading.memory_bytes, total_memory) {
            (Some(bytes), total) if total > 0 => (bytes as f64 / total as f64 * 100.0) as f32,
            _ => 0.0,
        };
        ProcessEntry {
            pid: reading.pid,
            name: reading.name.unwrap_or_else(|| "N/A".to_string()),
            cpu_percent: sanitize(reading.cpu_percent),
            memory_percent,
            status: reading.status.unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

fn sanitize(value: Option<f32>) -> f32 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Highest CPU consumers first, at most `limit` entries.
///
/// The sort is stable so processes with equal CPU keep discovery order.
pub fn top_by_cpu(mut entries: Vec<ProcessEntry>, limit: usize) -> Vec<ProcessEntry> {
    entries.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn entry(pid: u32, cpu: f32) -> ProcessEntry {
        ProcessEntry {
            pid,
            name: format!("proc{pid}"),
            cpu_percent: cpu,
            memory_percent: 0.0,
            status: "Run".to_string(),
        }
    }

    #[test]
    fn missing_fields_fall_back() {
        let entry = ProcessEntry::from_reading(
            ProcessReading {
                pid: 42,
                ..Default::default()
            },
            1024,
        );
        assert_eq!(entry.name, "N/A");
        assert_eq!(entry.status, "N/A");
        assert_eq!(entry.cpu_percent, 0.0);
        assert_eq!(entry.memory_percent, 0.0);
    }

    #[test]
    fn nan_cpu_is_treated_as_zero() {
        let entry = ProcessEntry::from_reading(
            ProcessReading {
                pid: 1,
                cpu_percent: Some(f32::NAN),
                ..Default::default()
            },
            1024,
        );
        assert_eq!(entry.cpu_percent, 0.0);
    }

    #[test]
    fn memory_percent_uses_total_memory() {
        let entry = ProcessEntry::from_reading(
            ProcessReading {
                pid: 1,
                memory_bytes: Some(512),
                ..Default::default()
            },
            2048,
        );
        assert!((entry.memory_percent - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let sorted = top_by_cpu(vec![entry(1, 5.0), entry(2, 9.0), entry(3, 5.0)], 10);
        let pids: Vec<u32> = sorted.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 1, 3]);
    }

    #[test]
    fn capped_at_limit() {
        let entries = (0..25).map(|i| entry(i, i as f32)).collect();
        let top = top_by_cpu(entries, DEFAULT_TOP_PROCESSES);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].pid, 24);
        assert_eq!(top[9].pid, 15);
    }

    proptest! {
        #[test]
        fn sorted_descending_and_capped(cpus in prop::collection::vec(0.0f32..400.0, 0..40)) {
            let entries = cpus.iter().enumerate().map(|(i, c)| entry(i as u32, *c)).collect();
            let top = top_by_cpu(entries, DEFAULT_TOP_PROCESSES);
            prop_assert_eq!(top.len(), cpus.len().min(DEFAULT_TOP_PROCESSES));
            for pair in top.windows(2) {
                prop_assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
            }
        }
    }
}
