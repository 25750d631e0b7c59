use std::time::Instant;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// Bytes per second derived from two counter readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NetworkRates {
    pub upload: f64,
    pub download: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub counters: NetworkCounters,
    pub rates: NetworkRates,
    pub active_interfaces: Vec<String>,
}

/// Counters and timestamp carried from one tick to the next.
///
/// Owned by the loop controller and replaced after every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkBaseline {
    pub counters: Option<NetworkCounters>,
    pub taken_at: Instant,
}

impl NetworkBaseline {
    pub fn new(counters: Option<NetworkCounters>, taken_at: Instant) -> Self {
        Self { counters, taken_at }
    }

    /// Rates against `current`, zero when there is no previous reading.
    pub fn rates_to(&self, current: &NetworkCounters, now: Instant) -> NetworkRates {
        match &self.counters {
            Some(previous) => {
                let elapsed = now.saturating_duration_since(self.taken_at).as_secs_f64();
                compute_rates(previous, current, elapsed)
            }
            None => NetworkRates::default(),
        }
    }
}

/// `(current - previous) / elapsed_secs` for sent and received bytes.
///
/// A counter that went backwards (interface reset) yields 0, as does a
/// non-positive elapsed time.
pub fn compute_rates(
    previous: &NetworkCounters,
    current: &NetworkCounters,
    elapsed_secs: f64,
) -> NetworkRates {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return NetworkRates::default();
    }
    let sent = current.bytes_sent.saturating_sub(previous.bytes_sent);
    let recv = current.bytes_recv.saturating_sub(previous.bytes_recv);
    NetworkRates {
        upload: sent as f64 / elapsed_secs,
        download: recv as f64 / elapsed_secs,
    }
}
