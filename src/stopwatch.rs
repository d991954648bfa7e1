use std::time::Instant;

use tdigest::TDigest;

/// Collects query durations and reports latency percentiles.
#[derive(Clone)]
pub struct Stopwatch {
    start_time: Instant,
    durations_in_micros: Vec<f64>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch {
            start_time: Instant::now(),
            durations_in_micros: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn stop(&mut self) {
        let duration = self.start_time.elapsed();
        self.record_micros(duration.as_micros() as f64);
    }

    pub fn record_micros(&mut self, micros: f64) {
        self.durations_in_micros.push(micros);
    }

    pub fn get_n(&self) -> usize {
        self.durations_in_micros.len()
    }

    /// `q` is a quantile in `[0, 1]`, so p95 is `0.95`. Returns 0 without measurements.
    pub fn get_percentile_in_micros(&self, q: f64) -> f64 {
        if self.durations_in_micros.is_empty() {
            return 0.0;
        }
        let t_digest = TDigest::new_with_size(100);
        let sorted_digest = t_digest.merge_unsorted(self.durations_in_micros.clone());
        sorted_digest.estimate_quantile(q)
    }
}
