//! Performance statistics collection for `--stats` output.

use std::time::{Duration, Instant};

/// Collects phase timings and workload counters for one CLI run.
///
/// The engine never sees this; the host times each call around it.
pub struct Stats {
    total_start: Instant,
    phases: Vec<(&'static str, Duration)>,
    pub harmonics_total: usize,
    pub harmonics_enabled: usize,
    pub samples: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            total_start: Instant::now(),
            phases: Vec::new(),
            harmonics_total: 0,
            harmonics_enabled: 0,
            samples: 0,
        }
    }

    /// Record a completed phase with its duration.
    pub fn add_phase(&mut self, name: &'static str, duration: Duration) {
        self.phases.push((name, duration));
    }

    /// Run `f`, recording its wall time under `name`.
    pub fn time<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.add_phase(name, start.elapsed());
        out
    }

    pub fn phases(&self) -> &[(&'static str, Duration)] {
        &self.phases
    }

    /// Print the stats table to stderr.
    pub fn display(&self) {
        let total = self.total_start.elapsed();
        eprintln!();
        eprintln!("=== Triplen Performance Stats ===");

        for (name, dur) in &self.phases {
            eprintln!("  {:<24} {:>10.6}s", name, dur.as_secs_f64());
        }

        eprintln!(
            "  Harmonics:              enabled={}  total={}",
            self.harmonics_enabled, self.harmonics_total
        );
        if self.samples > 0 {
            eprintln!("  Samples per phase:      {}", self.samples);
        }

        eprintln!("  ─────────────────────────────────");
        eprintln!("  Total:                  {:>10.6}s", total.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_records_phase_and_returns_value() {
        let mut stats = Stats::new();
        let v = stats.time("synthesize", || 41 + 1);
        assert_eq!(v, 42);
        assert_eq!(stats.phases().len(), 1);
        assert_eq!(stats.phases()[0].0, "synthesize");
    }
}
