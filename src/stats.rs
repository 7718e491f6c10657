//! Aggregate latency statistics over the attempts of a run.
//!
//! Nothing is cached: every figure is recomputed from the attempt list when
//! asked for. Failed attempts are left out of the average and only take part
//! in the extremes when they sit at index 0, which seeds the running value.
//! The deviation sums over every attempt but divides by the number of
//! successful ones.

use serde::Serialize;

use crate::attempt::AttemptResult;

/// Read-only summary of a run at the time it was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub successful: usize,
    pub failed: usize,
    pub count: usize,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
}

impl AggregateResult {
    pub fn from_results(results: &[AttemptResult]) -> Self {
        let successful = results.iter().filter(|r| !r.failed).count();
        AggregateResult {
            successful,
            failed: results.len() - successful,
            count: results.len(),
            average: avg_latency(results),
            max: max_latency(results),
            min: min_latency(results),
            std_dev: std_dev_latency(results),
        }
    }
}

/// Mean latency of the successful attempts. NaN when there are none.
pub fn avg_latency(results: &[AttemptResult]) -> f64 {
    let mut count = 0usize;
    let mut sum = 0.0;
    for r in results.iter().filter(|r| !r.failed) {
        count += 1;
        sum += r.latency_ms;
    }
    sum / count as f64
}

pub fn max_latency(results: &[AttemptResult]) -> f64 {
    extreme(results, |candidate, current| candidate > current)
}

pub fn min_latency(results: &[AttemptResult]) -> f64 {
    extreme(results, |candidate, current| candidate < current)
}

// Index 0 always seeds the value, failed or not. After that only successful
// attempts that beat it strictly replace it.
fn extreme(results: &[AttemptResult], beats: impl Fn(f64, f64) -> bool) -> f64 {
    let mut value = 0.0;
    for (i, r) in results.iter().enumerate() {
        if i == 0 {
            value = r.latency_ms;
            continue;
        }
        if !r.failed && beats(r.latency_ms, value) {
            value = r.latency_ms;
        }
    }
    value
}

/// Square root of the summed squared distance of every latency from the
/// successful-only average, divided by the successful count.
pub fn std_dev_latency(results: &[AttemptResult]) -> f64 {
    let avg = avg_latency(results);
    let successful = results.iter().filter(|r| !r.failed).count();
    let dev: f64 = results
        .iter()
        .map(|r| {
            let diff = r.latency_ms - avg;
            diff * diff
        })
        .sum();
    (dev / successful as f64).sqrt()
}
