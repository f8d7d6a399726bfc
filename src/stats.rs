use crate::state::WaitPercentiles;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile in `[0, 100]` over sorted values, interpolating linearly
/// between the two closest ranks.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

pub fn wait_percentiles(waits: &[f64]) -> WaitPercentiles {
    let mut sorted = waits.to_vec();
    sorted.sort_by(f64::total_cmp);
    WaitPercentiles {
        p50: percentile(&sorted, 50.0),
        p90: percentile(&sorted, 90.0),
        p95: percentile(&sorted, 95.0),
        p99: percentile(&sorted, 99.0),
    }
}

/// Share of available counter time spent serving, in `[0, 1]`.
pub fn utilization(busy_time: f64, counters: usize, total_time: f64) -> f64 {
    if total_time <= 0.0 || counters == 0 {
        return 0.0;
    }
    busy_time / (counters as f64 * total_time)
}
