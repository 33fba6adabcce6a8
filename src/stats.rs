use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::Table;

//Body of POST /api/latency. Missing fields fall back to an empty region list and a zero threshold.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LatencyQuery {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub threshold_ms: f64,
}

// None serializes as null when a region has rows but no numeric samples for that field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub avg_latency: Option<f64>,
    pub p95_latency: Option<f64>,
    pub avg_uptime: Option<f64>,
    pub breaches: u64,
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Percentile of `samples` with linear interpolation between the two closest
/// ranks: rank = pct/100 * (n - 1).
pub fn percentile(samples: &[f64], pct: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = rank - lower as f64;

    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Statistics for one region, or `None` when no row carries that region.
pub fn region_stats(table: &Table, region: &str, threshold_ms: f64) -> Option<RegionStats> {
    let mut rows = 0usize;
    let mut latencies = Vec::new();
    let mut uptimes = Vec::new();

    for record in table.in_region(region) {
        rows += 1;
        if let Some(latency) = record.latency_ms() {
            latencies.push(latency);
        }
        if let Some(uptime) = record.uptime_pct() {
            uptimes.push(uptime);
        }
    }

    if rows == 0 {
        return None;
    }

    Some(RegionStats {
        avg_latency: mean(&latencies),
        p95_latency: percentile(&latencies, 95.0),
        avg_uptime: mean(&uptimes),
        breaches: latencies.iter().filter(|&&l| l > threshold_ms).count() as u64,
    })
}

/// Regions are visited in request order; absent regions are left out of the result
/// and a repeated region overwrites its earlier entry in place.
pub fn aggregate(table: &Table, query: &LatencyQuery) -> IndexMap<String, RegionStats> {
    let mut results = IndexMap::new();
    for region in &query.regions {
        match region_stats(table, region, query.threshold_ms) {
            Some(stats) => {
                results.insert(region.clone(), stats);
            }
            None => debug!(region = %region, "No rows for region, skipping"),
        }
    }
    results
}
