// In-process usage telemetry for gateway calls

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;

/// One gateway invocation, appended for every real provider call.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub timestamp: DateTime<Utc>,
    pub feature: String,
    pub success: bool,
    pub latency_seconds: f64,
}

/// Aggregate view over all recorded calls.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UsageSummary {
    pub total_calls: usize,
    pub success_rate_percent: f64,
    pub average_latency: f64,
    pub per_feature_counts: BTreeMap<String, u64>,
}

/// Append-only usage log, process lifetime.
///
/// Records are never mutated or deleted; aggregation is a full O(n) scan at
/// query time. Fine at this scale, a production port should keep running
/// aggregates.
#[derive(Default)]
pub struct UsageLog {
    records: Mutex<Vec<UsageRecord>>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Never fails.
    pub fn record(&self, feature: &str, success: bool, latency_seconds: f64) {
        self.records.lock().push(UsageRecord {
            timestamp: Utc::now(),
            feature: feature.to_string(),
            success,
            latency_seconds,
        });
    }

    /// Summarize all records. Zero records yields a zero-valued summary.
    pub fn summarize(&self) -> UsageSummary {
        let records = self.records.lock();
        let total_calls = records.len();
        if total_calls == 0 {
            return UsageSummary::default();
        }

        let successes = records.iter().filter(|r| r.success).count();
        let latency_sum: f64 = records.iter().map(|r| r.latency_seconds).sum();

        let mut per_feature_counts = BTreeMap::new();
        for record in records.iter() {
            *per_feature_counts.entry(record.feature.clone()).or_insert(0u64) += 1;
        }

        UsageSummary {
            total_calls,
            success_rate_percent: round2(successes as f64 / total_calls as f64 * 100.0),
            average_latency: round2(latency_sum / total_calls as f64),
            per_feature_counts,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_over_three_calls() {
        let log = UsageLog::new();
        log.record("roommate-match", true, 1.0);
        log.record("roommate-match", true, 2.0);
        log.record("lease-analysis", false, 3.0);

        let summary = log.summarize();
        assert_eq!(summary.total_calls, 3);
        assert_eq!(summary.success_rate_percent, 66.67);
        assert_eq!(summary.average_latency, 2.0);
        assert_eq!(summary.per_feature_counts["roommate-match"], 2);
        assert_eq!(summary.per_feature_counts["lease-analysis"], 1);
    }

    #[test]
    fn test_empty_summary_is_zero_valued() {
        let log = UsageLog::new();
        let summary = log.summarize();
        assert_eq!(summary.total_calls, 0);
        assert_eq!(summary.success_rate_percent, 0.0);
        assert_eq!(summary.average_latency, 0.0);
        assert!(summary.per_feature_counts.is_empty());
    }

    #[test]
    fn test_records_are_append_only() {
        let log = UsageLog::new();
        for i in 0..5 {
            log.record("chat", i % 2 == 0, 0.5);
        }
        assert_eq!(log.summarize().total_calls, 5);
    }
}
