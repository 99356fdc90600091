use serde::Serialize;

/// Raw durations kept in a report
pub const DURATION_SAMPLE_LEN: usize = 10;
/// Error messages kept in a report where every iteration failed
pub const MAX_REPORTED_ERRORS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub avg_ns: u64,
    pub median_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    pub durations_ns: Vec<u64>,
}

/// Reduce successful durations into summary statistics.
///
/// The median is the element at index `len / 2` of the sorted list, so even
/// counts take the upper middle rather than interpolating. The average is
/// truncated. Only the smallest [`DURATION_SAMPLE_LEN`] durations are kept.
pub fn summarize(mut durations: Vec<u64>) -> Option<DurationStats> {
    if durations.is_empty() {
        return None;
    }
    durations.sort_unstable();

    let count = durations.len();
    let total: u128 = durations.iter().map(|d| *d as u128).sum();
    let avg_ns = (total / count as u128) as u64;
    let median_ns = durations[count / 2];
    let min_ns = durations[0];
    let max_ns = durations[count - 1];
    durations.truncate(DURATION_SAMPLE_LEN);

    Some(DurationStats {
        avg_ns,
        median_ns,
        min_ns,
        max_ns,
        durations_ns: durations,
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BenchmarkReport {
    pub iterations: usize,
    pub successful: usize,
    pub failed: usize,
    #[serde(flatten)]
    pub stats: Option<DurationStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl BenchmarkReport {
    /// Build a report from durations (call order) and error messages of a run.
    pub fn reduce(iterations: usize, durations: Vec<u64>, errors: Vec<String>) -> Self {
        let successful = durations.len();
        let failed = errors.len();
        match summarize(durations) {
            Some(stats) => Self {
                iterations,
                successful,
                failed,
                stats: Some(stats),
                error: None,
                errors: vec![],
            },
            None => Self {
                iterations,
                successful,
                failed,
                stats: None,
                error: Some(format!("All {iterations} iterations failed")),
                errors: errors.into_iter().take(MAX_REPORTED_ERRORS).collect(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.stats.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn three_durations_in_call_order() {
        let report = BenchmarkReport::reduce(3, vec![100, 300, 200], vec![]);
        assert_eq!(report.successful, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(
            report.stats,
            Some(DurationStats {
                avg_ns: 200,
                median_ns: 200,
                min_ns: 100,
                max_ns: 300,
                durations_ns: vec![100, 200, 300],
            })
        );
    }

    #[test]
    fn median_takes_upper_middle() {
        let stats = summarize(vec![40, 10, 30, 20]).unwrap();
        assert_eq!(stats.median_ns, 30);
        assert_eq!(stats.avg_ns, 25);
    }

    #[test]
    fn average_is_truncated() {
        let stats = summarize(vec![1, 2]).unwrap();
        assert_eq!(stats.avg_ns, 1);
        assert_eq!(stats.median_ns, 2);
    }

    #[test]
    fn average_does_not_overflow() {
        let stats = summarize(vec![u64::MAX, u64::MAX - 2]).unwrap();
        assert_eq!(stats.avg_ns, u64::MAX - 1);
    }

    #[test]
    fn sample_keeps_smallest_ten() {
        let durations: Vec<u64> = (1..=25).rev().collect();
        let stats = summarize(durations).unwrap();
        assert_eq!(stats.durations_ns, (1..=10).collect::<Vec<u64>>());
        assert_eq!(stats.min_ns, 1);
        assert_eq!(stats.max_ns, 25);
        assert_eq!(stats.median_ns, 13);

        let stats = summarize(vec![5, 3, 9]).unwrap();
        assert_eq!(stats.durations_ns, vec![3, 5, 9]);
    }

    #[test]
    fn partial_failures_do_not_list_errors() {
        let report = BenchmarkReport::reduce(4, vec![7, 9], vec!["a".into(), "b".into()]);
        assert_eq!(report.successful + report.failed, report.iterations);
        assert!(report.is_success());
        assert!(report.errors.is_empty());
        assert_eq!(report.error, None);
    }

    #[test]
    fn all_failed_keeps_first_five_errors() {
        let errors: Vec<String> = (0..7).map(|i| format!("error {i}")).collect();
        let report = BenchmarkReport::reduce(7, vec![], errors);
        assert_eq!(report.successful, 0);
        assert_eq!(report.failed, 7);
        assert_eq!(report.error.as_deref(), Some("All 7 iterations failed"));
        assert_eq!(
            report.errors,
            vec!["error 0", "error 1", "error 2", "error 3", "error 4"]
        );
    }

    #[test]
    fn serializes_like_the_rasterio_harness() {
        let report = BenchmarkReport::reduce(3, vec![100, 300, 200], vec![]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "iterations": 3,
                "successful": 3,
                "failed": 0,
                "avg_ns": 200,
                "median_ns": 200,
                "min_ns": 100,
                "max_ns": 300,
                "durations_ns": [100, 200, 300]
            })
        );

        let errors: Vec<String> = (1..=5).map(|i| format!("e{i}")).collect();
        let report = BenchmarkReport::reduce(5, vec![], errors);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "iterations": 5,
                "successful": 0,
                "failed": 5,
                "error": "All 5 iterations failed",
                "errors": ["e1", "e2", "e3", "e4", "e5"]
            })
        );
    }
}
