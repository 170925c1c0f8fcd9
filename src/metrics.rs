/// Metrics and monitoring for the scraping pipelines
///
/// Tracks success rates, error counts and latency per pipeline
/// ("product", "shipping"), exposed through the /metrics endpoints.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub pipeline: String,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub average_response_time_ms: f64,
    pub total_response_time_ms: u64,
}

impl PipelineMetrics {
    pub fn new(pipeline: String) -> Self {
        Self {
            pipeline,
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            last_success: None,
            last_failure: None,
            last_error: None,
            average_response_time_ms: 0.0,
            total_response_time_ms: 0,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.successful_requests as f64 / self.total_requests as f64) * 100.0
        }
    }

    fn record_success(&mut self, response_time: Duration) {
        self.total_requests += 1;
        self.successful_requests += 1;
        self.last_success = Some(Utc::now());
        self.total_response_time_ms += response_time.as_millis() as u64;
        self.average_response_time_ms =
            self.total_response_time_ms as f64 / self.successful_requests as f64;
    }

    fn record_failure(&mut self, error: &str) {
        self.total_requests += 1;
        self.failed_requests += 1;
        self.last_failure = Some(Utc::now());
        self.last_error = Some(error.to_string());
    }
}

/// Thread-safe tracker shared across HTTP handlers.
#[derive(Clone, Default)]
pub struct MetricsTracker {
    metrics: Arc<Mutex<HashMap<String, PipelineMetrics>>>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, pipeline: &str, response_time: Duration) {
        let mut map = self.metrics.lock().unwrap();
        map.entry(pipeline.to_string())
            .or_insert_with(|| PipelineMetrics::new(pipeline.to_string()))
            .record_success(response_time);
    }

    pub fn record_failure(&self, pipeline: &str, error: &str) {
        let mut map = self.metrics.lock().unwrap();
        map.entry(pipeline.to_string())
            .or_insert_with(|| PipelineMetrics::new(pipeline.to_string()))
            .record_failure(error);
    }

    pub fn snapshot(&self) -> Vec<PipelineMetrics> {
        let map = self.metrics.lock().unwrap();
        let mut all: Vec<PipelineMetrics> = map.values().cloned().collect();
        all.sort_by(|a, b| a.pipeline.cmp(&b.pipeline));
        all
    }

    pub fn summary(&self) -> serde_json::Value {
        let all = self.snapshot();
        let total: u64 = all.iter().map(|m| m.total_requests).sum();
        let failed: u64 = all.iter().map(|m| m.failed_requests).sum();
        serde_json::json!({
            "total_requests": total,
            "failed_requests": failed,
            "pipelines": all.iter().map(|m| {
                serde_json::json!({
                    "pipeline": m.pipeline,
                    "success_rate": m.success_rate(),
                    "average_response_time_ms": m.average_response_time_ms,
                })
            }).collect::<Vec<_>>(),
        })
    }
}
