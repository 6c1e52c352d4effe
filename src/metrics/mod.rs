//! Basic metrics instrumentation for tracking backend traffic.
//!
//! Provides counters and duration tracking for HTTP requests, uploads and
//! blob cleanup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for tracking backend calls.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of contacts fetched
    contacts_fetched_total: Arc<AtomicU64>,

    /// Number of images uploaded
    images_uploaded_total: Arc<AtomicU64>,

    /// Number of best-effort blob removals that failed
    cleanup_failures_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            contacts_fetched_total: Arc::new(AtomicU64::new(0)),
            images_uploaded_total: Arc::new(AtomicU64::new(0)),
            cleanup_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record contacts fetched.
    pub fn record_contacts_fetched(&self, count: usize) {
        self.contacts_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record an image upload.
    pub fn record_image_uploaded(&self) {
        self.images_uploaded_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed best-effort blob removal.
    pub fn record_cleanup_failure(&self) {
        self.cleanup_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total contacts fetched.
    pub fn contacts_fetched_total(&self) -> u64 {
        self.contacts_fetched_total.load(Ordering::Relaxed)
    }

    /// Get total images uploaded.
    pub fn images_uploaded_total(&self) -> u64 {
        self.images_uploaded_total.load(Ordering::Relaxed)
    }

    /// Get total cleanup failures.
    pub fn cleanup_failures_total(&self) -> u64 {
        self.cleanup_failures_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            contacts_fetched_total: self.contacts_fetched_total(),
            images_uploaded_total: self.images_uploaded_total(),
            cleanup_failures_total: self.cleanup_failures_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub contacts_fetched_total: u64,
    pub images_uploaded_total: u64,
    pub cleanup_failures_total: u64,
}
