use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::Wrapper;
use crate::dispatcher::{Request, Response};
use crate::view::{CallArgs, Handler};

/// Wrapper collecting dispatch counters
///
/// All counters use atomic operations, so one instance can be shared by
/// every route and every worker thread without locks.
///
/// Metrics collected:
/// - Total calls that reached this wrapper
/// - 4xx and 5xx responses returned by the inner chain
/// - Average latency of the inner chain
///
/// A 405 for a method a pattern group does not declare is answered before
/// the chain runs, so it is not counted here.
pub struct MetricsWrapper {
    request_count: AtomicUsize,
    client_errors: AtomicUsize,
    server_errors: AtomicUsize,
    total_latency_ns: AtomicU64,
}

impl Default for MetricsWrapper {
    fn default() -> Self {
        Self {
            request_count: AtomicUsize::new(0),
            client_errors: AtomicUsize::new(0),
            server_errors: AtomicUsize::new(0),
            total_latency_ns: AtomicU64::new(0),
        }
    }
}

impl MetricsWrapper {
    /// Create a new metrics wrapper with all counters initialized to zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of calls observed
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Number of 4xx responses
    #[must_use]
    pub fn client_error_count(&self) -> usize {
        self.client_errors.load(Ordering::Relaxed)
    }

    /// Number of 5xx responses
    #[must_use]
    pub fn server_error_count(&self) -> usize {
        self.server_errors.load(Ordering::Relaxed)
    }

    /// Calculate the average latency of the inner chain
    ///
    /// Returns zero duration if no requests have been processed yet.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    fn record(&self, res: &Response, latency: Duration) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.total_latency_ns.fetch_add(nanos, Ordering::Relaxed);
        match res.status {
            400..=499 => {
                self.client_errors.fetch_add(1, Ordering::Relaxed);
            }
            500..=599 => {
                self.server_errors.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
}

impl Wrapper for MetricsWrapper {
    fn call(&self, inner: &Handler, req: &mut Request, args: &CallArgs) -> Response {
        let start = Instant::now();
        let res = inner(req, args);
        self.record(&res, start.elapsed());
        res
    }
}
