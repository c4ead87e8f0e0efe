use std::time::Instant;

use tracing::{field, info, info_span};

use super::Wrapper;
use crate::dispatcher::{Request, Response};
use crate::view::{CallArgs, Handler};

/// Opens a `dispatch` span around the inner chain and records the outcome.
pub struct TracingWrapper;

impl Wrapper for TracingWrapper {
    fn call(&self, inner: &Handler, req: &mut Request, args: &CallArgs) -> Response {
        let span = info_span!(
            "dispatch",
            method = %req.method,
            path = %req.path,
            status = field::Empty,
            latency_us = field::Empty
        );
        let _guard = span.enter();
        let start = Instant::now();

        let res = inner(req, args);

        let latency_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        span.record("status", res.status);
        span.record("latency_us", latency_us);
        info!(
            status = res.status,
            latency_us = latency_us,
            positional_args = args.positional.len(),
            keyword_args = args.keyword.len(),
            "Dispatch complete"
        );
        res
    }
}
