use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::request::Request;
use super::response::Response;
use crate::error::RouteError;
use crate::router::{RoutingTable, SharedRoutingTable};

/// Request attribute holding the per-request ULID
pub const REQUEST_ID_ATTRIBUTE: &str = "request_id";

/// Generate a unique request ID for tracing (ULID string)
#[must_use]
pub fn generate_request_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Host-facing request handling over a [`SharedRoutingTable`].
///
/// Resolves the path, answers 404 when nothing matches, runs the view and
/// turns a panicking view into a 500. Configuration errors are returned to
/// the caller.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    table: SharedRoutingTable,
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: SharedRoutingTable) -> Self {
        Self { table }
    }

    /// Dispatcher over a table that will not be re-registered
    #[must_use]
    pub fn from_table(table: RoutingTable) -> Self {
        Self::new(SharedRoutingTable::new(table))
    }

    #[must_use]
    pub fn table(&self) -> &SharedRoutingTable {
        &self.table
    }

    /// Handle one request.
    ///
    /// # Errors
    ///
    /// [`RouteError::NotConfigured`] when the matched route was never
    /// registered through [`RoutingTable::register`].
    pub fn handle(&self, req: &mut Request) -> Result<Response, RouteError> {
        let request_id = generate_request_id();
        req.set_attribute(REQUEST_ID_ATTRIBUTE, Value::String(request_id.clone()));

        let table = self.table.load();
        let Some(resolved) = table.resolve(&req.path)? else {
            warn!(
                request_id = %request_id,
                method = %req.method,
                path = %req.path,
                "No route for request"
            );
            return Ok(Response::error(404, "Not Found"));
        };

        debug!(
            request_id = %request_id,
            view = %resolved.view.name(),
            csrf_exempt = resolved.view.csrf_exempt(),
            args = ?resolved.args,
            "Dispatching"
        );

        let start = Instant::now();
        match catch_unwind(AssertUnwindSafe(|| resolved.call(req))) {
            Ok(res) => {
                info!(
                    request_id = %request_id,
                    view = %resolved.view.name(),
                    status = res.status,
                    latency_us = start.elapsed().as_micros() as u64,
                    "Request handled"
                );
                Ok(res)
            }
            Err(panic) => {
                let panic_message = panic
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    request_id = %request_id,
                    view = %resolved.view.name(),
                    panic_message = %panic_message,
                    "View panicked"
                );
                Ok(Response::error(
                    500,
                    &format!("Handler panicked: {panic_message}"),
                ))
            }
        }
    }
}
