use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::request::HeaderVec;

/// Response produced by views, wrappers and the dispatcher
///
/// Contains the HTTP status code, headers, and JSON body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Response {
    /// HTTP status code (200, 404, 405, ...)
    pub status: u16,
    /// HTTP response headers
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl Response {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a 200 plain text response
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "text/plain".to_string()));
        Self {
            status: 200,
            headers,
            body: Value::String(body.into()),
        }
    }

    /// Create an error response
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// 405 with an `Allow` header listing the methods that would have matched
    #[must_use]
    pub fn method_not_allowed<'a, I>(allowed: I) -> Self
    where
        I: IntoIterator<Item = &'a Method>,
    {
        let allow = allowed
            .into_iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let mut res = Self::error(405, "Method Not Allowed");
        res.set_header("allow", allow);
        res
    }

    /// Body as text, if the view returned a string body
    #[must_use]
    pub fn text_body(&self) -> Option<&str> {
        self.body.as_str()
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Canonical reason phrase for the status codes this crate produces
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}
