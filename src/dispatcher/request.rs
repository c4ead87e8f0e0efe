use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Maximum inline form/query fields before heap allocation
pub const MAX_INLINE_FIELDS: usize = 8;

/// Stack-allocated header storage
///
/// Header names use `Arc<str>` so repeated names clone in O(1).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Stack-allocated storage for decoded `application/x-www-form-urlencoded` pairs
pub type FieldVec = SmallVec<[(String, String); MAX_INLINE_FIELDS]>;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request seen by wrappers and views.
///
/// Wrappers may attach computed values through [`Request::set_attribute`]
/// before delegating; inner wrappers and the view observe them.
#[derive(Debug, Clone)]
pub struct Request {
    /// Raw HTTP method as received
    pub method: Method,
    /// Request path without query string
    pub path: String,
    /// HTTP headers (case-insensitive lookup)
    pub headers: HeaderVec,
    /// Decoded query string parameters
    pub query_params: FieldVec,
    /// Decoded form body, populated only for form-encoded bodies
    pub form: FieldVec,
    /// Values attached by wrappers during dispatch
    pub attributes: HashMap<String, Value>,
}

impl Request {
    /// Build a request from a method and a request target (`/path?query`)
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        Self {
            method,
            path: path.to_string(),
            headers: HeaderVec::new(),
            query_params: parse_form_fields(query),
            form: FieldVec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Build a request from a method name; the name is upper-cased first.
    ///
    /// Returns `None` when the name is not a valid HTTP method token.
    #[must_use]
    pub fn with_method_name(method: &str, target: &str) -> Option<Self> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes()).ok()?;
        Some(Self::new(method, target))
    }

    /// Add a header, replacing any existing header with the same name
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value.into());
        self
    }

    /// Attach a form-encoded body
    #[must_use]
    pub fn with_form_body(mut self, body: &str) -> Self {
        self.set_header("content-type", FORM_CONTENT_TYPE.to_string());
        self.form = parse_form_fields(body);
        self
    }

    /// Attach a raw body. Only form-encoded bodies are decoded; other
    /// content types leave [`Request::form`] empty.
    #[must_use]
    pub fn with_body(mut self, content_type: &str, body: &str) -> Self {
        self.set_header("content-type", content_type.to_string());
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if essence.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
            self.form = parse_form_fields(body);
        } else {
            debug!(content_type = %content_type, "Body is not form-encoded, skipping decode");
            self.form.clear();
        }
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
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
        self.headers.push((Arc::from(name.to_ascii_lowercase()), value));
    }

    /// Get a decoded form field
    ///
    /// Uses "last write wins" semantics for repeated fields.
    #[inline]
    #[must_use]
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter ("last write wins")
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attach a value for inner wrappers and the view
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Decode `a=1&b=2` pairs, preserving order and duplicates.
#[must_use]
pub fn parse_form_fields(encoded: &str) -> FieldVec {
    url::form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
