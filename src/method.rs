//! # Effective Method Resolution
//!
//! HTML forms can only issue GET and POST. To reach PUT, DELETE and friends
//! from a browser form, a POST may carry a form field (by default `_method`)
//! naming the method it stands in for:
//!
//! ```html
//! <form method="post">
//!   <input type="text" name="name" value="value" />
//!   <button type="submit" name="_method" value="put">Update</button>
//! </form>
//! ```
//!
//! Only POST may be overridden. A GET must never impersonate a mutating
//! method: CSRF protection is keyed to POST, and GET is required to be safe.

use http::method::InvalidMethod;
use http::Method;
use std::sync::Arc;
use tracing::debug;

use crate::dispatcher::Request;

/// Default name of the form field carrying the emulated method
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Computes the method a request is dispatched on.
#[derive(Debug, Clone)]
pub struct MethodResolver {
    override_field: Arc<str>,
}

impl Default for MethodResolver {
    fn default() -> Self {
        Self::new(METHOD_OVERRIDE_FIELD)
    }
}

impl MethodResolver {
    #[must_use]
    pub fn new(override_field: &str) -> Self {
        Self {
            override_field: Arc::from(override_field),
        }
    }

    #[must_use]
    pub fn override_field(&self) -> &str {
        &self.override_field
    }

    /// Effective upper-case method of `req`.
    ///
    /// Fails only when a POST override names something that is not an HTTP
    /// method token.
    pub fn effective_method(&self, req: &Request) -> Result<Method, InvalidMethod> {
        if req.method == Method::POST {
            if let Some(emulated) = req.form_value(&self.override_field) {
                let method = Method::from_bytes(emulated.to_ascii_uppercase().as_bytes())?;
                debug!(
                    raw_method = %req.method,
                    effective_method = %method,
                    "Method override applied"
                );
                return Ok(method);
            }
        }
        Ok(req.method.clone())
    }
}

/// Effective method using the default `_method` override field
pub fn effective_method(req: &Request) -> Result<Method, InvalidMethod> {
    MethodResolver::default().effective_method(req)
}
