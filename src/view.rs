//! Views, handler callables and the arguments they are invoked with.

use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatcher::{Request, Response};

/// Maximum number of positional captures before heap allocation
pub const MAX_INLINE_ARGS: usize = 8;

/// Positional arguments captured from unnamed pattern groups.
///
/// A group that did not participate in the match is `Value::Null`.
pub type ArgVec = SmallVec<[Value; MAX_INLINE_ARGS]>;

/// Keyword arguments: named captures merged with static default arguments
pub type Kwargs = BTreeMap<String, Value>;

/// A callable taking the request and its resolved arguments.
///
/// Views and composed wrapper chains share this shape.
pub type Handler = Arc<dyn Fn(&mut Request, &CallArgs) -> Response + Send + Sync>;

/// Arguments a resolved view is called with
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallArgs {
    pub positional: ArgVec,
    pub keyword: Kwargs,
}

impl CallArgs {
    #[must_use]
    pub fn new(positional: ArgVec, keyword: Kwargs) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    /// Keyword argument as a string slice
    #[must_use]
    pub fn kwarg_str(&self, key: &str) -> Option<&str> {
        self.keyword.get(key).and_then(Value::as_str)
    }

    /// Merge `defaults` into the keyword arguments, overwriting same-named keys.
    pub fn apply_defaults(&mut self, defaults: &Kwargs) {
        for (k, v) in defaults {
            self.keyword.insert(k.clone(), v.clone());
        }
    }
}

/// A named handler plus its capability flags.
///
/// `csrf_exempt` travels with the handler so the host can inspect a resolved
/// route without invoking it.
#[derive(Clone)]
pub struct View {
    name: Arc<str>,
    handler: Handler,
    csrf_exempt: bool,
}

impl View {
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut Request, &CallArgs) -> Response + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            handler: Arc::new(handler),
            csrf_exempt: false,
        }
    }

    /// Mark the view as exempt from CSRF checks
    #[must_use]
    pub fn csrf_exempt(mut self) -> Self {
        self.csrf_exempt = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_csrf_exempt(&self) -> bool {
        self.csrf_exempt
    }

    #[must_use]
    pub fn handler(&self) -> Handler {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("csrf_exempt", &self.csrf_exempt)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;

    #[test]
    fn test_defaults_overwrite_captures() {
        let mut args = CallArgs::default();
        args.keyword.insert("key".into(), json!("captured"));
        args.keyword.insert("other".into(), json!("kept"));
        let mut defaults = Kwargs::new();
        defaults.insert("key".into(), json!("default"));
        args.apply_defaults(&defaults);
        assert_eq!(args.kwarg_str("key"), Some("default"));
        assert_eq!(args.kwarg_str("other"), Some("kept"));
    }

    #[test]
    fn test_view_flags_and_call() {
        let view = View::new("tests.ok", |_req, _args| Response::text("OK")).csrf_exempt();
        assert!(view.is_csrf_exempt());
        assert_eq!(view.name(), "tests.ok");
        let mut req = Request::new(Method::GET, "/");
        let res = (view.handler())(&mut req, &CallArgs::default());
        assert_eq!(res.text_body(), Some("OK"));
    }
}
