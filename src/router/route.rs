use http::Method;
use serde_json::Value;

use crate::view::{Kwargs, View};

/// How a route names its view
#[derive(Debug, Clone)]
pub enum ViewRef {
    /// Qualified name looked up in the table's view registry
    Named(String),
    /// The view itself
    Direct(View),
}

impl From<View> for ViewRef {
    fn from(view: View) -> Self {
        ViewRef::Direct(view)
    }
}

impl From<&str> for ViewRef {
    fn from(name: &str) -> Self {
        ViewRef::Named(name.to_string())
    }
}

impl From<String> for ViewRef {
    fn from(name: String) -> Self {
        ViewRef::Named(name)
    }
}

/// A single declared route.
///
/// Built with [`RouteEntry::url`] (any method) or [`RouteEntry::verb`]
/// (one method); handed to [`RoutingTable::register`](super::RoutingTable::register).
///
/// ```rust
/// use http::Method;
/// use verbrouter::router::RouteEntry;
///
/// let entry = RouteEntry::verb(Method::GET, "^kwarg", "kwarg_view")
///     .default_arg("key", "get view")
///     .name("kwarg-get");
/// assert_eq!(entry.pattern(), "^kwarg");
/// assert_eq!(entry.method(), Some(&Method::GET));
/// assert_eq!(entry.default_args()["key"], "get view");
/// ```
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub(crate) pattern: String,
    pub(crate) method: Option<Method>,
    pub(crate) view: ViewRef,
    pub(crate) default_args: Kwargs,
    pub(crate) name: Option<String>,
    pub(crate) prefix: Option<String>,
}

impl RouteEntry {
    /// Route dispatching every method to `view`
    pub fn url(pattern: &str, view: impl Into<ViewRef>) -> Self {
        Self {
            pattern: pattern.to_string(),
            method: None,
            view: view.into(),
            default_args: Kwargs::new(),
            name: None,
            prefix: None,
        }
    }

    /// Route dispatching only `method` to `view`; other methods declared on
    /// the same pattern text in the same registration share the path.
    pub fn verb(method: Method, pattern: &str, view: impl Into<ViewRef>) -> Self {
        Self {
            method: Some(method),
            ..Self::url(pattern, view)
        }
    }

    /// Static keyword arguments passed to the view on every call
    #[must_use]
    pub fn kwargs(mut self, kwargs: Kwargs) -> Self {
        self.default_args = kwargs;
        self
    }

    /// Add one static keyword argument
    #[must_use]
    pub fn default_arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.default_args.insert(key.to_string(), value.into());
        self
    }

    /// Name used for reverse lookup
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Module-style prefix joined to a named view reference (`prefix.view`)
    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    #[must_use]
    pub fn default_args(&self) -> &Kwargs {
        &self.default_args
    }
}
