//! Name → view lookup used to resolve string view references.
//!
//! Routes may name their view (`"blog.archive"`) instead of holding it
//! directly. The routing table resolves names against a [`ViewRegistry`]
//! when the routes are registered, so a typo fails configuration rather than
//! the first request.

use std::collections::HashMap;
use tracing::{info, warn};

use crate::dispatcher::{Request, Response};
use crate::view::{CallArgs, View};

/// Registry of views addressable by their qualified name
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<String, View>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under its own name.
    ///
    /// If a view with the same name already exists, it is replaced.
    pub fn register_view(&mut self, view: View) {
        let name = view.name().to_string();
        if self.views.contains_key(&name) {
            warn!(view = %name, "Replaced existing view registration");
        }
        info!(
            view = %name,
            csrf_exempt = view.is_csrf_exempt(),
            total_views = self.views.len() + 1,
            "View registered"
        );
        self.views.insert(name, view);
    }

    /// Register a closure as a view named `name`
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut Request, &CallArgs) -> Response + Send + Sync + 'static,
    {
        self.register_view(View::new(name, handler));
    }

    /// Builder form of [`ViewRegistry::register_view`]
    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.register_view(view);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&View> {
        self.views.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Qualify a view name with a module-style prefix (`prefix.name`)
#[must_use]
pub fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{name}"),
        _ => name.to_string(),
    }
}
