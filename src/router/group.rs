use http::Method;
use std::collections::HashMap;
use tracing::debug;

use crate::ids::SessionId;
use crate::view::{Kwargs, View};

/// View and per-method default arguments registered in a [`PatternGroup`]
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub view: View,
    pub default_args: Kwargs,
}

/// Method table shared by the routes of one registration call whose pattern
/// text is identical.
///
/// Path matching ignores the method, so only the first of those routes is
/// ever matched; the group lets that match still reach the view declared
/// for the request's method.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    session: SessionId,
    pattern_key: String,
    callbacks: HashMap<Method, GroupRecord>,
    // Registration order, for a stable Allow header
    order: Vec<Method>,
}

impl PatternGroup {
    #[must_use]
    pub fn new(session: SessionId, pattern_key: &str) -> Self {
        Self {
            session,
            pattern_key: pattern_key.to_string(),
            callbacks: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register `view` for `method` unless the method is already present.
    ///
    /// The first registration wins; a later one for the same method is
    /// dropped. Returns whether the view was stored.
    pub fn add_method(&mut self, method: Method, view: View, default_args: Kwargs) -> bool {
        if self.callbacks.contains_key(&method) {
            debug!(
                session = %self.session,
                pattern = %self.pattern_key,
                method = %method,
                dropped_view = %view.name(),
                "Duplicate method registration ignored"
            );
            return false;
        }
        self.order.push(method.clone());
        self.callbacks.insert(method, GroupRecord { view, default_args });
        true
    }

    /// Record registered for `method`, if any
    #[must_use]
    pub fn dispatch(&self, method: &Method) -> Option<&GroupRecord> {
        self.callbacks.get(method)
    }

    /// Methods in registration order
    #[must_use]
    pub fn allowed_methods(&self) -> &[Method] {
        &self.order
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn pattern_key(&self) -> &str {
        &self.pattern_key
    }
}
