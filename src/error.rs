use std::fmt;

/// Routing configuration and resolution error
///
/// Configuration-time variants abort `RoutingTable::register`; `NotConfigured`
/// surfaces at request time when a route never went through `register`.
/// A method mismatch is not an error: it is a 405 [`Response`](crate::dispatcher::Response).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A matched route was never bound to a wrapper chain and session
    NotConfigured {
        /// Raw pattern text of the unbound route
        pattern: String,
    },
    /// A route was declared with an empty view name
    EmptyViewReference {
        /// Raw pattern text of the offending route
        pattern: String,
    },
    /// A named view reference is not present in the view registry
    UnknownView {
        /// Raw pattern text of the offending route
        pattern: String,
        /// Fully qualified view name that failed to resolve
        view: String,
    },
    /// The pattern text is not a valid regular expression
    InvalidPattern {
        /// Raw pattern text
        pattern: String,
        /// Compiler message
        message: String,
    },
    /// No route could be reversed for the given name and arguments
    NoReverseMatch {
        /// Route name or qualified view name used for the lookup
        lookup: String,
    },
}

impl RouteError {
    /// Whether this error was raised while building the routing table
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RouteError::EmptyViewReference { .. }
                | RouteError::UnknownView { .. }
                | RouteError::InvalidPattern { .. }
        )
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotConfigured { pattern } => write!(
                f,
                "Route {pattern:?} is not configured: routes must be added through \
                 RoutingTable::register to be resolvable"
            ),
            RouteError::EmptyViewReference { pattern } => write!(
                f,
                "Empty view name not permitted (for pattern {pattern:?})"
            ),
            RouteError::UnknownView { pattern, view } => write!(
                f,
                "View {view:?} is not registered (for pattern {pattern:?})"
            ),
            RouteError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern {pattern:?}: {message}")
            }
            RouteError::NoReverseMatch { lookup } => {
                write!(f, "Reverse for {lookup:?} not found")
            }
        }
    }
}

impl std::error::Error for RouteError {}
