//! # Wrapper Module
//!
//! Wrappers are cross-cutting layers (authentication, logging, metrics)
//! placed between "a path matched" and "the view runs". A routing table binds
//! one [`WrapperChain`] to every route of a registration call; at dispatch the
//! chain is folded around the selected view.
//!
//! ## Ordering
//!
//! Given wrappers `[A, B]` and view `H`, execution is:
//!
//! ```text
//! A enter -> B enter -> H -> B exit -> A exit
//! ```
//!
//! ## Writing a wrapper
//!
//! ```rust
//! use verbrouter::wrapper::{wrap_fn, WrapperChain};
//!
//! let chain = WrapperChain::new().with(wrap_fn(|inner, req, args| {
//!     req.set_attribute("seen", serde_json::Value::Bool(true));
//!     inner(req, args)
//! }));
//! assert_eq!(chain.len(), 1);
//! ```

mod auth;
mod core;
mod metrics;
mod tracing;


pub use self::auth::AuthWrapper;
pub use self::core::{compose, wrap_fn, Wrapper, WrapperChain};
pub use self::metrics::MetricsWrapper;
pub use self::tracing::TracingWrapper;
