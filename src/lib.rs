//! # verbrouter
//!
//! HTTP-verb dispatch and ordered handler wrapping on top of regex URL
//! patterns.
//!
//! ## Overview
//!
//! A path router that only looks at the path cannot send `GET /test` and
//! `POST /test` to different views. verbrouter adds that on top of ordinary
//! first-match-wins regex routing:
//!
//! - **Verb routes**: routes declared for one method that share pattern text
//!   within a registration call form a pattern group; the matched route picks
//!   the view for the request's effective method, or answers 405 with an
//!   `Allow` header
//! - **Method emulation**: a POST form may carry `_method=put` to reach a PUT
//!   view; only POST can be overridden
//! - **Wrapper chains**: every route of a registration call runs behind the
//!   same ordered list of wrappers, the first one outermost
//! - **Configured check**: routes that bypassed registration fail loudly when
//!   matched instead of silently skipping their wrappers
//!
//! ## Architecture
//!
//! - **[`router`]** - Routing tables, pattern groups, includes and reversal
//! - **[`pattern`]** - The path matcher contract and its regex implementation
//! - **[`method`]** - Effective method resolution
//! - **[`wrapper`]** - Wrapper trait, chain composition and bundled wrappers
//! - **[`dispatcher`]** - Request/response types and the host-facing dispatcher
//! - **[`view`]** - Views and call arguments
//! - **[`registry`]** - Named view lookup
//! - **[`config`]** / **[`logging`]** - Runtime configuration and tracing setup
//! - **[`cli`]** - The `verbrouter` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use verbrouter::dispatcher::{Dispatcher, Request, Response};
//! use verbrouter::router::{RouteEntry, RoutingTable};
//! use verbrouter::view::View;
//! use verbrouter::wrapper::WrapperChain;
//!
//! let mut table = RoutingTable::new();
//! table
//!     .register(
//!         vec![
//!             RouteEntry::verb(Method::GET, "^test$", View::new("h1", |_r, _a| Response::text("h1"))),
//!             RouteEntry::verb(Method::POST, "^test$", View::new("h2", |_r, _a| Response::text("h2"))),
//!         ],
//!         WrapperChain::new(),
//!     )
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::from_table(table);
//!
//! let mut req = Request::new(Method::POST, "/test");
//! assert_eq!(dispatcher.handle(&mut req).unwrap().text_body(), Some("h2"));
//!
//! let mut req = Request::new(Method::PUT, "/test");
//! assert_eq!(dispatcher.handle(&mut req).unwrap().status, 405);
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
mod echo;
pub mod error;
pub mod ids;
pub mod logging;
pub mod method;
pub mod pattern;
pub mod registry;
pub mod router;
pub mod view;
pub mod wrapper;

pub use config::RouterConfig;
pub use dispatcher::{Dispatcher, Request, Response};
pub use error::RouteError;
pub use ids::SessionId;
pub use method::{effective_method, MethodResolver};
pub use router::{ResolvedCall, RouteEntry, RoutingTable, SharedRoutingTable};
pub use view::{CallArgs, View};
pub use wrapper::{wrap_fn, Wrapper, WrapperChain};
