//! # Router Module
//!
//! Maps request paths to views, with one path able to dispatch to a
//! different view per HTTP method.
//!
//! ## Overview
//!
//! Path resolution happens before the request method is considered: routes
//! are regular expressions tried in declaration order and the first match
//! wins. To still let `GET /test` and `POST /test` reach different views,
//! method-specific routes registered together with identical pattern text
//! share a [`PatternGroup`]. Whichever of them matches, the group picks the
//! view for the request's effective method at call time, or answers 405.
//!
//! Each [`RoutingTable::register`] call is its own session: patterns
//! registered by different calls, or by an included table, never share a
//! group even when their text is identical.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use verbrouter::dispatcher::{Request, Response};
//! use verbrouter::router::{RouteEntry, RoutingTable};
//! use verbrouter::view::View;
//! use verbrouter::wrapper::WrapperChain;
//!
//! let show = View::new("show", |_req, _args| Response::text("GET"));
//! let update = View::new("update", |_req, _args| Response::text("POST"));
//!
//! let mut table = RoutingTable::new();
//! table
//!     .register(
//!         vec![
//!             RouteEntry::verb(Method::GET, "^test$", show),
//!             RouteEntry::verb(Method::POST, "^test$", update),
//!         ],
//!         WrapperChain::new(),
//!     )
//!     .unwrap();
//!
//! let call = table.resolve("/test").unwrap().unwrap();
//! let mut req = Request::new(Method::POST, "/test");
//! assert_eq!(call.call(&mut req).text_body(), Some("POST"));
//!
//! let mut req = Request::new(Method::PUT, "/test");
//! assert_eq!(call.call(&mut req).status, 405);
//! ```

mod core;
mod group;
mod route;
mod shared;


pub use self::core::{ResolvedCall, ResolvedView, RouteInfo, RoutingTable};
pub use self::group::{GroupRecord, PatternGroup};
pub use self::route::{RouteEntry, ViewRef};
pub use self::shared::SharedRoutingTable;
