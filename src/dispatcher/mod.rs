//! # Dispatcher Module
//!
//! Request and response types plus the host-facing [`Dispatcher`].
//!
//! ## Request Flow
//!
//! 1. The request path is resolved against the current routing table
//! 2. No match gives a 404 response
//! 3. The matched view runs behind its wrapper chain; method-specific
//!    routes pick their view from the effective method or answer 405
//! 4. A panicking view gives a 500 response
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
//!         vec![RouteEntry::url("^ping$", View::new("ping", |_req, _args| Response::text("pong")))],
//!         WrapperChain::new(),
//!     )
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::from_table(table);
//! let mut req = Request::new(Method::GET, "/ping");
//! assert_eq!(dispatcher.handle(&mut req).unwrap().text_body(), Some("pong"));
//! let mut req = Request::new(Method::GET, "/nothing");
//! assert_eq!(dispatcher.handle(&mut req).unwrap().status, 404);
//! ```

mod core;
mod request;
mod response;


pub use self::core::{generate_request_id, Dispatcher, REQUEST_ID_ATTRIBUTE};
pub use self::request::{
    parse_form_fields, FieldVec, HeaderVec, Request, MAX_INLINE_FIELDS, MAX_INLINE_HEADERS,
};
pub use self::response::{status_reason, Response};
