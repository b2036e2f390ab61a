//! # railyard
//!
//! A synchronous request-routing and middleware-dispatch core for HTTP
//! services. Given an incoming request's path and method, railyard selects
//! the best-matching route among those registered, extracts path variables,
//! and runs a cooperative middleware chain around the matched handler, with
//! hooks at fixed points before and after routing and before final output.
//!
//! It is deliberately not a web framework: there is no transport, no body
//! parsing, no content negotiation. The host owns the sockets and hands the
//! core an in-memory [`Request`]; the core hands back a finished
//! [`Response`].
//!
//! ## Architecture
//!
//! - **[`router`]** — route classification, matcher compilation, and path
//!   matching over four target kinds (static, prefix, template, pattern)
//! - **[`dispatcher`]** — sequential, continuation-passing execution of
//!   middleware chains, handlers, and method maps
//! - **[`middleware`]** — the [`Middleware`] trait and the built-in
//!   preparation hooks (content-length, HEAD body discard) plus request
//!   logging
//! - **[`pipeline`]** — the [`Pipeline`] orchestrator: registration surface,
//!   hook stages, status handlers, and the single point where typed HTTP
//!   errors become responses
//! - **[`message`]** — the [`Request`] and [`Response`] values the core
//!   consumes and produces, and a wire-form writer for hosts that want it
//!
//! ## Quick start
//!
//! ```
//! use http::Method;
//! use railyard::{handler, Pipeline, Request, Response};
//!
//! let mut pipeline = Pipeline::new();
//! pipeline
//!     .add_method(
//!         "/cats/{id}",
//!         "GET",
//!         handler(|req, res| {
//!             let id = req
//!                 .attribute("id")
//!                 .and_then(|v| v.as_str())
//!                 .unwrap_or("unknown");
//!             Ok(res
//!                 .with_status(200)
//!                 .with_body(format!("cat {id}").into_bytes()))
//!         }),
//!     )
//!     .unwrap();
//!
//! let res = pipeline.dispatch(Request::new(Method::GET, "/cats/42"), Response::ok(), None);
//! assert_eq!(res.status, 200);
//! assert_eq!(res.body, b"cat 42");
//! ```
//!
//! ## Target syntax
//!
//! | target             | kind     | behavior                               |
//! |--------------------|----------|----------------------------------------|
//! | `/cats/`           | static   | exact match, O(1)                      |
//! | `/cats/*`          | prefix   | longest registered prefix wins         |
//! | `/cats/{id}`       | template | `{id}` binds a path variable           |
//! | `~/cats/([0-9]+)~` | pattern  | delimited regex, matched in order      |
//!
//! ## Concurrency
//!
//! Each dispatch is synchronous and single-threaded; there is no internal
//! queuing or suspension. Register routes once at startup, then share the
//! pipeline freely across concurrently processed requests — the routing
//! tables are read-only during request processing.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod middleware;
pub mod pipeline;
pub mod router;

pub use config::{PipelineConfig, DEFAULT_VAR_PATTERN};
pub use dispatcher::{dispatch, handler, Dispatchable, Handler, MethodMap, Next};
pub use error::{HttpError, RouteError};
pub use message::{write_response, HeaderVec, Request, Response};
pub use middleware::Middleware;
pub use pipeline::Pipeline;
pub use router::{Route, RouteKind, RouteMatch, Router};
