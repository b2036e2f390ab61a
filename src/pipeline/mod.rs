//! # Pipeline Module
//!
//! The [`Pipeline`] is the registration surface and the dispatch
//! orchestrator: it owns the route table, the router-level middleware stack,
//! the hook lists, and the status handlers, and runs every exchange through
//! a fixed sequence of stages with no branching back.
//!
//! ## Stage order
//!
//! 1. **Pre-route hooks** — run before matching; request augmentations are
//!    visible to the router and everything after it.
//! 2. **Route-table dispatch** — match, bind path variables, run the
//!    router-level middleware around the matched route. Typed HTTP errors
//!    convert to error responses at this boundary; a miss produces a 404 or,
//!    when configured, hands off to the caller's continuation.
//! 3. **Status handler** — the dispatchable registered for the response's
//!    current status code, if any.
//! 4. **Post-route hooks** — always run, routing outcome notwithstanding.
//! 5. **Response-preparation hooks** — always run; the structural defaults
//!    (content-length, HEAD body discard) come last.

mod core;

pub use core::Pipeline;
