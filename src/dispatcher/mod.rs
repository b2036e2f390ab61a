//! # Dispatcher Module
//!
//! Executes ordered sequences of dispatchables — middleware, handlers,
//! method maps, pre-built responses — against a request/response pair.
//!
//! ## Execution model
//!
//! Dispatch is strictly sequential and cooperative. Each element of a chain
//! receives the current request/response pair plus a [`Next`] continuation
//! representing the rest of the chain. An element may:
//!
//! - call the continuation and pass the exchange along,
//! - return a response without calling it, stopping the chain there, or
//! - return an error (`HttpError`), which surfaces to the pipeline boundary.
//!
//! There is no queuing, suspension, or internal concurrency: each element
//! completes before the next begins, on the calling thread.
//!
//! ## Method maps
//!
//! A [`MethodMap`] dispatchable selects its handler by the request's verb,
//! validated and uppercased at registration. Unmapped verbs produce a 405
//! response with an `Allow` header listing what the resource supports.

mod core;

pub use core::{dispatch, handler, Dispatchable, Handler, HandlerFn, MethodMap, Next, TailFn};
