//! # Router Module
//!
//! Route classification, compilation, and path matching.
//!
//! ## Target syntax
//!
//! A registration target is a string in a small mini-language; the
//! [`RouteFactory`] classifies it once, at registration:
//!
//! | target            | kind     | matches                                |
//! |-------------------|----------|----------------------------------------|
//! | `/cats/`          | Static   | exactly `/cats/`                       |
//! | `/cats/*`         | Prefix   | any path starting with `/cats/`        |
//! | `/cats/{id}`      | Template | `/cats/42`, binding `id = "42"`        |
//! | `~/cats/([0-9]+)~`| Pattern  | the delimited regex, anchored          |
//!
//! ## Matching
//!
//! Template and Pattern targets compile to anchored regexes once; the
//! compiled matcher is reused for every request. Lookup tries the static
//! index first (O(1)), then the longest matching prefix, then the pattern
//! routes in registration order — the first registered pattern that matches
//! wins, and that ordering is part of the contract.

mod core;
mod factory;
mod route;
#[cfg(test)]
mod tests;

pub use core::{RouteId, RouteMatch, Router, VarVec, MAX_INLINE_VARS};
pub use factory::RouteFactory;
pub use route::{Route, RouteKind};
