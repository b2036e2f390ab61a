use std::sync::Arc;

use regex::Regex;

use crate::dispatcher::Dispatchable;
use crate::router::core::VarVec;

/// Classification of a registered target, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Exact path, e.g. `/cats/`.
    Static,
    /// Trailing-wildcard prefix, e.g. `/cats/*`.
    Prefix,
    /// URI template with `{name}` variables, e.g. `/cats/{id}`.
    Template,
    /// Delimited regular expression, e.g. `~/cats/([0-9]+)~`.
    Pattern,
}

/// A compiled matcher for Template and Pattern routes.
///
/// Compiled once at registration and reused for every request; variable names
/// are `Arc<str>` so each match clones them in O(1).
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    pub(crate) regex: Regex,
    pub(crate) var_names: Vec<Arc<str>>,
}

/// A single registered path-matching rule bound to a dispatch target.
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) target: Arc<str>,
    pub(crate) kind: RouteKind,
    pub(crate) matcher: Option<CompiledMatcher>,
    pub(crate) dispatchable: Dispatchable,
}

impl Route {
    /// The raw registration string.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn dispatchable(&self) -> &Dispatchable {
        &self.dispatchable
    }

    /// Run the compiled matcher against a request path. Only meaningful for
    /// Template and Pattern routes; the table handles the other kinds through
    /// its indices.
    pub(crate) fn match_vars(&self, path: &str) -> Option<VarVec> {
        let matcher = self.matcher.as_ref()?;
        let caps = matcher.regex.captures(path)?;
        let vars = matcher
            .var_names
            .iter()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (Arc::clone(name), m.as_str().to_string()))
            })
            .collect();
        Some(vars)
    }
}
