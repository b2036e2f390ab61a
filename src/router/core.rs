use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::DEFAULT_VAR_PATTERN;
use crate::dispatcher::{Dispatchable, Handler, MethodMap};
use crate::error::RouteError;
use crate::router::factory::RouteFactory;
use crate::router::route::{Route, RouteKind};

/// Maximum number of path variables before heap allocation. Most routes bind
/// one or two, so extraction stays on the stack.
pub const MAX_INLINE_VARS: usize = 8;

/// Stack-allocated storage for extracted path variables. Names come from the
/// compiled route and clone in O(1) (`Arc<str>`); values are per-request.
pub type VarVec = SmallVec<[(Arc<str>, String); MAX_INLINE_VARS]>;

/// Index of a route in the table's arena.
pub type RouteId = usize;

/// Result of successfully matching a request path against the table.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    pub route_id: RouteId,
    /// Variables extracted from the matched template or pattern; empty for
    /// static and prefix matches.
    pub vars: VarVec,
}

impl RouteMatch<'_> {
    /// Get an extracted variable by name.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The route table: owns every registered route, indexed by kind.
///
/// Registration happens once at startup; matching is read-only, so a table
/// behind an `Arc` is safe to share across concurrently processed requests
/// without locking as long as `add` is not invoked concurrently with lookups.
///
/// Each route lives in exactly one of the three kind indices — the static
/// map, the prefix map, or the ordered pattern list — and always in the
/// by-target map used to deduplicate re-registration.
pub struct Router {
    factory: RouteFactory,
    routes: Vec<Route>,
    by_target: HashMap<Arc<str>, RouteId>,
    static_index: HashMap<Arc<str>, RouteId>,
    prefix_index: HashMap<Arc<str>, RouteId>,
    /// Template and Pattern routes in registration order. The order is a
    /// correctness guarantee: the first registered pattern that matches wins.
    pattern_order: Vec<RouteId>,
}

impl Router {
    pub fn new() -> Self {
        Self::with_default_pattern(DEFAULT_VAR_PATTERN)
    }

    /// A router whose template variables match `default_var_pattern` unless a
    /// per-variable pattern is supplied at registration.
    pub fn with_default_pattern(default_var_pattern: &str) -> Self {
        Self {
            factory: RouteFactory::new(default_var_pattern),
            routes: Vec::new(),
            by_target: HashMap::new(),
            static_index: HashMap::new(),
            prefix_index: HashMap::new(),
            pattern_order: Vec::new(),
        }
    }

    /// Register a target with its dispatch target.
    ///
    /// Re-registering an existing target is idempotent with respect to the
    /// route itself: the original `Route` (and its compiled matcher) is kept.
    /// When both the existing and the incoming dispatchable are method maps
    /// they merge, which is how method variants accumulate across calls;
    /// otherwise the incoming dispatchable replaces the old one.
    pub fn add(
        &mut self,
        target: &str,
        dispatchable: Dispatchable,
    ) -> Result<RouteId, RouteError> {
        self.add_with_patterns(target, dispatchable, &HashMap::new())
    }

    /// Like [`Router::add`], with per-variable patterns for template targets.
    pub fn add_with_patterns(
        &mut self,
        target: &str,
        dispatchable: Dispatchable,
        var_patterns: &HashMap<String, String>,
    ) -> Result<RouteId, RouteError> {
        if let Some(&id) = self.by_target.get(target) {
            Self::merge_dispatchable(&mut self.routes[id], dispatchable)?;
            debug!(target, route_id = id, "existing route augmented");
            return Ok(id);
        }

        let route = self.factory.create(target, dispatchable, var_patterns)?;
        let id = self.routes.len();
        let key = Arc::clone(&route.target);
        match route.kind() {
            RouteKind::Static => {
                self.static_index.insert(Arc::clone(&key), id);
            }
            RouteKind::Prefix => {
                let prefix = target.strip_suffix('*').unwrap_or(target);
                self.prefix_index.insert(Arc::from(prefix), id);
            }
            RouteKind::Template | RouteKind::Pattern => {
                self.pattern_order.push(id);
            }
        }
        self.by_target.insert(key, id);
        info!(target, kind = ?route.kind(), route_id = id, "route registered");
        self.routes.push(route);
        Ok(id)
    }

    /// Register one handler under one or more verbs for a target.
    ///
    /// `verbs` is a comma-separated list (`"GET"`, `"GET, POST"`, `"*"`);
    /// each token is validated and normalized to an uppercase verb. Repeated
    /// calls against the same target accumulate into one method map, so a
    /// duplicated verb across calls fails like one within a single call.
    pub fn add_method(
        &mut self,
        target: &str,
        verbs: &str,
        handler: Handler,
    ) -> Result<RouteId, RouteError> {
        let mut map = MethodMap::new();
        for verb in verbs.split(',') {
            map.insert(verb.trim(), Arc::clone(&handler))?;
        }
        self.add(target, Dispatchable::MethodMap(map))
    }

    fn merge_dispatchable(
        route: &mut Route,
        incoming: Dispatchable,
    ) -> Result<(), RouteError> {
        match (&mut route.dispatchable, incoming) {
            (Dispatchable::MethodMap(existing), Dispatchable::MethodMap(incoming)) => {
                existing.merge(incoming)
            }
            (slot, incoming) => {
                *slot = incoming;
                Ok(())
            }
        }
    }

    /// Match a request path against the table.
    ///
    /// Evaluation order, first match wins: exact static lookup, then the
    /// longest matching prefix, then the pattern routes in registration
    /// order. Returns `None` when nothing matches; the caller decides what a
    /// miss means.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        debug!(path, "route match attempt");

        if let Some(&id) = self.static_index.get(path) {
            debug!(path, route_id = id, "static route matched");
            return Some(self.matched(id, VarVec::new()));
        }

        // Longest prefix wins. Two prefixes of equal length tie on hash-map
        // iteration order; which wins is deliberately unspecified.
        let mut best: Option<(usize, RouteId)> = None;
        for (prefix, &id) in &self.prefix_index {
            if path.starts_with(prefix.as_ref()) {
                match best {
                    Some((len, _)) if len >= prefix.len() => {}
                    _ => best = Some((prefix.len(), id)),
                }
            }
        }
        if let Some((_, id)) = best {
            debug!(path, route_id = id, "prefix route matched");
            return Some(self.matched(id, VarVec::new()));
        }

        for &id in &self.pattern_order {
            if let Some(vars) = self.routes[id].match_vars(path) {
                debug!(path, route_id = id, vars = vars.len(), "pattern route matched");
                return Some(self.matched(id, vars));
            }
        }

        debug!(path, "no route matched");
        None
    }

    fn matched(&self, id: RouteId, vars: VarVec) -> RouteMatch<'_> {
        RouteMatch {
            route: &self.routes[id],
            route_id: id,
            vars,
        }
    }

    /// Look up a registered route by its original target string.
    pub fn route_for_target(&self, target: &str) -> Option<&Route> {
        self.by_target.get(target).map(|&id| &self.routes[id])
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
