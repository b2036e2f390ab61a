use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::dispatcher::{dispatch, Dispatchable, Handler, TailFn};
use crate::error::{HttpError, RouteError};
use crate::message::{Request, Response};
use crate::middleware::{ContentLengthMiddleware, HeadMiddleware, Middleware};
use crate::router::{RouteId, Router, VarVec};

/// The hook-orchestrating front of the routing core.
///
/// Owns the route table, the router-level middleware stack, the hook lists,
/// and the status handlers, and runs every exchange through the fixed stage
/// order:
///
/// ```text
/// pre-route hooks → route-table dispatch → status handler
///                 → post-route hooks → response-preparation hooks
/// ```
///
/// A typed [`HttpError`] surfacing from any stage is converted into an error
/// response here — exactly once — and never propagates further; the stages
/// after the conversion still run. Anything that panics is not caught.
///
/// Two response-preparation hooks are installed by default: one that sets
/// `Content-Length` from the final body size and one that discards HEAD
/// response bodies. They run after any caller-registered preparation hooks
/// and can be removed wholesale with
/// [`disable_default_preparation`](Pipeline::disable_default_preparation).
pub struct Pipeline {
    router: Router,
    config: PipelineConfig,
    middleware: Vec<Dispatchable>,
    pre_route: Vec<Dispatchable>,
    post_route: Vec<Dispatchable>,
    preparation: Vec<Dispatchable>,
    default_preparation: Vec<Dispatchable>,
    status_handlers: HashMap<u16, Dispatchable>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            router: Router::with_default_pattern(&config.default_var_pattern),
            config,
            middleware: Vec::new(),
            pre_route: Vec::new(),
            post_route: Vec::new(),
            preparation: Vec::new(),
            default_preparation: vec![
                Dispatchable::Middleware(Arc::new(ContentLengthMiddleware)),
                Dispatchable::Middleware(Arc::new(HeadMiddleware)),
            ],
            status_handlers: HashMap::new(),
        }
    }

    /// Register a target with its dispatch target. See [`Router::add`].
    pub fn add(
        &mut self,
        target: &str,
        dispatchable: Dispatchable,
    ) -> Result<RouteId, RouteError> {
        self.router.add(target, dispatchable)
    }

    /// Register a target with per-variable template patterns.
    pub fn add_with_patterns(
        &mut self,
        target: &str,
        dispatchable: Dispatchable,
        var_patterns: &HashMap<String, String>,
    ) -> Result<RouteId, RouteError> {
        self.router.add_with_patterns(target, dispatchable, var_patterns)
    }

    /// Register a handler under a comma-separated verb list for a target.
    /// See [`Router::add_method`].
    pub fn add_method(
        &mut self,
        target: &str,
        verbs: &str,
        handler: Handler,
    ) -> Result<RouteId, RouteError> {
        self.router.add_method(target, verbs, handler)
    }

    /// Append to the router-level middleware stack. These run around every
    /// matched route, in registration order, before the route's own
    /// dispatchable.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middleware.push(Dispatchable::Middleware(mw));
    }

    /// Append a hook that runs before route matching. Request values the hook
    /// passes to its continuation are what the router matches against.
    pub fn add_pre_route_hook(&mut self, mw: Arc<dyn Middleware>) {
        self.pre_route.push(Dispatchable::Middleware(mw));
    }

    /// Append a hook that runs after routing, whatever the routing outcome.
    pub fn add_post_route_hook(&mut self, mw: Arc<dyn Middleware>) {
        self.post_route.push(Dispatchable::Middleware(mw));
    }

    /// Append a response-preparation hook. Caller hooks run before the two
    /// structural defaults.
    pub fn add_preparation_hook(&mut self, mw: Arc<dyn Middleware>) {
        self.preparation.push(Dispatchable::Middleware(mw));
    }

    /// Remove the default content-length and HEAD preparation hooks.
    pub fn disable_default_preparation(&mut self) {
        self.default_preparation.clear();
    }

    /// Bind a dispatchable to a status code; it runs whenever routing leaves
    /// that code on the response.
    pub fn set_status_handler(&mut self, status: u16, dispatchable: Dispatchable) {
        self.status_handlers.insert(status, dispatchable);
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one exchange through the pipeline.
    ///
    /// `tail` is the caller's continuation — the stage of the host's own
    /// processing that follows this pipeline. It runs when a matched chain
    /// passes all the way through, and, with
    /// [`continue_on_not_found`](PipelineConfig::continue_on_not_found) set,
    /// exactly once on a routing miss.
    pub fn dispatch(
        &self,
        req: Request,
        res: Response,
        tail: Option<&TailFn<'_>>,
    ) -> Response {
        // Pre-route hooks. A hook that declines to continue ends routing but
        // not the later stages.
        let (req, res, proceed) = run_stage(&self.pre_route, req, res);

        let res = if proceed {
            match self.route_dispatch(&req, res, tail) {
                Ok(res) => res,
                Err(err) => {
                    info!(
                        status = err.status,
                        error = %err.message,
                        "dispatch raised HTTP error"
                    );
                    err.into_response()
                }
            }
        } else {
            debug!("pre-route hook ended the exchange before routing");
            res
        };

        // Status handler, at most once per exchange.
        let res = match self.status_handlers.get(&res.status) {
            Some(handler) => {
                debug!(status = res.status, "status handler invoked");
                match dispatch(std::slice::from_ref(handler), req.clone(), res, None) {
                    Ok(res) => res,
                    Err(err) => err.into_response(),
                }
            }
            None => res,
        };

        let (req, res, _) = run_stage(&self.post_route, req, res);

        let preparation: Vec<Dispatchable> = self
            .preparation
            .iter()
            .chain(self.default_preparation.iter())
            .cloned()
            .collect();
        let (_, res, _) = run_stage(&preparation, req, res);
        res
    }

    /// Match the request and dispatch the effective chain for the matched
    /// route: the router-level middleware stack, then the route itself. With
    /// no stack registered the route is invoked directly — behaviorally the
    /// same, without building a chain.
    fn route_dispatch(
        &self,
        req: &Request,
        res: Response,
        tail: Option<&TailFn<'_>>,
    ) -> Result<Response, HttpError> {
        let Some(matched) = self.router.match_path(req.path()) else {
            if self.config.continue_on_not_found {
                debug!(path = %req.path(), "no route matched, continuing to caller chain");
                return match tail {
                    Some(f) => f(req.clone(), res),
                    None => Ok(res),
                };
            }
            debug!(path = %req.path(), "no route matched");
            return Ok(Response::error(404, "Not Found"));
        };

        info!(
            path = %req.path(),
            target = matched.route.target(),
            kind = ?matched.route.kind(),
            vars = matched.vars.len(),
            "route matched"
        );
        let req = bind_vars(req.clone(), &matched.vars, &self.config);

        if self.middleware.is_empty() {
            dispatch(std::slice::from_ref(matched.route.dispatchable()), req, res, tail)
        } else {
            let chain: Vec<Dispatchable> = self
                .middleware
                .iter()
                .cloned()
                .chain(std::iter::once(matched.route.dispatchable().clone()))
                .collect();
            dispatch(&chain, req, res, tail)
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach extracted path variables to the request, per configuration: one
/// object-valued attribute when a bucket name is configured, otherwise one
/// string attribute per variable. Runs before the matched dispatchable so
/// handlers can read them off the request.
fn bind_vars(req: Request, vars: &VarVec, config: &PipelineConfig) -> Request {
    match &config.vars_attribute {
        Some(name) => {
            let map: serde_json::Map<String, Value> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
                .collect();
            req.with_attribute(name, Value::Object(map))
        }
        None => vars.iter().fold(req, |req, (k, v)| {
            req.with_attribute(k, Value::String(v.clone()))
        }),
    }
}

/// Dispatch one hook stage to completion.
///
/// The stage terminal captures the request value that reached it, so
/// augmentations made by hooks are visible to later stages. Returns the
/// final request, the response, and whether the stage ran all the way
/// through (false means a hook short-circuited). An `HttpError` from a hook
/// converts to an error response here; the pipeline carries on.
fn run_stage(
    chain: &[Dispatchable],
    req: Request,
    res: Response,
) -> (Request, Response, bool) {
    if chain.is_empty() {
        return (req, res, true);
    }
    let fallback = req.clone();
    let captured: RefCell<Option<Request>> = RefCell::new(None);
    let grab = |req: Request, res: Response| -> Result<Response, HttpError> {
        *captured.borrow_mut() = Some(req);
        Ok(res)
    };
    let outcome = dispatch(chain, req, res, Some(&grab));
    let completed = captured.borrow().is_some();
    let req = captured.borrow_mut().take().unwrap_or(fallback);
    match outcome {
        Ok(res) => (req, res, completed),
        Err(err) => {
            warn!(status = err.status, error = %err.message, "hook raised HTTP error");
            (req, err.into_response(), completed)
        }
    }
}
