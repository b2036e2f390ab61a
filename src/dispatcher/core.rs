use std::fmt;
use std::sync::Arc;

use http::Method;
use tracing::debug;

use crate::error::{HttpError, RouteError};
use crate::message::{Request, Response};
use crate::middleware::Middleware;

/// A terminal handler: reads the request, produces the response.
pub type HandlerFn =
    dyn Fn(&Request, Response) -> Result<Response, HttpError> + Send + Sync;

/// Shared, type-erased handler. One `Arc` clone per registration site.
pub type Handler = Arc<HandlerFn>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Request, Response) -> Result<Response, HttpError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The continuation a caller hands into [`dispatch`]: the stage of the
/// processing pipeline that comes after everything this dispatch covers.
pub type TailFn<'a> = dyn Fn(Request, Response) -> Result<Response, HttpError> + 'a;

/// Anything invokable in the middleware/handler chain.
///
/// Resolved to a variant once at registration; dispatch performs a single
/// kind check per element and never re-inspects beyond it.
#[derive(Clone)]
pub enum Dispatchable {
    /// A terminal handler.
    Handler(Handler),
    /// A middleware invoking (or withholding) its continuation.
    Middleware(Arc<dyn Middleware>),
    /// An ordered sequence of middleware terminating in a handler. An
    /// exhausted chain continues into whatever encloses it.
    Chain(Vec<Dispatchable>),
    /// A pre-built response, returned as-is.
    Response(Response),
    /// A verb-to-handler map with optional wildcard entry.
    MethodMap(MethodMap),
}

impl fmt::Debug for Dispatchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler"),
            Self::Middleware(_) => f.write_str("Middleware"),
            Self::Chain(items) => f.debug_tuple("Chain").field(&items.len()).finish(),
            Self::Response(res) => f.debug_tuple("Response").field(&res.status).finish(),
            Self::MethodMap(map) => f.debug_tuple("MethodMap").field(&map.allow()).finish(),
        }
    }
}

/// An ordered mapping from HTTP verb to handler.
///
/// Verbs are validated and normalized to uppercase at insertion; duplicates
/// fail registration rather than silently shadowing. A `*` entry catches any
/// verb not otherwise listed. Dispatching an unmapped verb produces a 405
/// response carrying an `Allow` header — never an error.
#[derive(Clone, Default)]
pub struct MethodMap {
    entries: Vec<(Method, Handler)>,
    any: Option<Handler>,
}

impl MethodMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a verb (or `*`) to a handler. The verb is uppercased and must be a
    /// valid HTTP token; mapping the same verb twice is an error.
    pub fn insert(&mut self, verb: &str, handler: Handler) -> Result<(), RouteError> {
        let verb = verb.trim();
        if verb == "*" {
            if self.any.is_some() {
                return Err(RouteError::DuplicateVerb("*".to_string()));
            }
            self.any = Some(handler);
            return Ok(());
        }
        if verb.is_empty() {
            return Err(RouteError::InvalidVerb(verb.to_string()));
        }
        let upper = verb.to_ascii_uppercase();
        let method = Method::from_bytes(upper.as_bytes())
            .map_err(|_| RouteError::InvalidVerb(verb.to_string()))?;
        if self.entries.iter().any(|(m, _)| *m == method) {
            return Err(RouteError::DuplicateVerb(upper));
        }
        self.entries.push((method, handler));
        Ok(())
    }

    /// Fold another map into this one. Verb collisions (including `*`) fail
    /// the same way a duplicate within a single map does.
    pub fn merge(&mut self, other: MethodMap) -> Result<(), RouteError> {
        for (method, handler) in other.entries {
            if self.entries.iter().any(|(m, _)| *m == method) {
                return Err(RouteError::DuplicateVerb(method.to_string()));
            }
            self.entries.push((method, handler));
        }
        if let Some(handler) = other.any {
            if self.any.is_some() {
                return Err(RouteError::DuplicateVerb("*".to_string()));
            }
            self.any = Some(handler);
        }
        Ok(())
    }

    /// The mapped verbs in registration order, `Allow`-header ready.
    pub fn allow(&self) -> String {
        self.entries
            .iter()
            .map(|(m, _)| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Select and run the handler for the request's method.
    ///
    /// A HEAD request with no HEAD entry runs the GET entry — the
    /// GET-equivalent execution path the HEAD preparation hook relies on.
    pub(crate) fn dispatch(
        &self,
        req: &Request,
        res: Response,
    ) -> Result<Response, HttpError> {
        let method = req.method();
        let found = self
            .entries
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, h)| h)
            .or_else(|| {
                (*method == Method::HEAD)
                    .then(|| {
                        self.entries
                            .iter()
                            .find(|(m, _)| *m == Method::GET)
                            .map(|(_, h)| h)
                    })
                    .flatten()
            })
            .or(self.any.as_ref());
        match found {
            Some(handler) => handler(req, res),
            None => {
                let allow = self.allow();
                debug!(method = %method, allow = %allow, "method not allowed");
                let mut res = Response::error(405, "Method Not Allowed");
                if !allow.is_empty() {
                    res.set_header("Allow", allow);
                }
                Ok(res)
            }
        }
    }
}

/// The rest of the chain, handed to each middleware.
///
/// Running the continuation consumes it: a middleware either calls
/// [`Next::run`] once (pass-through) or drops it (short-circuit). When the
/// chain — and any enclosing chain — is exhausted, the caller's tail runs;
/// with no tail the current response is returned unchanged.
pub struct Next<'a> {
    chain: &'a [Dispatchable],
    enclosing: Option<Box<Next<'a>>>,
    tail: Option<&'a TailFn<'a>>,
}

impl<'a> Next<'a> {
    /// Continue with the remaining chain.
    pub fn run(self, req: Request, res: Response) -> Result<Response, HttpError> {
        let Next {
            chain,
            enclosing,
            tail,
        } = self;
        let Some((head, rest)) = chain.split_first() else {
            return match enclosing {
                Some(next) => next.run(req, res),
                None => match tail {
                    Some(f) => f(req, res),
                    None => Ok(res),
                },
            };
        };
        let next = Next {
            chain: rest,
            enclosing,
            tail,
        };
        match head {
            Dispatchable::Middleware(mw) => mw.handle(req, res, next),
            Dispatchable::Handler(h) => h(&req, res),
            Dispatchable::Response(ready) => Ok(ready.clone()),
            Dispatchable::MethodMap(map) => map.dispatch(&req, res),
            Dispatchable::Chain(items) => Next {
                chain: items,
                enclosing: Some(Box::new(next)),
                tail: None,
            }
            .run(req, res),
        }
    }
}

/// Execute an ordered sequence of dispatchables against a request/response
/// pair.
///
/// Execution is strictly sequential and cooperative: each element receives
/// the current pair plus the continuation for everything after it, and the
/// chain stops wherever an element declines to continue. `tail` is what runs
/// if the whole sequence passes through. A one-element slice behaves exactly
/// like invoking that element directly.
pub fn dispatch<'a>(
    chain: &'a [Dispatchable],
    req: Request,
    res: Response,
    tail: Option<&'a TailFn<'a>>,
) -> Result<Response, HttpError> {
    Next {
        chain,
        enclosing: None,
        tail,
    }
    .run(req, res)
}
