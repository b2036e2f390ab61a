use crate::dispatcher::Next;
use crate::error::HttpError;
use crate::message::{Request, Response};

/// A link in the dispatch chain.
///
/// A middleware receives the current request/response pair and the
/// continuation for everything after it. Calling `next.run(req, res)` passes
/// the exchange along; returning without calling it stops the chain there.
/// Request values are replaced, not mutated: pass an augmented copy to `next`
/// and downstream stages see it.
pub trait Middleware: Send + Sync {
    fn handle(
        &self,
        req: Request,
        res: Response,
        next: Next<'_>,
    ) -> Result<Response, HttpError>;
}

/// Any compatible closure is a middleware.
impl<F> Middleware for F
where
    F: for<'a> Fn(Request, Response, Next<'a>) -> Result<Response, HttpError> + Send + Sync,
{
    fn handle(
        &self,
        req: Request,
        res: Response,
        next: Next<'_>,
    ) -> Result<Response, HttpError> {
        self(req, res, next)
    }
}
