use http::Method;
use tracing::debug;

use super::Middleware;
use crate::dispatcher::Next;
use crate::error::HttpError;
use crate::message::{Request, Response};

/// Response-preparation hook that discards the body of responses to HEAD
/// requests.
///
/// HEAD requests execute the GET-equivalent path, so by the time this hook
/// runs the headers — including the `Content-Length` computed from the full
/// body — are in place; only the payload is dropped. Installed by default on
/// every pipeline.
pub struct HeadMiddleware;

impl Middleware for HeadMiddleware {
    fn handle(
        &self,
        req: Request,
        mut res: Response,
        next: Next<'_>,
    ) -> Result<Response, HttpError> {
        if *req.method() == Method::HEAD && !res.body.is_empty() {
            debug!(discarded = res.body.len(), "HEAD response body discarded");
            res.body.clear();
        }
        next.run(req, res)
    }
}
