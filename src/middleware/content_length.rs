use tracing::debug;

use super::Middleware;
use crate::dispatcher::Next;
use crate::error::HttpError;
use crate::message::{Request, Response};

/// Response-preparation hook that sets `Content-Length` from the final body
/// size. Installed by default on every pipeline; runs before
/// [`HeadMiddleware`](crate::middleware::HeadMiddleware) so HEAD responses
/// keep the length their GET-equivalent body had.
pub struct ContentLengthMiddleware;

impl Middleware for ContentLengthMiddleware {
    fn handle(
        &self,
        req: Request,
        mut res: Response,
        next: Next<'_>,
    ) -> Result<Response, HttpError> {
        let len = res.body.len();
        res.set_header("Content-Length", len.to_string());
        debug!(content_length = len, "content length set");
        next.run(req, res)
    }
}
