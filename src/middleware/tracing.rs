use std::time::Instant;

use tracing::{info, warn};

use super::Middleware;
use crate::dispatcher::Next;
use crate::error::HttpError;
use crate::message::{Request, Response};

/// Logs one structured event per exchange: method, path, final status, and
/// latency. Add it as the first router-level middleware (or a pre-route
/// hook) to cover the whole downstream chain.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(
        &self,
        req: Request,
        res: Response,
        next: Next<'_>,
    ) -> Result<Response, HttpError> {
        let method = req.method().clone();
        let path = req.path().to_string();
        let start = Instant::now();
        let result = next.run(req, res);
        let latency_us = start.elapsed().as_micros() as u64;
        match &result {
            Ok(res) => info!(
                method = %method,
                path = %path,
                status = res.status,
                latency_us,
                "request completed"
            ),
            Err(err) => warn!(
                method = %method,
                path = %path,
                status = err.status,
                error = %err.message,
                latency_us,
                "request raised HTTP error"
            ),
        }
        result
    }
}
