use http::Method;
use railyard::dispatcher::{dispatch, Dispatchable};
use railyard::middleware::{ContentLengthMiddleware, HeadMiddleware, TracingMiddleware};
use railyard::{Request, Response};
use std::sync::Arc;

use tracing_util::TestTracing;

fn run(chain: Vec<Dispatchable>, req: Request, res: Response) -> Response {
    dispatch(&chain, req, res, None).unwrap()
}

#[test]
fn test_content_length_reflects_body_size() {
    let chain = vec![Dispatchable::Middleware(Arc::new(ContentLengthMiddleware))];
    let res = run(
        chain,
        Request::new(Method::GET, "/"),
        Response::text(200, "hello"),
    );
    assert_eq!(res.get_header("Content-Length"), Some("5"));
}

#[test]
fn test_content_length_zero_for_empty_body() {
    let chain = vec![Dispatchable::Middleware(Arc::new(ContentLengthMiddleware))];
    let res = run(chain, Request::new(Method::GET, "/"), Response::new(204));
    assert_eq!(res.get_header("Content-Length"), Some("0"));
}

#[test]
fn test_head_discards_body_for_head_requests_only() {
    let chain = vec![Dispatchable::Middleware(Arc::new(HeadMiddleware))];
    let res = run(
        chain,
        Request::new(Method::HEAD, "/"),
        Response::text(200, "payload"),
    );
    assert!(res.body.is_empty());

    let chain = vec![Dispatchable::Middleware(Arc::new(HeadMiddleware))];
    let res = run(
        chain,
        Request::new(Method::GET, "/"),
        Response::text(200, "payload"),
    );
    assert_eq!(res.body, b"payload");
}

#[test]
fn test_default_preparation_order_keeps_get_equivalent_length() {
    // Content-length first, then the HEAD discard: the header must describe
    // the body a GET would have returned.
    let chain = vec![
        Dispatchable::Middleware(Arc::new(ContentLengthMiddleware)),
        Dispatchable::Middleware(Arc::new(HeadMiddleware)),
    ];
    let res = run(
        chain,
        Request::new(Method::HEAD, "/"),
        Response::text(200, "payload"),
    );
    assert_eq!(res.get_header("Content-Length"), Some("7"));
    assert!(res.body.is_empty());
}

#[test]
fn test_tracing_middleware_passes_exchange_through() {
    let _tracing = TestTracing::init();
    let chain = vec![Dispatchable::Middleware(Arc::new(TracingMiddleware))];
    let res = run(
        chain,
        Request::new(Method::GET, "/cats"),
        Response::text(200, "ok"),
    );
    assert_eq!(res.status, 200);
    assert_eq!(res.body, b"ok");
}
