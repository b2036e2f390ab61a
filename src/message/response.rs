use std::io;
use std::sync::Arc;

use serde_json::{json, Value};
use smallvec::SmallVec;

/// Maximum inline headers before heap allocation. Most responses carry far
/// fewer, so header storage stays on the stack.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage. Names use `Arc<str>` because the common
/// names repeat across responses and clone in O(1); values are per-response.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// An outgoing HTTP response.
///
/// Unlike [`Request`](crate::message::Request), a response is read and
/// written in place as it moves through the dispatch chain. The `with_*`
/// builders exist for the common rebuild-and-return shape in handlers.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderVec,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: Vec::new(),
        }
    }

    /// `200 OK` with no headers and no body.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// A JSON response; the value is serialized immediately.
    pub fn json(status: u16, body: &Value) -> Self {
        let mut res = Self::new(status);
        res.set_header("Content-Type", "application/json".to_string());
        res.body = body.to_string().into_bytes();
        res
    }

    /// A plain-text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let mut res = Self::new(status);
        res.set_header("Content-Type", "text/plain; charset=utf-8".to_string());
        res.body = body.into().into_bytes();
        res
    }

    /// A JSON error body of the shape `{"error": <message>}`.
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, &json!({ "error": message }))
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header, replacing any existing value under the same
    /// name regardless of case.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }
}

/// Serialize a finished response in HTTP/1.1 wire form.
///
/// The core never touches a socket; hosts that want the byte form of the
/// final response call this with whatever `Write` their transport offers.
/// Headers are written exactly as present — the preparation hooks are
/// responsible for `Content-Length` being set by this point.
pub fn write_response<W: io::Write>(res: &Response, writer: &mut W) -> io::Result<()> {
    write!(
        writer,
        "HTTP/1.1 {} {}\r\n",
        res.status,
        status_reason(res.status)
    )?;
    for (name, value) in &res.headers {
        write!(writer, "{name}: {value}\r\n")?;
    }
    writer.write_all(b"\r\n")?;
    writer.write_all(&res.body)?;
    writer.flush()
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        410 => "Gone",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Content",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}
