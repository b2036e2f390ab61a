//! HTTP message values consumed and produced by the routing core.
//!
//! The core does not read from or write to a transport; it works on these
//! in-memory values and leaves the byte-level I/O to the host. [`Request`]
//! follows immutable-value-replace semantics (every `with_*` call produces a
//! new value that downstream stages see), while [`Response`] is read and
//! written in place as it moves through the chain. [`write_response`]
//! serializes a finished response for hosts that want the wire form.

mod request;
mod response;

pub use request::Request;
pub use response::{write_response, HeaderVec, Response, MAX_INLINE_HEADERS};
