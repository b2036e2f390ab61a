mod content_length;
mod core;
mod head;
mod tracing;

pub use content_length::ContentLengthMiddleware;
pub use core::Middleware;
pub use head::HeadMiddleware;
pub use self::tracing::TracingMiddleware;
