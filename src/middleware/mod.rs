//! HTTP middleware.

mod guard;
mod request_logger;

pub use guard::{Access, AuthGuard, AuthGuardMiddleware, authorize};
pub use request_logger::RequestLogger;
