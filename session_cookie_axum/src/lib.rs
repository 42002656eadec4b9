//! Axum integration for `session-cookie`
//!
//! - [`AuthUser`] / `Option<AuthUser>` / [`GuestOnly`] extractors
//! - [`is_authenticated_redirect`] / [`is_anonymous_redirect`] middleware for
//!   `axum::middleware::from_fn_with_state`
//! - [`session_router`] with the logout endpoint
//!
//! All of them read the [`SessionCodec`](session_cookie::SessionCodec) from the router state.

mod error;
mod logout;
mod middleware;
mod router;
mod session;

#[cfg(test)]
mod test_utils;

pub use error::{IntoResponseError, RedirectResponse, SessionRejection};
pub use middleware::{is_anonymous_redirect, is_authenticated_redirect};
pub use router::{session_router, session_router_no_trace};
pub use session::{AuthUser, GuestOnly};

// Re-export the core crate so applications need a single dependency
pub use session_cookie;
