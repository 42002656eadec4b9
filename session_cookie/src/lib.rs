//! Signed cookie sessions for web applications.
//!
//! The crate stores a [`UserSession`] in a single HMAC-signed cookie and offers
//! guards that decide whether a request may proceed:
//!
//! - [`SessionCodec`] encodes a session into a `Set-Cookie` value and decodes it
//!   back from a `Cookie` header.
//! - [`require_auth`] and [`redirect_if_authenticated`] return an [`AuthGate`] that
//!   either continues or carries the redirect to send.
//! - [`clear_session`] produces the logout redirect.
//!
//! ```
//! use session_cookie::{AuthGate, SessionCodec, SessionConfig, require_auth};
//! use http::HeaderMap;
//!
//! let codec = SessionCodec::new(SessionConfig::new("change-me"));
//! match require_auth(&codec, &HeaderMap::new()).unwrap() {
//!     AuthGate::Continue(user) => println!("hello {}", user.email),
//!     AuthGate::Redirect(redirect) => assert_eq!(redirect.location, "/sign-in"),
//! }
//! ```

mod codec;
mod config;
mod cookie;
mod errors;
mod guard;
mod signer;
mod types;

#[cfg(test)]
mod test_utils;

pub use codec::SessionCodec;
pub use config::{
    CookieSecret, DEFAULT_COOKIE_NAME, DEFAULT_HOME_URL, DEFAULT_MAX_AGE, DEFAULT_SIGN_IN_URL,
    INSECURE_DEFAULT_SECRET, SameSite, SessionConfig,
};
pub use errors::SessionError;
pub use guard::{
    AuthGate, SessionRedirect, clear_session, location_header, redirect_if_authenticated,
    require_auth, sign_in,
};
pub use types::{Role, SessionAccount, UserSession};
