use std::ops::Deref;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use http::request::Parts;
use session_cookie::{
    AuthGate, SessionCodec, UserSession, redirect_if_authenticated, require_auth,
};

use super::error::SessionRejection;

/// Signed-in user, available as an Axum extractor
///
/// Extraction fails with a redirect to the sign-in page when the request carries no
/// valid session cookie; the redirect also clears the stale cookie. Use
/// `Option<AuthUser>` for pages that work for both anonymous and signed-in users.
///
/// The [`SessionCodec`] is taken from the router state.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use session_cookie::{SessionCodec, SessionConfig};
/// use session_cookie_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.email)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .with_state(SessionCodec::new(SessionConfig::new("change-me")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser(pub UserSession);

impl AuthUser {
    pub fn into_inner(self) -> UserSession {
        self.0
    }
}

impl Deref for AuthUser {
    type Target = UserSession;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    SessionCodec: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let codec = SessionCodec::from_ref(state);
        match require_auth(&codec, &parts.headers)? {
            AuthGate::Continue(user) => Ok(AuthUser(user)),
            AuthGate::Redirect(redirect) => Err(redirect.into()),
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    SessionCodec: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let codec = SessionCodec::from_ref(state);
        Ok(codec.decode_from_headers(&parts.headers)?.map(AuthUser))
    }
}

/// Extractor for guest-only pages such as the sign-in form
///
/// Signed-in users are redirected to the home page instead.
#[derive(Clone, Copy, Debug)]
pub struct GuestOnly;

impl<S> FromRequestParts<S> for GuestOnly
where
    SessionCodec: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let codec = SessionCodec::from_ref(state);
        match redirect_if_authenticated(&codec, &parts.headers)? {
            AuthGate::Continue(()) => Ok(GuestOnly),
            AuthGate::Redirect(redirect) => Err(redirect.into()),
        }
    }
}
