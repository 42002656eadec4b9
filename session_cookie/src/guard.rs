//! Authentication gate built on the session codec
//!
//! Each check returns an [`AuthGate`]: either the caller continues with a value, or
//! it must stop and send the enclosed [`SessionRedirect`] instead of its own response.

use http::header::{HeaderMap, SET_COOKIE};

use crate::codec::SessionCodec;
use crate::cookie::to_header_value;
use crate::errors::SessionError;
use crate::types::UserSession;

/// A redirect the request handler must respond with
#[derive(Debug, Clone)]
pub struct SessionRedirect {
    pub location: String,
    /// Extra response headers, typically `Set-Cookie`
    pub headers: HeaderMap,
}

impl SessionRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

#[must_use = "a Redirect must be sent instead of the handler's own response"]
#[derive(Debug, Clone)]
pub enum AuthGate<T> {
    Continue(T),
    Redirect(SessionRedirect),
}

impl<T> AuthGate<T> {
    pub fn is_continue(&self) -> bool {
        matches!(self, AuthGate::Continue(_))
    }

    /// Converts to a `Result` so the redirect can be propagated with `?`.
    pub fn into_result(self) -> Result<T, SessionRedirect> {
        match self {
            AuthGate::Continue(value) => Ok(value),
            AuthGate::Redirect(redirect) => Err(redirect),
        }
    }
}

/// Require a valid session.
///
/// Without one, the request is redirected to the sign-in page and any stale session
/// cookie is removed.
#[tracing::instrument(skip_all)]
pub fn require_auth(
    codec: &SessionCodec,
    headers: &HeaderMap,
) -> Result<AuthGate<UserSession>, SessionError> {
    if let Some(user) = codec.decode_from_headers(headers)? {
        return Ok(AuthGate::Continue(user));
    }

    let sign_in_url = codec.config().sign_in_url.as_str();
    tracing::debug!("No valid session, redirecting to {}", sign_in_url);

    let mut response_headers = HeaderMap::new();
    response_headers.append(SET_COOKIE, codec.removal_cookie()?);

    Ok(AuthGate::Redirect(
        SessionRedirect::to(sign_in_url).with_headers(response_headers),
    ))
}

/// Let only anonymous requests through, e.g. for the sign-in page.
#[tracing::instrument(skip_all)]
pub fn redirect_if_authenticated(
    codec: &SessionCodec,
    headers: &HeaderMap,
) -> Result<AuthGate<()>, SessionError> {
    match codec.decode_from_headers(headers)? {
        Some(user) => {
            let home_url = codec.config().home_url.as_str();
            tracing::debug!("User {} already signed in, redirecting to {}", user.id, home_url);
            Ok(AuthGate::Redirect(SessionRedirect::to(home_url)))
        }
        None => Ok(AuthGate::Continue(())),
    }
}

/// Log out: redirect home with an already expired session cookie.
pub fn clear_session(codec: &SessionCodec) -> Result<SessionRedirect, SessionError> {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, codec.expired_cookie()?);
    Ok(SessionRedirect::to(codec.config().home_url.as_str()).with_headers(headers))
}

/// Log in: redirect home carrying a freshly issued session cookie for `user`.
pub fn sign_in(codec: &SessionCodec, user: &UserSession) -> Result<SessionRedirect, SessionError> {
    let mut headers = HeaderMap::new();
    codec.attach_to_headers(&mut headers, user)?;
    tracing::debug!("Issued session cookie for user {}", user.id);
    Ok(SessionRedirect::to(codec.config().home_url.as_str()).with_headers(headers))
}

/// Header value for a redirect's `Location`
pub fn location_header(redirect: &SessionRedirect) -> Result<http::HeaderValue, SessionError> {
    to_header_value(&redirect.location)
}
