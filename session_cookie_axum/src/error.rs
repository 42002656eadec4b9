use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::LOCATION;
use session_cookie::{SessionError, SessionRedirect, location_header};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Session faults are server errors. The cause is logged, never sent to the client.
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| server_error(&e))
    }
}

fn server_error(err: &SessionError) -> (StatusCode, String) {
    tracing::error!("Session error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".to_string(),
    )
}

/// `302 Found` to the redirect's location, carrying its headers
#[derive(Debug, Clone)]
pub struct RedirectResponse(pub SessionRedirect);

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        let location = match location_header(&self.0) {
            Ok(location) => location,
            Err(e) => return SessionRejection::Error(e).into_response(),
        };

        tracing::debug!("Redirecting to {}", self.0.location);
        let mut response = (StatusCode::FOUND, self.0.headers).into_response();
        response.headers_mut().insert(LOCATION, location);
        response
    }
}

/// Why a session extractor or middleware stopped the request
#[derive(Debug, Clone)]
pub enum SessionRejection {
    Redirect(SessionRedirect),
    Error(SessionError),
}

impl From<SessionRedirect> for SessionRejection {
    fn from(redirect: SessionRedirect) -> Self {
        SessionRejection::Redirect(redirect)
    }
}

impl From<SessionError> for SessionRejection {
    fn from(err: SessionError) -> Self {
        SessionRejection::Error(err)
    }
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            SessionRejection::Redirect(redirect) => RedirectResponse(redirect).into_response(),
            SessionRejection::Error(err) => server_error(&err).into_response(),
        }
    }
}
