use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use session_cookie::{SessionCodec, clear_session};

use super::error::{RedirectResponse, SessionRejection};

/// Clears the session cookie and redirects to the home page.
///
/// The response is the same whether or not the request carried a session.
pub(super) async fn logout(State(codec): State<SessionCodec>) -> Response {
    match clear_session(&codec) {
        Ok(redirect) => RedirectResponse(redirect).into_response(),
        Err(err) => SessionRejection::Error(err).into_response(),
    }
}
