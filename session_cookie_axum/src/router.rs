//! Router for the session endpoints

use axum::{Router, extract::FromRef, routing::get};
use session_cookie::SessionCodec;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::logout::logout;

/// Create a router for the session endpoints
///
/// Mount it wherever the application wants them, e.g. at the root:
/// - `GET|POST /logout` - clear the session cookie and redirect home
///
/// The router state must provide a [`SessionCodec`] via `FromRef`.
pub fn session_router<S>() -> Router<S>
where
    SessionCodec: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    session_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`session_router`] without the HTTP tracing middleware.
pub fn session_router_no_trace<S>() -> Router<S>
where
    SessionCodec: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/logout", get(logout).post(logout))
}
