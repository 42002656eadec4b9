use axum::{Router, extract::FromRef, middleware::from_fn_with_state, routing::get};
use session_cookie_axum::session_cookie::{SessionCodec, SessionConfig};
use session_cookie_axum::{is_authenticated_redirect, session_router};

mod pages;
mod server;

use crate::{
    pages::{admin, index, protected, sign_in_form, sign_in_submit},
    server::{init_tracing, serve_http},
};

#[derive(Clone, FromRef)]
pub(crate) struct AppState {
    codec: SessionCodec,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = SessionConfig::from_env()?;
    let state = AppState {
        codec: SessionCodec::new(config),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/sign-in", get(sign_in_form).post(sign_in_submit))
        .route("/protected", get(protected))
        .route(
            "/admin",
            get(admin).route_layer(from_fn_with_state(state.clone(), is_authenticated_redirect)),
        )
        .merge(session_router())
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    serve_http(port, app).await?;
    Ok(())
}
