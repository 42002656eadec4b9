use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use session_cookie::{AuthGate, SessionCodec, redirect_if_authenticated, require_auth};

use super::error::{RedirectResponse, SessionRejection};

// Authentication check with redirect to the sign-in page.
// The decoded UserSession is stored in the request extensions.
pub async fn is_authenticated_redirect(
    State(codec): State<SessionCodec>,
    mut req: Request,
    next: Next,
) -> Response {
    match require_auth(&codec, req.headers()) {
        Ok(AuthGate::Continue(user)) => {
            tracing::trace!("Authenticated user: {}", user.id);
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(AuthGate::Redirect(redirect)) => RedirectResponse(redirect).into_response(),
        Err(err) => SessionRejection::Error(err).into_response(),
    }
}

// Guest-only check, signed-in users go to the home page
pub async fn is_anonymous_redirect(
    State(codec): State<SessionCodec>,
    req: Request,
    next: Next,
) -> Response {
    match redirect_if_authenticated(&codec, req.headers()) {
        Ok(AuthGate::Continue(())) => next.run(req).await,
        Ok(AuthGate::Redirect(redirect)) => RedirectResponse(redirect).into_response(),
        Err(err) => SessionRejection::Error(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cookie_header, sample_user, test_codec};
    use axum::{Extension, Router, body::Body, middleware::from_fn_with_state, routing::get};
    use http::header::{COOKIE, LOCATION};
    use http::{Request as HttpRequest, StatusCode};
    use session_cookie::UserSession;
    use tower::ServiceExt;

    async fn dashboard(Extension(user): Extension<UserSession>) -> String {
        user.email
    }

    async fn sign_in_page() -> &'static str {
        "sign in"
    }

    fn app(codec: SessionCodec) -> Router {
        Router::new()
            .route(
                "/dashboard",
                get(dashboard).route_layer(from_fn_with_state(
                    codec.clone(),
                    is_authenticated_redirect,
                )),
            )
            .route(
                "/sign-in",
                get(sign_in_page)
                    .route_layer(from_fn_with_state(codec.clone(), is_anonymous_redirect)),
            )
            .with_state(codec)
    }

    fn request(uri: &str, cookie: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_authenticated_request_reaches_handler() {
        let codec = test_codec();
        let cookie = cookie_header(&codec, &sample_user("u1"));

        let response = app(codec)
            .oneshot(request("/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"u1@example.com");
    }

    #[tokio::test]
    async fn test_anonymous_request_is_redirected() {
        let response = app(test_codec())
            .oneshot(request("/dashboard", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/sign-in");
    }

    #[tokio::test]
    async fn test_sign_in_page_guards() {
        let codec = test_codec();
        let cookie = cookie_header(&codec, &sample_user("u1"));

        let response = app(codec.clone())
            .oneshot(request("/sign-in", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");

        let response = app(codec)
            .oneshot(request("/sign-in", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
