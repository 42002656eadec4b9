use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use session_cookie_axum::session_cookie::{
    Role, SessionAccount, SessionCodec, UserSession, sign_in,
};
use session_cookie_axum::{AuthUser, GuestOnly, RedirectResponse, SessionRejection};

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn display_name(user: &UserSession) -> String {
    match (&user.name, &user.last_name) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.clone(),
        _ => user.email.clone(),
    }
}

pub(crate) async fn index(user: Option<AuthUser>) -> Html<String> {
    match user {
        Some(user) => Html(format!(
            "<p>Hey {}!</p><p><a href=\"/protected\">Protected page</a></p>\
             <form method=\"post\" action=\"/logout\"><button>Log out</button></form>",
            escape(&display_name(&user))
        )),
        None => Html("<p>Not signed in.</p><p><a href=\"/sign-in\">Sign in</a></p>".to_string()),
    }
}

pub(crate) async fn sign_in_form(_: GuestOnly) -> Html<&'static str> {
    Html(
        "<form method=\"post\" action=\"/sign-in\">\
         <input name=\"email\" type=\"email\" placeholder=\"email\" required>\
         <input name=\"name\" placeholder=\"first name\">\
         <input name=\"last_name\" placeholder=\"last name\">\
         <button>Sign in</button></form>",
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInForm {
    email: String,
    name: Option<String>,
    last_name: Option<String>,
}

/// Demo login: every submitted email is accepted. Addresses starting with `admin@`
/// get the admin role.
pub(crate) async fn sign_in_submit(
    State(codec): State<SessionCodec>,
    _: GuestOnly,
    Form(form): Form<SignInForm>,
) -> Response {
    let email = form.email.trim().to_lowercase();
    if email.is_empty() {
        return (StatusCode::BAD_REQUEST, "Email is required").into_response();
    }

    let user_id = uuid::Uuid::new_v4().to_string();
    let account_id = uuid::Uuid::new_v4().to_string();
    let role = if email.starts_with("admin@") {
        Role::Admin
    } else {
        Role::User
    };

    let user = UserSession {
        id: user_id.clone(),
        name: form.name.filter(|s| !s.trim().is_empty()),
        account_id: account_id.clone(),
        email,
        last_name: form.last_name.filter(|s| !s.trim().is_empty()),
        role,
        account: SessionAccount {
            id: account_id,
            owner_id: user_id,
            name: None,
            code: None,
        },
    };

    tracing::info!("Signing in {} as {:?}", user.email, user.role);
    match sign_in(&codec, &user) {
        Ok(redirect) => RedirectResponse(redirect).into_response(),
        Err(err) => SessionRejection::Error(err).into_response(),
    }
}

// Having user as an argument redirects anonymous users to /sign-in
pub(crate) async fn protected(user: AuthUser) -> Html<String> {
    tracing::trace!("User is admin?: {}", user.is_admin());
    Html(format!(
        "<p>Protected page for {} (account {}).</p><p><a href=\"/\">Home</a></p>",
        escape(&user.email),
        escape(&user.account_id)
    ))
}

// Protected by the is_authenticated_redirect middleware
pub(crate) async fn admin(Extension(user): Extension<UserSession>) -> Response {
    if !user.is_admin() {
        return (StatusCode::FORBIDDEN, "Admins only").into_response();
    }
    Html(format!("<p>Admin area, welcome {}.</p>", escape(&user.email))).into_response()
}
