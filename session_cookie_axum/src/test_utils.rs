//! Test helpers shared by the extractor, middleware and router tests

use session_cookie::{Role, SessionAccount, SessionCodec, SessionConfig, UserSession};

pub(crate) fn test_codec() -> SessionCodec {
    SessionCodec::new(SessionConfig::new("axum-test-secret"))
}

pub(crate) fn sample_user(id: &str) -> UserSession {
    UserSession {
        id: id.to_string(),
        name: Some("Test".to_string()),
        account_id: format!("acc-{id}"),
        email: format!("{id}@example.com"),
        last_name: None,
        role: Role::User,
        account: SessionAccount {
            id: format!("acc-{id}"),
            owner_id: id.to_string(),
            name: None,
            code: None,
        },
    }
}

/// `Cookie` request header value carrying a session for `user`
pub(crate) fn cookie_header(codec: &SessionCodec, user: &UserSession) -> String {
    let set_cookie = codec.encode(user).expect("session encodes");
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}
