//! Shared fixtures for unit tests

use crate::codec::SessionCodec;
use crate::config::SessionConfig;
use crate::types::{Role, SessionAccount, UserSession};

pub(crate) const TEST_SECRET: &str = "test-secret-do-not-use";

pub(crate) fn test_codec() -> SessionCodec {
    SessionCodec::new(SessionConfig::new(TEST_SECRET))
}

pub(crate) fn sample_user(id: &str) -> UserSession {
    UserSession {
        id: id.to_string(),
        name: Some("Jane".to_string()),
        account_id: format!("acc-{id}"),
        email: format!("{id}@example.com"),
        last_name: Some("Doe".to_string()),
        role: Role::User,
        account: SessionAccount {
            id: format!("acc-{id}"),
            owner_id: id.to_string(),
            name: Some("Example Inc".to_string()),
            code: None,
        },
    }
}

/// `name=value` part of a `Set-Cookie` header, as a browser would send it back
pub(crate) fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}
