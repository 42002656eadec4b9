//! Fixtures shared by the integration tests

use proptest::prelude::*;
use session_cookie::{Role, SessionAccount, SessionCodec, SessionConfig, UserSession};

pub const SECRET: &str = "integration-test-secret";

pub fn codec() -> SessionCodec {
    SessionCodec::new(SessionConfig::new(SECRET))
}

pub fn user(id: &str, role: Role) -> UserSession {
    UserSession {
        id: id.to_string(),
        name: None,
        account_id: "a1".to_string(),
        email: format!("{id}@example.com"),
        last_name: None,
        role,
        account: SessionAccount {
            id: "a1".to_string(),
            owner_id: id.to_string(),
            name: None,
            code: Some("A1".to_string()),
        },
    }
}

/// What the browser sends back for a `Set-Cookie` header
pub fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default()
}

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Admin), Just(Role::User)]
}

prop_compose! {
    pub fn any_session()(
        id in ".{1,40}",
        name in proptest::option::of(".{0,40}"),
        account_id in "[a-z0-9-]{1,36}",
        email in "[a-z]{1,12}@[a-z]{1,12}\\.[a-z]{2,4}",
        last_name in proptest::option::of(".{0,40}"),
        role in role(),
        owner_id in ".{1,40}",
        account_name in proptest::option::of(".{0,40}"),
        code in proptest::option::of("[A-Z0-9]{0,8}"),
    ) -> UserSession {
        UserSession {
            id,
            name,
            account_id: account_id.clone(),
            email,
            last_name,
            role,
            account: SessionAccount {
                id: account_id,
                owner_id,
                name: account_name,
                code,
            },
        }
    }
}
