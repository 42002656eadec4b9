use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use http::header::{HeaderMap, SET_COOKIE};
use http::{HeaderValue, Response};

use crate::config::SessionConfig;
use crate::cookie::{
    CookieLifetime, cookie_values, joined_cookie_header, render_set_cookie, to_header_value,
};
use crate::errors::SessionError;
use crate::signer::CookieSigner;
use crate::types::UserSession;

/// Converts [`UserSession`] records to and from signed session cookies.
///
/// The codec is stateless apart from its configuration, which is shared behind an
/// `Arc`, so cloning it per request is cheap.
#[derive(Debug, Clone)]
pub struct SessionCodec {
    config: Arc<SessionConfig>,
}

impl SessionCodec {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Serialize and sign `user`, returning a `Set-Cookie` header value.
    pub fn encode(&self, user: &UserSession) -> Result<String, SessionError> {
        self.encode_at(user, Utc::now())
    }

    pub(crate) fn encode_at(
        &self,
        user: &UserSession,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let payload = serde_json::to_vec(user)
            .map_err(|e| SessionError::Payload(format!("Failed to serialize session: {e}")))?;

        let max_age = self.config.max_age;
        let expires_at = now
            .timestamp()
            .saturating_add(i64::try_from(max_age).unwrap_or(i64::MAX));
        let signed = CookieSigner::new(self.config.secrets()).sign(
            &self.config.cookie_name,
            &payload,
            expires_at,
        )?;

        Ok(render_set_cookie(
            &self.config,
            &signed,
            CookieLifetime::MaxAge(max_age),
        ))
    }

    /// Recover the session from a raw `Cookie` request header.
    ///
    /// Returns `Ok(None)` when the header or cookie is missing, the signature does not
    /// verify, or the cookie has expired. Returns an error only when a correctly signed
    /// payload cannot be decoded into a [`UserSession`].
    pub fn decode(&self, cookie_header: Option<&str>) -> Result<Option<UserSession>, SessionError> {
        self.decode_at(cookie_header, Utc::now())
    }

    /// Same as [`SessionCodec::decode`], reading every `Cookie` header of a request.
    pub fn decode_from_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<UserSession>, SessionError> {
        let cookie_header = joined_cookie_header(headers);
        self.decode(cookie_header.as_deref())
    }

    pub(crate) fn decode_at(
        &self,
        cookie_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<UserSession>, SessionError> {
        let Some(cookie_header) = cookie_header.filter(|h| !h.is_empty()) else {
            return Ok(None);
        };

        let name = self.config.cookie_name.as_str();
        let signer = CookieSigner::new(self.config.secrets());

        let mut payload = None;
        for value in cookie_values(cookie_header, name) {
            if let Some(verified) = signer.unsign(name, value, now.timestamp())? {
                payload = Some(verified);
                break;
            }
        }

        let Some(payload) = payload else {
            tracing::debug!("No valid session cookie '{}' found", name);
            return Ok(None);
        };

        if payload.is_empty() {
            return Ok(None);
        }

        let user: UserSession = serde_json::from_slice(&payload).map_err(|e| {
            tracing::error!("Signed session payload is malformed: {}", e);
            SessionError::Payload(e.to_string())
        })?;

        tracing::debug!("Decoded session for user {}", user.id);
        Ok(Some(user))
    }

    /// Append the encoded session to `headers` as a new `Set-Cookie` entry.
    pub fn attach_to_headers(
        &self,
        headers: &mut HeaderMap,
        user: &UserSession,
    ) -> Result<(), SessionError> {
        let cookie = self.encode(user)?;
        headers.append(SET_COOKIE, to_header_value(&cookie)?);
        Ok(())
    }

    /// Append the encoded session to the response's `Set-Cookie` headers.
    ///
    /// Existing headers, including other cookies, are kept.
    pub fn attach_to_response<'r, B>(
        &self,
        response: &'r mut Response<B>,
        user: &UserSession,
    ) -> Result<&'r mut Response<B>, SessionError> {
        self.attach_to_headers(response.headers_mut(), user)?;
        Ok(response)
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie via `Max-Age=0`
    pub fn removal_cookie(&self) -> Result<HeaderValue, SessionError> {
        to_header_value(&render_set_cookie(
            &self.config,
            "",
            CookieLifetime::MaxAge(0),
        ))
    }

    /// `Set-Cookie` value whose `Expires` is the unix epoch
    pub fn expired_cookie(&self) -> Result<HeaderValue, SessionError> {
        let epoch = Utc
            .timestamp_opt(0, 0)
            .single()
            .ok_or_else(|| SessionError::Header("Invalid epoch".to_string()))?;
        to_header_value(&render_set_cookie(
            &self.config,
            "",
            CookieLifetime::ExpiresAt(epoch),
        ))
    }
}
