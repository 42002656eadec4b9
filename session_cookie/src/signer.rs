//! Signed cookie values
//!
//! A signed value has the form `<payload>.<expires>.<tag>` where `payload` and `tag`
//! are unpadded base64url, `expires` is a unix timestamp in seconds, and `tag` is
//! HMAC-SHA256 over `<cookie-name>=<payload>.<expires>`.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::CookieSecret;
use crate::errors::SessionError;

type HmacSha256 = Hmac<Sha256>;

pub(crate) struct CookieSigner<'a> {
    secrets: &'a [CookieSecret],
}

impl<'a> CookieSigner<'a> {
    pub(crate) fn new(secrets: &'a [CookieSecret]) -> Self {
        Self { secrets }
    }

    /// An empty HMAC key would make every signature forgeable.
    fn check_secrets(&self) -> Result<(), SessionError> {
        if self.secrets.iter().any(|s| s.as_bytes().is_empty()) {
            return Err(SessionError::Config(
                "Empty cookie secret configured".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn sign(
        &self,
        name: &str,
        payload: &[u8],
        expires_at: i64,
    ) -> Result<String, SessionError> {
        self.check_secrets()?;
        let secret = self
            .secrets
            .first()
            .ok_or_else(|| SessionError::Config("No signing secret configured".to_string()))?;

        let unsigned = format!("{}.{expires_at}", URL_SAFE_NO_PAD.encode(payload));
        let tag = compute_tag(secret, name, &unsigned)?;

        Ok(format!("{unsigned}.{}", URL_SAFE_NO_PAD.encode(tag)))
    }

    /// Returns the payload of a correctly signed, unexpired value.
    ///
    /// Anything that fails verification is `Ok(None)`. Only a value that verifies
    /// but cannot be decoded is an error.
    pub(crate) fn unsign(
        &self,
        name: &str,
        signed: &str,
        now: i64,
    ) -> Result<Option<Vec<u8>>, SessionError> {
        self.check_secrets()?;
        let Some((unsigned, tag)) = signed.rsplit_once('.') else {
            tracing::debug!("Signed value has no signature");
            return Ok(None);
        };

        let Ok(tag) = URL_SAFE_NO_PAD.decode(tag) else {
            tracing::debug!("Signature is not valid base64url");
            return Ok(None);
        };

        let mut verified = false;
        for secret in self.secrets {
            let expected = compute_tag(secret, name, unsigned)?;
            if bool::from(expected.as_slice().ct_eq(tag.as_slice())) {
                verified = true;
                break;
            }
        }
        if !verified {
            tracing::debug!("Signature mismatch for cookie {}", name);
            return Ok(None);
        }

        let (payload, expires_at) = unsigned
            .rsplit_once('.')
            .ok_or_else(|| SessionError::Payload("Missing expiry".to_string()))?;

        let expires_at: i64 = expires_at
            .parse()
            .map_err(|_| SessionError::Payload("Invalid expiry".to_string()))?;

        if expires_at <= now {
            tracing::debug!("Cookie {} expired at {}", name, expires_at);
            return Ok(None);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| SessionError::Payload(format!("Failed to decode payload: {e}")))?;

        Ok(Some(payload))
    }
}

fn compute_tag(secret: &CookieSecret, name: &str, unsigned: &str) -> Result<Vec<u8>, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SessionError::Crypto(e.to_string()))?;
    mac.update(name.as_bytes());
    mac.update(b"=");
    mac.update(unsigned.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}
