//! Session cookie configuration
//!
//! A [`SessionConfig`] is built once at startup and handed to
//! [`SessionCodec::new`](crate::SessionCodec::new). Nothing else in the crate
//! reads the environment.

use std::fmt;

use crate::errors::SessionError;

pub const DEFAULT_COOKIE_NAME: &str = "auth";
/// 30 days
pub const DEFAULT_MAX_AGE: u64 = 30 * 24 * 60 * 60;
pub const DEFAULT_SIGN_IN_URL: &str = "/sign-in";
pub const DEFAULT_HOME_URL: &str = "/";

/// Secret used when `COOKIE_SECRET` is missing and the insecure fallback is allowed
pub const INSECURE_DEFAULT_SECRET: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Signing secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct CookieSecret(Vec<u8>);

impl CookieSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CookieSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CookieSecret(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Lifetime of an issued cookie in seconds
    pub max_age: u64,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub sign_in_url: String,
    pub home_url: String,
    /// First entry signs, all entries verify
    secrets: Vec<CookieSecret>,
    insecure_default: bool,
}

impl SessionConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: DEFAULT_MAX_AGE,
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            sign_in_url: DEFAULT_SIGN_IN_URL.to_string(),
            home_url: DEFAULT_HOME_URL.to_string(),
            secrets: vec![CookieSecret::new(secret)],
            insecure_default: false,
        }
    }

    /// Secrets that are still accepted when verifying but never used for signing.
    pub fn with_previous_secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        self.secrets
            .extend(secrets.into_iter().map(CookieSecret::new));
        self
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn with_sign_in_url(mut self, url: impl Into<String>) -> Self {
        self.sign_in_url = url.into();
        self
    }

    pub fn with_home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    pub fn secrets(&self) -> &[CookieSecret] {
        &self.secrets
    }

    /// True when the config fell back to [`INSECURE_DEFAULT_SECRET`]
    pub fn uses_insecure_default(&self) -> bool {
        self.insecure_default
    }

    /// Load configuration from the process environment.
    ///
    /// See [`SessionConfig::from_lookup`] for the variables read.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Reads `COOKIE_SECRET`, `COOKIE_PREVIOUS_SECRETS`, `COOKIE_ALLOW_INSECURE_SECRET`,
    /// `APP_ENV`, `SESSION_COOKIE_NAME`, `SESSION_COOKIE_MAX_AGE`, `SESSION_SIGN_IN_URL`
    /// and `SESSION_HOME_URL`.
    ///
    /// A missing `COOKIE_SECRET` falls back to [`INSECURE_DEFAULT_SECRET`] with a
    /// warning unless `COOKIE_ALLOW_INSECURE_SECRET=false`, in which case it is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_insecure = lookup("COOKIE_ALLOW_INSECURE_SECRET")
            .map(|val| val.to_lowercase() != "false")
            .unwrap_or(true);

        let (secret, insecure_default) = match lookup("COOKIE_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => (secret, false),
            None if allow_insecure => {
                tracing::warn!(
                    "No COOKIE_SECRET environment variable set, using default. The app is insecure in production."
                );
                (INSECURE_DEFAULT_SECRET.to_string(), true)
            }
            None => {
                return Err(SessionError::Config(
                    "COOKIE_SECRET is not set and COOKIE_ALLOW_INSECURE_SECRET=false".to_string(),
                ));
            }
        };

        let previous: Vec<String> = lookup("COOKIE_PREVIOUS_SECRETS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let is_production = lookup("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let max_age = lookup("SESSION_COOKIE_MAX_AGE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_AGE);

        let mut config = Self::new(secret)
            .with_previous_secrets(previous)
            .with_secure(is_production)
            .with_max_age(max_age)
            .with_cookie_name(
                lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            )
            .with_sign_in_url(
                lookup("SESSION_SIGN_IN_URL").unwrap_or_else(|| DEFAULT_SIGN_IN_URL.to_string()),
            )
            .with_home_url(
                lookup("SESSION_HOME_URL").unwrap_or_else(|| DEFAULT_HOME_URL.to_string()),
            );
        config.insecure_default = insecure_default;

        tracing::debug!(
            cookie_name = %config.cookie_name,
            max_age = config.max_age,
            secure = config.secure,
            secrets = config.secrets.len(),
            "Loaded session config"
        );

        Ok(config)
    }
}
