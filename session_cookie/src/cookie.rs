use chrono::{DateTime, Utc};
use http::HeaderValue;
use http::header::{COOKIE, HeaderMap};

use crate::config::SessionConfig;
use crate::errors::SessionError;

/// When a `Set-Cookie` header should stop being honored by the browser
pub(crate) enum CookieLifetime {
    MaxAge(u64),
    /// Fixed `Expires` date, no `Max-Age`
    ExpiresAt(DateTime<Utc>),
}

pub(crate) fn render_set_cookie(
    config: &SessionConfig,
    value: &str,
    lifetime: CookieLifetime,
) -> String {
    let lifetime = match lifetime {
        CookieLifetime::MaxAge(seconds) => format!("Max-Age={seconds}"),
        CookieLifetime::ExpiresAt(at) => {
            format!("Expires={}", at.format("%a, %d %b %Y %H:%M:%S GMT"))
        }
    };

    let mut cookie = format!(
        "{}={value}; {lifetime}; Path={}; HttpOnly; SameSite={}",
        config.cookie_name,
        config.path,
        config.same_site.as_str()
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub(crate) fn to_header_value(value: &str) -> Result<HeaderValue, SessionError> {
    HeaderValue::from_str(value)
        .map_err(|_| SessionError::Header(format!("Invalid header value: {value}")))
}

/// All values of `name` in a raw `Cookie` header, in order of appearance
pub(crate) fn cookie_values<'a>(
    cookie_header: &'a str,
    name: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    cookie_header
        .split(';')
        .map(|s| s.trim())
        .filter_map(move |s| {
            let (k, v) = s.split_once('=')?;
            (k.trim() == name).then(|| v.trim().trim_matches('"'))
        })
}

/// Joins every `Cookie` header into one string, skipping values that are not UTF-8.
pub(crate) fn joined_cookie_header(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| match value.to_str() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!("Ignoring invalid cookie header: {}", e);
                None
            }
        })
        .collect();

    if parts.is_empty() {
        tracing::debug!("No cookie header found");
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_max_age_cookie() {
        let config = SessionConfig::new("s");
        let cookie = render_set_cookie(&config, "abc", CookieLifetime::MaxAge(2_592_000));
        assert_eq!(
            cookie,
            "auth=abc; Max-Age=2592000; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_render_secure_cookie() {
        let config = SessionConfig::new("s").with_secure(true);
        let cookie = render_set_cookie(&config, "", CookieLifetime::MaxAge(0));
        assert_eq!(cookie, "auth=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax; Secure");
    }

    #[test]
    fn test_render_epoch_expiry() {
        let config = SessionConfig::new("s");
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let cookie = render_set_cookie(&config, "", CookieLifetime::ExpiresAt(epoch));
        assert_eq!(
            cookie,
            "auth=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_cookie_values() {
        let header = "theme=dark; auth=first;other=x; auth = \"second\"";
        let values: Vec<&str> = cookie_values(header, "auth").collect();
        assert_eq!(values, vec!["first", "second"]);

        assert_eq!(cookie_values("authx=1; xauth=2", "auth").count(), 0);
        assert_eq!(cookie_values("", "auth").count(), 0);
    }

    #[test]
    fn test_cookie_value_may_contain_equals() {
        let values: Vec<&str> = cookie_values("auth=a=b", "auth").collect();
        assert_eq!(values, vec!["a=b"]);
    }

    #[test]
    fn test_joined_cookie_header() {
        let mut headers = HeaderMap::new();
        assert!(joined_cookie_header(&headers).is_none());

        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2"));
        headers.append(COOKIE, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());

        assert_eq!(joined_cookie_header(&headers).as_deref(), Some("a=1; b=2"));
    }
}
