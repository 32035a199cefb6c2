use anyhow::{Context, Result, anyhow};
use axum_extra::extract::cookie::Key;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Duration;

const DEFAULT_SESSION_TTL_DAYS: i64 = 30;
const MAX_SESSION_TTL_DAYS: i64 = 3650;
const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cookie_key: Key,
    /// Mark the session cookie `Secure`; leave off for plain-http development.
    pub cookie_secure: bool,
    pub session_ttl: Duration,
    /// Rows per page on the public employee list.
    pub page_size: u64,
}

impl AppConfig {
    pub fn new(cookie_key: Key) -> Self {
        Self {
            cookie_key,
            cookie_secure: false,
            session_ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn load() -> Result<Self> {
        let cookie_secret =
            std::env::var("COOKIE_SECRET_BASE64").context("COOKIE_SECRET_BASE64 missing")?;
        let cookie_key = decode_cookie_key(&cookie_secret)?;

        let cookie_secure = env_bool("COOKIE_SECURE", false);

        let session_ttl =
            session_ttl(env_parse("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS)?)?;

        let page_size = env_parse("EMPLOYEES_PAGE_SIZE", DEFAULT_PAGE_SIZE)?.max(1);

        let mut config = Self::new(cookie_key);
        config.cookie_secure = cookie_secure;
        config.session_ttl = session_ttl;
        config.page_size = page_size;
        Ok(config)
    }
}

fn session_ttl(days: i64) -> Result<Duration> {
    if !(1..=MAX_SESSION_TTL_DAYS).contains(&days) {
        return Err(anyhow!(
            "SESSION_TTL_DAYS must be between 1 and {MAX_SESSION_TTL_DAYS}"
        ));
    }
    Ok(Duration::days(days))
}

fn decode_cookie_key(encoded: &str) -> Result<Key> {
    let secret_bytes = STANDARD
        .decode(encoded.trim())
        .context("invalid COOKIE_SECRET_BASE64")?;
    // The first 32 bytes sign, the next 32 encrypt.
    Key::try_from(secret_bytes.as_slice())
        .map_err(|_| anyhow!("COOKIE_SECRET_BASE64 must decode to at least 64 bytes"))
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| anyhow!("invalid {key}: {err}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_rejected() {
        let err = decode_cookie_key(&STANDARD.encode([7u8; 32])).unwrap_err();
        assert!(err.to_string().contains("at least 64 bytes"));
    }

    #[test]
    fn garbage_secrets_are_rejected() {
        assert!(decode_cookie_key("not base64!").is_err());
    }

    #[test]
    fn long_secrets_decode() {
        assert!(decode_cookie_key(&STANDARD.encode([7u8; 64])).is_ok());
    }

    #[test]
    fn session_ttl_is_bounded() {
        assert_eq!(session_ttl(7).unwrap(), Duration::days(7));
        assert!(session_ttl(MAX_SESSION_TTL_DAYS).is_ok());
        assert!(session_ttl(0).is_err());
        assert!(session_ttl(-3).is_err());
        let err = session_ttl(100_000_000).unwrap_err();
        assert!(err.to_string().contains("between 1 and 3650"));
    }

    #[test]
    fn defaults_are_development_friendly() {
        let config = AppConfig::new(Key::generate());
        assert!(!config.cookie_secure);
        assert_eq!(config.session_ttl, Duration::days(30));
        assert_eq!(config.page_size, 20);
    }
}
