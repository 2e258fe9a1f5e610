use std::time::Duration;

use anyhow::{Context, Result};

use crate::builder::title_gate::GateTimings;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub title_gate: GateTimings,
    /// Upper bound for profile picture uploads, in bytes.
    pub max_image_bytes: usize,
    /// Builder sessions idle for longer than this are discarded.
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            title_gate: GateTimings::default(),
            max_image_bytes: 2 * 1024 * 1024,
            session_ttl: Duration::from_secs(6 * 60 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let millis = |key: &str, fallback: Duration| -> Result<Duration> {
            parse_or(&lookup, key, fallback.as_millis() as u64).map(Duration::from_millis)
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| defaults.rust_log.clone()),
            title_gate: GateTimings {
                typing_pause: millis("TITLE_TYPING_PAUSE_MS", defaults.title_gate.typing_pause)?,
                complete_display: millis(
                    "TITLE_COMPLETE_DISPLAY_MS",
                    defaults.title_gate.complete_display,
                )?,
                loading_delay: millis("TITLE_LOADING_DELAY_MS", defaults.title_gate.loading_delay)?,
            },
            max_image_bytes: parse_or(&lookup, "MAX_IMAGE_BYTES", defaults.max_image_bytes)?,
            session_ttl: parse_or(&lookup, "SESSION_TTL_SECS", defaults.session_ttl.as_secs())
                .map(Duration::from_secs)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.title_gate.typing_pause, Duration::from_millis(1000));
        assert_eq!(config.title_gate.complete_display, Duration::from_millis(800));
        assert_eq!(config.title_gate.loading_delay, Duration::from_millis(1500));
        assert_eq!(config.max_image_bytes, 2 * 1024 * 1024);
        assert_eq!(config.session_ttl, Duration::from_secs(21_600));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("TITLE_LOADING_DELAY_MS", "0"),
            ("MAX_IMAGE_BYTES", "1024"),
            ("SESSION_TTL_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(config.session_ttl, Duration::from_secs(90));
        assert_eq!(config.port, 9000);
        assert_eq!(config.title_gate.loading_delay, Duration::ZERO);
        assert_eq!(config.max_image_bytes, 1024);
    }

    #[test]
    fn test_bad_number_fails_with_context() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
