use log::warn;
use std::time::Duration;

/// Default feed host; override with `YT_FEED_BASE_URL` for a proxy mirror.
pub const DEFAULT_FEED_BASE_URL: &str = "https://www.youtube.com";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_WINDOW_HOURS: i64 = 24;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Runtime configuration for the scraper.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_base_url: String,
    pub request_timeout_ms: u64,
    pub user_agent: String,
    /// Default recency window applied when the caller does not override it
    pub window_hours: i64,
    /// Preferred caption languages, in order
    pub transcript_languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_hours: DEFAULT_WINDOW_HOURS,
            transcript_languages: vec!["en".to_string()],
        }
    }
}

impl Config {
    /// Build a configuration from environment variables, falling back to
    /// defaults (with a warning) for anything missing or malformed.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let feed_base_url = std::env::var("YT_FEED_BASE_URL")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.feed_base_url);

        let request_timeout_ms = match std::env::var("YT_REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    "Invalid YT_REQUEST_TIMEOUT_MS '{}', defaulting to {}ms",
                    raw, defaults.request_timeout_ms
                );
                defaults.request_timeout_ms
            }),
            Err(_) => defaults.request_timeout_ms,
        };

        let window_hours = match std::env::var("YT_WINDOW_HOURS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    "Invalid YT_WINDOW_HOURS '{}', defaulting to {}h",
                    raw, defaults.window_hours
                );
                defaults.window_hours
            }),
            Err(_) => defaults.window_hours,
        };

        let user_agent = std::env::var("YT_USER_AGENT").unwrap_or(defaults.user_agent);

        let transcript_languages = match std::env::var("YT_TRANSCRIPT_LANGUAGES") {
            Ok(raw) => {
                let langs: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if langs.is_empty() {
                    warn!("YT_TRANSCRIPT_LANGUAGES is empty, defaulting to 'en'");
                    defaults.transcript_languages
                } else {
                    langs
                }
            }
            Err(_) => defaults.transcript_languages,
        };

        Config {
            feed_base_url,
            request_timeout_ms,
            user_agent,
            window_hours,
            transcript_languages,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.feed_base_url, "https://www.youtube.com");
        assert_eq!(config.window_hours, 24);
        assert_eq!(config.transcript_languages, vec!["en".to_string()]);
    }

    #[test]
    fn from_env_overrides_and_falls_back() {
        std::env::set_var("YT_WINDOW_HOURS", "48");
        std::env::set_var("YT_REQUEST_TIMEOUT_MS", "not-a-number");
        std::env::set_var("YT_TRANSCRIPT_LANGUAGES", "de, en");

        let config = Config::from_env();
        assert_eq!(config.window_hours, 48);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(
            config.transcript_languages,
            vec!["de".to_string(), "en".to_string()]
        );

        std::env::remove_var("YT_WINDOW_HOURS");
        std::env::remove_var("YT_REQUEST_TIMEOUT_MS");
        std::env::remove_var("YT_TRANSCRIPT_LANGUAGES");
    }
}
